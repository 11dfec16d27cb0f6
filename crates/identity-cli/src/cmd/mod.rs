pub mod paths;
pub mod show;
pub mod status;
pub mod strip;

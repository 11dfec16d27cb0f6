//! Tiered identity resolution.
//!
//! Three operator-edited JSONC documents describe who the assistant is and
//! who it works with:
//!
//! ```text
//! ~/.claude/instance.jsonc   bootstrap: system_paths + display
//!     │
//!     ├─▶ instance document  identity, covenant, workspace, thinking
//!     └─▶ user document      identity, faith, workspace, personhood, ...
//! ```
//!
//! [`IdentityResolver`] loads them once, flattens them into a
//! [`ResolvedIdentity`], and falls back to [`defaults::default_identity`] for
//! any tier that is missing or malformed. Callers always get a usable value.

pub mod bootstrap;
pub mod defaults;
pub mod document;
pub mod error;
pub mod instance;
pub mod merge;
pub mod paths;
pub mod resolver;
pub mod user;

pub use bootstrap::{BootstrapConfig, DisplayPreferences, SystemPaths};
pub use document::{DocumentSource, FsSource};
pub use error::{IdentityError, Result};
pub use instance::FullInstanceIdentity;
pub use merge::{ResolvedIdentity, UserProfile};
pub use resolver::{DegradationLevel, IdentityResolver, Resolution, Tier};
pub use user::FullUserIdentity;

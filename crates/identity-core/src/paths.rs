use crate::bootstrap::SystemPaths;
use crate::error::{IdentityError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const CLAUDE_DIR: &str = ".claude";
pub const BOOTSTRAP_FILE: &str = "instance.jsonc";

pub const SYSTEM_ROOT: &str = ".claude/cpi-si";
pub const CONFIG_ROOT: &str = ".claude/cpi-si/config";
pub const DATA_ROOT: &str = ".claude/cpi-si/system/data";
pub const SKILLS_DIR: &str = ".claude/skills";
pub const CONFIG_FILE: &str = "config.jsonc";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn claude_dir(home: &Path) -> PathBuf {
    home.join(CLAUDE_DIR)
}

/// Location of the bootstrap pointer document under `home`.
pub fn bootstrap_path(home: &Path) -> PathBuf {
    claude_dir(home).join(BOOTSTRAP_FILE)
}

/// Well-known bootstrap location for the current user: `~/.claude/instance.jsonc`.
pub fn default_bootstrap_path() -> Result<PathBuf> {
    let home = home::home_dir().ok_or(IdentityError::HomeNotFound)?;
    Ok(bootstrap_path(&home))
}

/// Conventional path table rooted at `home`, used when no bootstrap
/// document supplies one.
pub fn default_system_paths(home: &Path) -> SystemPaths {
    let config_root = home.join(CONFIG_ROOT);
    let data_root = home.join(DATA_ROOT);
    SystemPaths {
        instance_config: config_root.join("instance").join("default").join(CONFIG_FILE),
        instance_bio: config_root.join("instance").join("default").join("bio.md"),
        user_config: config_root.join("user").join("default").join(CONFIG_FILE),
        temporal_data: data_root.join("temporal"),
        session_data: data_root.join("session"),
        projects_data: data_root.join("projects"),
        skills: home.join(SKILLS_DIR),
        system_bin: home.join(SYSTEM_ROOT).join("system").join("bin"),
        config_root,
        data_root,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

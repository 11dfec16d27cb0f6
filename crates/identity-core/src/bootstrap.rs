use crate::document::{self, DocumentSource};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// SystemPaths
// ---------------------------------------------------------------------------

/// Path table named by the bootstrap document.
///
/// Only `instance_config` and `user_config` are consulted during resolution;
/// the rest are carried through for components that need raw locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemPaths {
    pub config_root: PathBuf,
    pub instance_config: PathBuf,
    pub instance_bio: PathBuf,
    pub user_config: PathBuf,
    pub data_root: PathBuf,
    pub temporal_data: PathBuf,
    pub session_data: PathBuf,
    pub projects_data: PathBuf,
    pub skills: PathBuf,
    pub system_bin: PathBuf,
}

impl SystemPaths {
    /// `(key, path)` pairs in document order, for display.
    pub fn entries(&self) -> [(&'static str, &Path); 10] {
        [
            ("config_root", self.config_root.as_path()),
            ("instance_config", self.instance_config.as_path()),
            ("instance_bio", self.instance_bio.as_path()),
            ("user_config", self.user_config.as_path()),
            ("data_root", self.data_root.as_path()),
            ("temporal_data", self.temporal_data.as_path()),
            ("session_data", self.session_data.as_path()),
            ("projects_data", self.projects_data.as_path()),
            ("skills", self.skills.as_path()),
            ("system_bin", self.system_bin.as_path()),
        ]
    }
}

// ---------------------------------------------------------------------------
// DisplayPreferences
// ---------------------------------------------------------------------------

/// Cosmetic strings for banners and footers. Keys beyond the known four are
/// kept in `extra` whatever their JSON type; `get` only surfaces the strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayPreferences {
    pub banner_title: String,
    pub banner_tagline: String,
    pub footer_verse_ref: String,
    pub footer_verse_text: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DisplayPreferences {
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "banner_title" => Some(self.banner_title.as_str()),
            "banner_tagline" => Some(self.banner_tagline.as_str()),
            "footer_verse_ref" => Some(self.footer_verse_ref.as_str()),
            "footer_verse_text" => Some(self.footer_verse_text.as_str()),
            other => self.extra.get(other).and_then(Value::as_str),
        }
    }
}

// ---------------------------------------------------------------------------
// BootstrapConfig
// ---------------------------------------------------------------------------

/// The pointer document: where the full identity documents live, plus
/// display preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub system_paths: SystemPaths,
    pub display: DisplayPreferences,
}

impl BootstrapConfig {
    pub fn instance_path(&self) -> &Path {
        &self.system_paths.instance_config
    }

    pub fn user_path(&self) -> &Path {
        &self.system_paths.user_config
    }
}

/// Load the bootstrap document at `path`.
///
/// Failure is returned as-is; substituting defaults is the resolver's job.
pub fn load_bootstrap(source: &dyn DocumentSource, path: &Path) -> Result<BootstrapConfig> {
    let config: BootstrapConfig = document::load(source, path)?;
    tracing::debug!(
        path = %path.display(),
        instance_config = %config.instance_path().display(),
        user_config = %config.user_path().display(),
        "bootstrap document loaded"
    );
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

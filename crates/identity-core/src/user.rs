use crate::document::{self, DocumentSource};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserIdentitySection {
    pub name: String,
    pub username: String,
    pub display_name: String,
    pub pronouns: String,
    pub age: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Faith {
    pub is_religious: bool,
    pub tradition: String,
    pub denomination: String,
    pub practice_level: String,
    pub important_practices: Vec<String>,
    #[serde(alias = "communication_prefs")]
    pub communication_preferences: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserWorkspace {
    pub organization: String,
    pub role: String,
    pub primary_project: String,
    pub calling: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Personhood {
    pub interests: Vec<String>,
    pub hobbies: Vec<String>,
    pub passions: Vec<String>,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPersonality {
    pub traits: Vec<String>,
    pub communication_style: String,
    pub work_style: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub timezone: String,
    pub locale: String,
}

// ---------------------------------------------------------------------------
// FullUserIdentity
// ---------------------------------------------------------------------------

/// The full operator document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullUserIdentity {
    pub identity: UserIdentitySection,
    pub faith: Faith,
    pub workspace: UserWorkspace,
    pub personhood: Personhood,
    pub personality: UserPersonality,
    pub preferences: UserPreferences,
}

pub fn load_user(source: &dyn DocumentSource, path: &Path) -> Result<FullUserIdentity> {
    let user: FullUserIdentity = document::load(source, path)?;
    tracing::debug!(
        path = %path.display(),
        name = %user.identity.name,
        "user identity loaded"
    );
    Ok(user)
}

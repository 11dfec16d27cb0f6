use crate::document::{self, DocumentSource};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceIdentitySection {
    pub name: String,
    pub username: String,
    pub display_name: String,
    pub pronouns: String,
    pub created: String,
    pub version: String,
}

/// Who created the instance and how the two relate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Covenant {
    pub creator: String,
    pub relationship: String,
    pub works_with: Vec<String>,
    pub serves: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceWorkspace {
    pub organization: String,
    pub role: String,
    pub primary_project: String,
    pub calling: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thinking {
    pub learning_style: String,
    pub problem_solving: String,
    pub creativity: String,
    pub love_to_think_about: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstancePersonality {
    pub traits: Vec<String>,
    pub communication_style: String,
    pub work_style: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstancePreferences {
    pub timezone: String,
    pub locale: String,
}

// ---------------------------------------------------------------------------
// FullInstanceIdentity
// ---------------------------------------------------------------------------

/// The full instance document. Sections or fields absent from the file are
/// left at their zero values; unrecognized keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullInstanceIdentity {
    pub identity: InstanceIdentitySection,
    pub covenant: Covenant,
    pub workspace: InstanceWorkspace,
    pub thinking: Thinking,
    pub personality: InstancePersonality,
    pub preferences: InstancePreferences,
}

pub fn load_instance(source: &dyn DocumentSource, path: &Path) -> Result<FullInstanceIdentity> {
    let instance: FullInstanceIdentity = document::load(source, path)?;
    tracing::debug!(
        path = %path.display(),
        name = %instance.identity.name,
        "instance identity loaded"
    );
    Ok(instance)
}

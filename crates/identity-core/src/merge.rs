use crate::bootstrap::{BootstrapConfig, DisplayPreferences, SystemPaths};
use crate::instance::FullInstanceIdentity;
use crate::user::FullUserIdentity;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ResolvedIdentity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorInfo {
    pub name: String,
    pub relationship: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinkingStyle {
    pub learning_style: String,
    pub problem_solving: String,
    pub love_to_think_about: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    pub organization: String,
    pub role: String,
    pub primary_project: String,
}

/// The operator as seen by the rest of the system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub display_name: String,
    pub pronouns: String,
    pub age: u32,
    pub is_religious: bool,
    pub faith: String,
    pub denomination: String,
    pub practice_level: String,
    pub faith_comm_prefs: String,
    pub organization: String,
    pub role: String,
    pub calling: String,
    pub passions: Vec<String>,
    pub work_style: String,
    pub timezone: String,
}

/// Flattened identity handed to consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedIdentity {
    pub name: String,
    pub pronouns: String,
    pub calling_short: String,
    pub creator: CreatorInfo,
    pub thinking: ThinkingStyle,
    pub workspace: WorkspaceInfo,
    pub user: UserProfile,
    pub display: DisplayPreferences,
    pub system_paths: SystemPaths,
}

// ---------------------------------------------------------------------------
// Field mapping
// ---------------------------------------------------------------------------
//
// | view field                    | source                                  |
// |-------------------------------|-----------------------------------------|
// | display, system_paths         | bootstrap.display, bootstrap.system_paths |
// | name, pronouns                | instance.identity.{name, pronouns}      |
// | calling_short                 | instance.workspace.calling              |
// | creator.{name, relationship}  | instance.covenant.{creator, relationship} |
// | thinking.*                    | instance.thinking.*                     |
// | workspace.*                   | instance.workspace.{organization, role, primary_project} |
// | user.{name, display_name, pronouns, age} | user.identity.*              |
// | user.is_religious             | user.faith.is_religious                 |
// | user.faith                    | user.faith.tradition                    |
// | user.denomination, practice_level | user.faith.*                        |
// | user.faith_comm_prefs         | user.faith.communication_preferences    |
// | user.{organization, role, calling} | user.workspace.*                   |
// | user.passions                 | user.personhood.passions                |
// | user.work_style               | user.personality.work_style             |
// | user.timezone                 | user.preferences.timezone               |

/// Flatten the three documents into the consumer-facing view.
///
/// Every view field comes from exactly one source field; nothing is invented,
/// so a field missing from a document stays at its zero value.
pub fn merge(
    bootstrap: &BootstrapConfig,
    instance: &FullInstanceIdentity,
    user: &FullUserIdentity,
) -> ResolvedIdentity {
    let mut resolved = ResolvedIdentity::default();
    apply_bootstrap(&mut resolved, bootstrap);
    apply_instance(&mut resolved, instance);
    resolved.user = user_profile(user);
    resolved
}

pub(crate) fn apply_bootstrap(resolved: &mut ResolvedIdentity, bootstrap: &BootstrapConfig) {
    resolved.display = bootstrap.display.clone();
    resolved.system_paths = bootstrap.system_paths.clone();
}

pub(crate) fn apply_instance(resolved: &mut ResolvedIdentity, instance: &FullInstanceIdentity) {
    resolved.name = instance.identity.name.clone();
    resolved.pronouns = instance.identity.pronouns.clone();
    resolved.calling_short = instance.workspace.calling.clone();
    resolved.creator = CreatorInfo {
        name: instance.covenant.creator.clone(),
        relationship: instance.covenant.relationship.clone(),
    };
    resolved.thinking = ThinkingStyle {
        learning_style: instance.thinking.learning_style.clone(),
        problem_solving: instance.thinking.problem_solving.clone(),
        love_to_think_about: instance.thinking.love_to_think_about.clone(),
    };
    resolved.workspace = WorkspaceInfo {
        organization: instance.workspace.organization.clone(),
        role: instance.workspace.role.clone(),
        primary_project: instance.workspace.primary_project.clone(),
    };
}

pub(crate) fn user_profile(user: &FullUserIdentity) -> UserProfile {
    UserProfile {
        name: user.identity.name.clone(),
        display_name: user.identity.display_name.clone(),
        pronouns: user.identity.pronouns.clone(),
        age: user.identity.age,
        is_religious: user.faith.is_religious,
        faith: user.faith.tradition.clone(),
        denomination: user.faith.denomination.clone(),
        practice_level: user.faith.practice_level.clone(),
        faith_comm_prefs: user.faith.communication_preferences.clone(),
        organization: user.workspace.organization.clone(),
        role: user.workspace.role.clone(),
        calling: user.workspace.calling.clone(),
        passions: user.personhood.passions.clone(),
        work_style: user.personality.work_style.clone(),
        timezone: user.preferences.timezone.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

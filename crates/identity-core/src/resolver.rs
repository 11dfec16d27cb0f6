use crate::bootstrap::{self, BootstrapConfig};
use crate::defaults;
use crate::document::{DocumentSource, FsSource};
use crate::error::IdentityError;
use crate::instance::{self, FullInstanceIdentity};
use crate::merge::{self, ResolvedIdentity};
use crate::paths;
use crate::user::{self, FullUserIdentity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// One of the three documents resolution reads, in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Bootstrap,
    Instance,
    User,
}

impl Tier {
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Bootstrap => "bootstrap",
            Tier::Instance => "instance",
            Tier::User => "user",
        }
    }
}

// ---------------------------------------------------------------------------
// DegradationLevel
// ---------------------------------------------------------------------------

/// How far resolution got before falling back to the default identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationLevel {
    Full,
    UserDefaulted,
    InstanceDefaulted,
    AllDefaulted,
}

impl DegradationLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            DegradationLevel::Full => "full",
            DegradationLevel::UserDefaulted => "user_defaulted",
            DegradationLevel::InstanceDefaulted => "instance_defaulted",
            DegradationLevel::AllDefaulted => "all_defaulted",
        }
    }

    pub fn is_degraded(self) -> bool {
        self != DegradationLevel::Full
    }

    /// Tiers whose content came from the default identity.
    pub fn defaulted_tiers(self) -> &'static [Tier] {
        match self {
            DegradationLevel::Full => &[],
            DegradationLevel::UserDefaulted => &[Tier::User],
            DegradationLevel::InstanceDefaulted => &[Tier::Instance, Tier::User],
            DegradationLevel::AllDefaulted => &[Tier::Bootstrap, Tier::Instance, Tier::User],
        }
    }
}

impl fmt::Display for DegradationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Outcome of one pass through the pipeline: the consumer-facing identity
/// plus diagnostics about how it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub identity: ResolvedIdentity,
    pub level: DegradationLevel,
    pub bootstrap_path: Option<PathBuf>,
    /// Present only if the instance document loaded.
    pub instance: Option<FullInstanceIdentity>,
    /// Present only if the user document loaded.
    pub user: Option<FullUserIdentity>,
    pub resolved_at: DateTime<Utc>,
}

/// Run the pipeline once: bootstrap, then instance, then user.
///
/// Each tier is attempted only if the previous one loaded. The user tier in
/// particular waits on the instance tier even though its path comes from the
/// bootstrap document alone; an instance failure therefore defaults the user
/// fields too. Any failure stops the pipeline and settles on the defaults for
/// the remaining tiers. This function never fails.
pub fn resolve(source: &dyn DocumentSource, bootstrap_path: Option<&Path>) -> Resolution {
    let loaded = bootstrap_path
        .ok_or(IdentityError::HomeNotFound)
        .and_then(|path| bootstrap::load_bootstrap(source, path));
    let bootstrap = match loaded {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(error = %e, "bootstrap document unavailable");
            return settle(DegradationLevel::AllDefaulted, bootstrap_path, None, None, None);
        }
    };

    let instance = match instance::load_instance(source, bootstrap.instance_path()) {
        Ok(i) => i,
        Err(e) => {
            tracing::warn!(error = %e, "instance identity unavailable");
            return settle(
                DegradationLevel::InstanceDefaulted,
                bootstrap_path,
                Some(bootstrap),
                None,
                None,
            );
        }
    };

    let user = match user::load_user(source, bootstrap.user_path()) {
        Ok(u) => u,
        Err(e) => {
            tracing::warn!(error = %e, "user identity unavailable");
            return settle(
                DegradationLevel::UserDefaulted,
                bootstrap_path,
                Some(bootstrap),
                Some(instance),
                None,
            );
        }
    };

    settle(
        DegradationLevel::Full,
        bootstrap_path,
        Some(bootstrap),
        Some(instance),
        Some(user),
    )
}

/// The single place a `ResolvedIdentity` is produced.
fn settle(
    level: DegradationLevel,
    bootstrap_path: Option<&Path>,
    bootstrap: Option<BootstrapConfig>,
    instance: Option<FullInstanceIdentity>,
    user: Option<FullUserIdentity>,
) -> Resolution {
    let identity = match (&bootstrap, &instance, &user) {
        (Some(b), Some(i), Some(u)) => merge::merge(b, i, u),
        _ => {
            let mut identity = defaults::default_identity().clone();
            if let Some(b) = &bootstrap {
                merge::apply_bootstrap(&mut identity, b);
            }
            if let Some(i) = &instance {
                merge::apply_instance(&mut identity, i);
            }
            if let Some(u) = &user {
                identity.user = merge::user_profile(u);
            }
            identity
        }
    };

    if level.is_degraded() {
        let defaulted: Vec<&str> = level.defaulted_tiers().iter().map(|t| t.as_str()).collect();
        tracing::warn!(
            degradation_level = %level,
            defaulted = ?defaulted,
            instance_name = %identity.name,
            user_name = %identity.user.name,
            "identity resolved with defaults"
        );
    } else {
        tracing::info!(
            degradation_level = %level,
            instance_name = %identity.name,
            user_name = %identity.user.name,
            "identity resolved"
        );
    }

    Resolution {
        identity,
        level,
        bootstrap_path: bootstrap_path.map(Path::to_path_buf),
        instance,
        user,
        resolved_at: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// IdentityResolver
// ---------------------------------------------------------------------------

/// Owns the memoized resolution.
///
/// Construct one at startup and share it (by reference or `Arc`). The first
/// call to [`IdentityResolver::get_resolved`] runs the pipeline; concurrent
/// first callers block until it finishes and every caller then sees the same
/// value. Later calls are plain reads.
pub struct IdentityResolver {
    bootstrap_path: Option<PathBuf>,
    source: Box<dyn DocumentSource>,
    resolution: OnceLock<Resolution>,
}

impl IdentityResolver {
    /// Resolve from an explicit bootstrap document on the local filesystem.
    pub fn new(bootstrap_path: impl Into<PathBuf>) -> Self {
        Self::with_source(bootstrap_path, FsSource)
    }

    /// Resolve from the well-known `~/.claude/instance.jsonc`.
    ///
    /// Without a home directory there is no bootstrap to read and resolution
    /// settles on the default identity.
    pub fn discover() -> Self {
        let bootstrap_path = match paths::default_bootstrap_path() {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "cannot locate bootstrap document");
                None
            }
        };
        Self {
            bootstrap_path,
            source: Box::new(FsSource),
            resolution: OnceLock::new(),
        }
    }

    pub fn with_source(
        bootstrap_path: impl Into<PathBuf>,
        source: impl DocumentSource + 'static,
    ) -> Self {
        Self {
            bootstrap_path: Some(bootstrap_path.into()),
            source: Box::new(source),
            resolution: OnceLock::new(),
        }
    }

    pub fn bootstrap_path(&self) -> Option<&Path> {
        self.bootstrap_path.as_deref()
    }

    /// The flattened identity. Never fails.
    pub fn get_resolved(&self) -> &ResolvedIdentity {
        &self.resolution().identity
    }

    /// Full diagnostics for the memoized resolution.
    pub fn resolution(&self) -> &Resolution {
        self.resolution
            .get_or_init(|| resolve(self.source.as_ref(), self.bootstrap_path.as_deref()))
    }

    pub fn degradation_level(&self) -> DegradationLevel {
        self.resolution().level
    }

    pub fn full_instance(&self) -> Option<&FullInstanceIdentity> {
        self.resolution().instance.as_ref()
    }

    pub fn full_user(&self) -> Option<&FullUserIdentity> {
        self.resolution().user.as_ref()
    }

    /// Whether the pipeline has already run.
    pub fn is_resolved(&self) -> bool {
        self.resolution.get().is_some()
    }
}

impl fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("bootstrap_path", &self.bootstrap_path)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::time::Duration;
    use tempfile::TempDir;

    struct CountingSource {
        reads: Arc<AtomicUsize>,
        delay: Duration,
    }

    impl CountingSource {
        fn new() -> (Self, Arc<AtomicUsize>) {
            let reads = Arc::new(AtomicUsize::new(0));
            let source = CountingSource {
                reads: reads.clone(),
                delay: Duration::ZERO,
            };
            (source, reads)
        }
    }

    impl DocumentSource for CountingSource {
        fn read(&self, path: &Path) -> Result<String> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(self.delay);
            FsSource.read(path)
        }
    }

    const INSTANCE: &str = r#"{
  // instance identity
  "identity": { "name": "Nova Dawn", "pronouns": "she/her" },
  "covenant": { "creator": "Sam Rivera", "relationship": "Partner" },
  "workspace": { "calling": "Build well", "organization": "Acme" },
  "thinking": { "learning_style": "by doing", "love_to_think_about": ["systems"] }
}"#;

    const USER: &str = r#"{
  "identity": { "name": "Sam Rivera", "display_name": "Sam", "pronouns": "they/them", "age": 31 },
  "faith": { "is_religious": true, "tradition": "Quaker" },
  "workspace": { "role": "Lead" },
  "personhood": { "passions": ["climbing"] },
  "preferences": { "timezone": "Europe/Berlin" }
}"#;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Fixture {
                dir: TempDir::new().unwrap(),
            }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        fn write(&self, name: &str, content: &str) -> PathBuf {
            let path = self.path(name);
            std::fs::write(&path, content).unwrap();
            path
        }

        /// Bootstrap pointing at `instance.jsonc` and `user.jsonc` in the fixture dir.
        fn bootstrap(&self) -> PathBuf {
            let doc = serde_json::json!({
                "system_paths": {
                    "instance_config": self.path("instance.jsonc"),
                    "user_config": self.path("user.jsonc"),
                    "data_root": "/data",
                },
                "display": { "banner_title": "Real Banner" },
            });
            let text = format!("// bootstrap\n{}", serde_json::to_string_pretty(&doc).unwrap());
            self.write("bootstrap.jsonc", &text)
        }

        fn all_documents(&self) -> PathBuf {
            self.write("instance.jsonc", INSTANCE);
            self.write("user.jsonc", USER);
            self.bootstrap()
        }
    }

    #[test]
    fn full_resolution_applies_mapping() {
        let fx = Fixture::new();
        let resolver = IdentityResolver::new(fx.all_documents());

        let resolved = resolver.get_resolved();
        assert_eq!(resolver.degradation_level(), DegradationLevel::Full);

        assert!(resolver.full_instance().is_some());
        assert!(resolver.full_user().is_some());

        assert_eq!(resolved.name, "Nova Dawn");
        assert_eq!(resolved.pronouns, "she/her");
        assert_eq!(resolved.calling_short, "Build well");
        assert_eq!(resolved.creator.name, "Sam Rivera");
        assert_eq!(resolved.creator.relationship, "Partner");
        assert_eq!(resolved.workspace.organization, "Acme");
        assert_eq!(resolved.thinking.learning_style, "by doing");
        assert_eq!(resolved.user.name, "Sam Rivera");
        assert_eq!(resolved.user.display_name, "Sam");
        assert_eq!(resolved.user.age, 31);
        assert!(resolved.user.is_religious);
        assert_eq!(resolved.user.faith, "Quaker");
        assert_eq!(resolved.user.role, "Lead");
        assert_eq!(resolved.user.passions, vec!["climbing"]);
        assert_eq!(resolved.user.timezone, "Europe/Berlin");
        // Fields no document sets stay empty rather than defaulted.
        assert!(resolved.user.work_style.is_empty());
        assert!(resolved.workspace.primary_project.is_empty());
        assert_eq!(resolved.display.banner_title, "Real Banner");
        assert_eq!(resolved.system_paths.data_root, PathBuf::from("/data"));
        assert_eq!(resolved.system_paths.user_config, fx.path("user.jsonc"));
    }

    #[test]
    fn missing_bootstrap_uses_full_defaults() {
        let fx = Fixture::new();
        let resolver = IdentityResolver::new(fx.path("bootstrap.jsonc"));

        assert_eq!(resolver.get_resolved(), defaults::default_identity());
        assert_eq!(resolver.degradation_level(), DegradationLevel::AllDefaulted);
        assert!(resolver.full_instance().is_none());
        assert!(resolver.full_user().is_none());
    }

    #[test]
    fn malformed_bootstrap_uses_full_defaults() {
        let fx = Fixture::new();
        let path = fx.write("bootstrap.jsonc", "{ \"system_paths\": ");
        let resolver = IdentityResolver::new(path);

        assert_eq!(resolver.get_resolved(), defaults::default_identity());
        assert_eq!(resolver.degradation_level(), DegradationLevel::AllDefaulted);
    }

    #[test]
    fn no_bootstrap_location_uses_full_defaults() {
        let (source, reads) = CountingSource::new();
        let resolution = resolve(&source, None);
        assert_eq!(resolution.level, DegradationLevel::AllDefaulted);
        assert_eq!(&resolution.identity, defaults::default_identity());
        assert!(resolution.bootstrap_path.is_none());
        assert_eq!(reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_instance_keeps_bootstrap_display_and_paths() {
        let fx = Fixture::new();
        fx.write("user.jsonc", USER);
        let resolver = IdentityResolver::new(fx.bootstrap());

        let resolved = resolver.get_resolved();
        let defaults = defaults::default_identity();
        assert_eq!(resolver.degradation_level(), DegradationLevel::InstanceDefaulted);
        assert_eq!(resolved.display.banner_title, "Real Banner");
        assert_eq!(resolved.system_paths.instance_config, fx.path("instance.jsonc"));
        assert_eq!(resolved.name, defaults.name);
        assert_eq!(resolved.creator, defaults.creator);
        // User loading is not attempted once the instance tier fails.
        assert_eq!(resolved.user, defaults.user);
        assert!(resolver.full_user().is_none());
    }

    #[test]
    fn instance_failure_skips_user_read() {
        let fx = Fixture::new();
        fx.write("instance.jsonc", "not json at all");
        fx.write("user.jsonc", USER);
        let (source, reads) = CountingSource::new();
        let resolver = IdentityResolver::with_source(fx.bootstrap(), source);

        assert_eq!(resolver.degradation_level(), DegradationLevel::InstanceDefaulted);
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn missing_user_keeps_real_instance() {
        let fx = Fixture::new();
        let instance_path = fx.write("a.json", INSTANCE);
        let doc = serde_json::json!({
            "system_paths": {
                "instance_config": instance_path,
                "user_config": fx.path("missing.json"),
            },
        });
        let bootstrap = fx.write("bootstrap.jsonc", &doc.to_string());
        let resolver = IdentityResolver::new(bootstrap);

        let resolved = resolver.get_resolved();
        let defaults = defaults::default_identity();
        assert_eq!(resolver.degradation_level(), DegradationLevel::UserDefaulted);
        assert_eq!(resolved.name, "Nova Dawn");
        assert_eq!(resolved.calling_short, "Build well");
        assert_eq!(resolved.user.name, defaults.user.name);
        assert_eq!(resolved.user, defaults.user);
        assert_eq!(resolved.system_paths.user_config, fx.path("missing.json"));
        assert!(resolver.full_instance().is_some());
        assert!(resolver.full_user().is_none());
    }

    #[test]
    fn malformed_user_keeps_real_instance() {
        let fx = Fixture::new();
        fx.write("instance.jsonc", INSTANCE);
        fx.write("user.jsonc", "{ \"identity\": { \"name\": ");
        let resolver = IdentityResolver::new(fx.bootstrap());

        let resolved = resolver.get_resolved();
        let defaults = defaults::default_identity();
        assert_eq!(resolver.degradation_level(), DegradationLevel::UserDefaulted);
        assert_eq!(resolved.name, "Nova Dawn");
        assert_eq!(resolved.creator.name, "Sam Rivera");
        assert_eq!(resolved.workspace.organization, "Acme");
        assert_eq!(resolved.display.banner_title, "Real Banner");
        assert_eq!(resolved.user, defaults.user);
        assert!(resolver.full_instance().is_some());
        assert!(resolver.full_user().is_none());
    }

    #[test]
    fn non_string_display_extra_still_resolves_fully() {
        let fx = Fixture::new();
        fx.write("instance.jsonc", INSTANCE);
        fx.write("user.jsonc", USER);
        let doc = serde_json::json!({
            "system_paths": {
                "instance_config": fx.path("instance.jsonc"),
                "user_config": fx.path("user.jsonc"),
            },
            "display": { "banner_title": "T", "show_banner": true, "width": 80 },
        });
        let resolver = IdentityResolver::new(fx.write("bootstrap.jsonc", &doc.to_string()));

        let resolved = resolver.get_resolved();
        assert_eq!(resolver.degradation_level(), DegradationLevel::Full);
        assert_eq!(resolved.display.banner_title, "T");
        assert_eq!(resolved.display.extra["width"], serde_json::json!(80));
        assert_eq!(resolved.name, "Nova Dawn");
        assert_eq!(resolved.user.name, "Sam Rivera");
    }

    #[test]
    fn null_fields_do_not_degrade_a_tier() {
        let fx = Fixture::new();
        fx.write(
            "instance.jsonc",
            r#"{ "identity": { "name": "Real", "pronouns": null }, "covenant": null }"#,
        );
        fx.write(
            "user.jsonc",
            r#"{ "identity": { "name": "Sam Rivera", "age": null }, "faith": null }"#,
        );
        let resolver = IdentityResolver::new(fx.bootstrap());

        let resolved = resolver.get_resolved();
        assert_eq!(resolver.degradation_level(), DegradationLevel::Full);
        assert_eq!(resolved.name, "Real");
        assert!(resolved.pronouns.is_empty());
        assert!(resolved.creator.name.is_empty());
        assert_eq!(resolved.user.name, "Sam Rivera");
        assert_eq!(resolved.user.age, 0);
    }

    #[test]
    fn repeated_calls_read_documents_once() {
        let fx = Fixture::new();
        let (source, reads) = CountingSource::new();
        let resolver = IdentityResolver::with_source(fx.all_documents(), source);

        assert!(!resolver.is_resolved());
        let first = resolver.get_resolved().clone();
        let second = resolver.get_resolved();
        assert!(resolver.is_resolved());
        assert_eq!(&first, second);
        assert!(std::ptr::eq(resolver.get_resolved(), second));
        assert_eq!(reads.load(Ordering::SeqCst), 3);

        resolver.resolution();
        resolver.full_user();
        assert_eq!(reads.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn concurrent_first_callers_share_one_resolution() {
        const CALLERS: usize = 8;

        let fx = Fixture::new();
        let reads = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            reads: reads.clone(),
            delay: Duration::from_millis(20),
        };
        let resolver = IdentityResolver::with_source(fx.all_documents(), source);
        let barrier = Barrier::new(CALLERS);

        let seen: Vec<&ResolvedIdentity> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..CALLERS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        resolver.get_resolved()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(reads.load(Ordering::SeqCst), 3);
        for identity in &seen {
            assert!(std::ptr::eq(*identity, seen[0]));
            assert_eq!(identity.name, "Nova Dawn");
            assert_eq!(identity.user.name, "Sam Rivera");
        }
        assert_eq!(resolver.degradation_level(), DegradationLevel::Full);
    }

    #[test]
    fn degradation_level_labels() {
        assert_eq!(DegradationLevel::Full.to_string(), "full");
        assert_eq!(DegradationLevel::UserDefaulted.as_str(), "user_defaulted");
        assert!(!DegradationLevel::Full.is_degraded());
        assert!(DegradationLevel::AllDefaulted.is_degraded());
        assert_eq!(
            DegradationLevel::InstanceDefaulted.defaulted_tiers(),
            &[Tier::Instance, Tier::User]
        );
        let json = serde_json::to_string(&DegradationLevel::AllDefaulted).unwrap();
        assert_eq!(json, "\"all_defaulted\"");
    }
}

use crate::output::{print_json, Fields};
use identity_core::IdentityResolver;

pub fn run(resolver: &IdentityResolver, json: bool) -> anyhow::Result<()> {
    let resolution = resolver.resolution();
    let defaulted: Vec<&str> = resolution
        .level
        .defaulted_tiers()
        .iter()
        .map(|t| t.as_str())
        .collect();

    if json {
        let value = serde_json::json!({
            "level": resolution.level,
            "defaulted_tiers": defaulted,
            "bootstrap_path": resolution.bootstrap_path,
            "instance_loaded": resolution.instance.is_some(),
            "user_loaded": resolution.user.is_some(),
            "resolved_at": resolution.resolved_at,
        });
        return print_json(&value);
    }

    let bootstrap = resolution
        .bootstrap_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(no home directory)".to_string());

    let mut fields = Fields::new();
    fields
        .field("Level", resolution.level.as_str())
        .field("Bootstrap", bootstrap)
        .field("Instance", loaded(resolution.instance.is_some()))
        .field("User", loaded(resolution.user.is_some()));
    if !defaulted.is_empty() {
        fields.field("Defaulted", defaulted.join(", "));
    }
    fields.field("Resolved", resolution.resolved_at.to_rfc3339());
    fields.print();
    Ok(())
}

fn loaded(ok: bool) -> &'static str {
    if ok {
        "loaded"
    } else {
        "defaulted"
    }
}

use crate::output::{print_json, Fields};
use identity_core::IdentityResolver;

pub fn run(resolver: &IdentityResolver, json: bool) -> anyhow::Result<()> {
    let paths = &resolver.get_resolved().system_paths;

    if json {
        return print_json(paths);
    }

    let mut fields = Fields::new();
    for (key, path) in paths.entries() {
        fields.field(key, path.display().to_string());
    }
    fields.print();
    Ok(())
}

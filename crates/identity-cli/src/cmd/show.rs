use crate::output::{print_json, Fields};
use identity_core::IdentityResolver;

pub fn run(resolver: &IdentityResolver, json: bool) -> anyhow::Result<()> {
    let identity = resolver.get_resolved();

    if json {
        return print_json(identity);
    }

    let user = &identity.user;
    let mut fields = Fields::new();
    fields
        .field("Name", with_aside(&identity.name, &identity.pronouns))
        .field("Calling", identity.calling_short.as_str())
        .field(
            "Creator",
            with_aside(&identity.creator.name, &identity.creator.relationship),
        )
        .field("Organization", identity.workspace.organization.as_str())
        .list("Thinks about", &identity.thinking.love_to_think_about)
        .gap()
        .field("User", user_line(&user.name, &user.display_name, &user.pronouns))
        .field("Role", user.role.as_str())
        .field("Calling", user.calling.as_str())
        .list("Passions", &user.passions)
        .field("Work style", user.work_style.as_str())
        .field("Timezone", user.timezone.as_str())
        .gap()
        .field("Banner", identity.display.banner_title.as_str());
    fields.print();
    Ok(())
}

/// `main (aside)`, dropping whichever part is empty.
fn with_aside(main: &str, aside: &str) -> String {
    match (main.is_empty(), aside.is_empty()) {
        (_, true) => main.to_string(),
        (true, false) => format!("({aside})"),
        (false, false) => format!("{main} ({aside})"),
    }
}

fn user_line(name: &str, display_name: &str, pronouns: &str) -> String {
    let main = if display_name.is_empty() || display_name == name {
        name.to_string()
    } else {
        format!("{name} \"{display_name}\"")
    };
    with_aside(&main, pronouns)
}

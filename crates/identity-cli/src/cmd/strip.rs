use anyhow::Context;
use identity_core::document::{self, FsSource};
use std::path::Path;

pub fn run(file: &Path) -> anyhow::Result<()> {
    let stripped = document::read_stripped(&FsSource, file)
        .with_context(|| format!("failed to strip {}", file.display()))?;
    print!("{stripped}");
    if !stripped.ends_with('\n') {
        println!();
    }
    Ok(())
}

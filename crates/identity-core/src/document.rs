use crate::error::{IdentityError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;

// ---------------------------------------------------------------------------
// DocumentSource
// ---------------------------------------------------------------------------

/// Where identity documents come from.
///
/// Implementations return the raw document text, or `NotFound` when nothing
/// exists at `path`. They never panic on a missing file so that callers can
/// choose their own fallback.
pub trait DocumentSource: Send + Sync {
    fn read(&self, path: &Path) -> Result<String>;
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl DocumentSource for FsSource {
    fn read(&self, path: &Path) -> Result<String> {
        if path.as_os_str().is_empty() {
            return Err(IdentityError::NotFound(path.to_path_buf()));
        }
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => IdentityError::NotFound(path.to_path_buf()),
            _ => IdentityError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// JSONC
// ---------------------------------------------------------------------------

/// Remove `//` and `/* */` comments from a JSON-with-comments document.
///
/// Comment markers inside string literals are left alone. Newlines inside
/// block comments are kept so parse errors still point at the original line.
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            match ch {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (ch, chars.peek().copied()) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
            }
            ('/', Some('/')) => {
                while chars.peek().is_some_and(|&c| c != '\n') {
                    chars.next();
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    if c == '\n' {
                        out.push('\n');
                    }
                    prev = c;
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

/// Read a document and strip its comments, ready for deserialization.
pub fn read_stripped(source: &dyn DocumentSource, path: &Path) -> Result<String> {
    let raw = source.read(path)?;
    Ok(strip_comments(&raw))
}

/// Deserialize JSONC `text` that was read from `path`.
///
/// An object member set to `null` reads as if it were absent, so it takes the
/// field's zero value instead of failing the whole document.
pub fn parse<T: DeserializeOwned>(text: &str, path: &Path) -> Result<T> {
    let unparseable = |source| IdentityError::Unparseable {
        path: path.to_path_buf(),
        source,
    };
    let mut value: Value = serde_json::from_str(&strip_comments(text)).map_err(unparseable)?;
    drop_nulls(&mut value);
    serde_json::from_value(value).map_err(unparseable)
}

fn drop_nulls(value: &mut Value) {
    match value {
        Value::Object(members) => {
            members.retain(|_, v| !v.is_null());
            members.values_mut().for_each(drop_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_nulls),
        _ => {}
    }
}

/// Read, strip and deserialize the document at `path`.
pub fn load<T: DeserializeOwned>(source: &dyn DocumentSource, path: &Path) -> Result<T> {
    let raw = source.read(path)?;
    parse(&raw, path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};

const STDIN_KEY: &str = "<stdin>";

/// Raw text plus the key its bookmarks and resume state are stored under.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Document {
    pub(super) key: String,
    pub(super) text: String,
    pub(super) is_file: bool,
}

pub(super) fn read_document(path: Option<&Path>) -> Result<Document> {
    match path {
        Some(path) => read_file(path),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(Document {
                key: STDIN_KEY.into(),
                text,
                is_file: false,
            })
        }
    }
}

fn read_file(path: &Path) -> Result<Document> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    // Invalid UTF-8 is replaced rather than rejected.
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let key = fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string();

    Ok(Document {
        key,
        text,
        is_file: true,
    })
}

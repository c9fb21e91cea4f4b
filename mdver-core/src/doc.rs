//! Document model for a single version

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// One immutable version of a markdown document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub content: String,
}

impl Document {
    pub fn new(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content: content.into(),
        }
    }

    /// Load a document from a file path.
    ///
    /// The id is the file stem and the name is the file name.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.clone());

        log::debug!("loaded {} ({} bytes)", path.display(), content.len());

        Ok(Self { id, name, content })
    }

    /// Get the number of `\n`-separated lines
    pub fn line_count(&self) -> usize {
        crate::diff::split_lines(&self.content).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_new_document() {
        let doc = Document::new("doc_1", "doc_1.md", "# Title\n");
        assert_eq!(doc.id, "doc_1");
        assert_eq!(doc.name, "doc_1.md");
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new("empty", "empty.md", "");
        assert_eq!(doc.line_count(), 0);
    }

    #[test]
    fn test_load_simple_file() -> Result<()> {
        let mut file = Builder::new().suffix(".md").tempfile()?;
        file.write_all(b"# Heading\n\nSome text\n")?;
        file.flush()?;

        let doc = Document::load(file.path())?;
        assert_eq!(doc.content, "# Heading\n\nSome text\n");
        assert!(doc.name.ends_with(".md"));
        assert!(!doc.id.ends_with(".md"));
        assert!(doc.name.starts_with(&doc.id));

        Ok(())
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = Document::load(Path::new("/definitely/not/here.md"));
        assert!(result.is_err());
    }
}

//! Ordered list of document versions

use anyhow::Result;
use std::path::Path;
use thiserror::Error;

use crate::doc::Document;

/// Errors raised by version navigation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("Version index {index} is out of range (have {len} versions)")]
    OutOfRange { index: isize, len: usize },
    #[error("At least one document version is required")]
    Empty,
}

/// Chronologically ordered, non-empty list of versions
#[derive(Clone, Debug)]
pub struct VersionList {
    docs: Vec<Document>,
}

impl VersionList {
    pub fn new(docs: Vec<Document>) -> Result<Self, VersionError> {
        if docs.is_empty() {
            return Err(VersionError::Empty);
        }
        Ok(Self { docs })
    }

    /// Load versions from files, oldest first in argument order
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let docs = paths
            .iter()
            .map(|p| Document::load(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(docs)?)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Document> {
        self.docs.get(index)
    }

    pub fn as_slice(&self) -> &[Document] {
        &self.docs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.docs.iter()
    }

    /// Validate a possibly negative index
    pub fn check_index(&self, index: isize) -> Result<usize, VersionError> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.docs.len())
            .ok_or(VersionError::OutOfRange {
                index,
                len: self.docs.len(),
            })
    }
}

//! Directory-backed catalog of prompt documents
//!
//! A catalog scans a directory tree once, validates every supported file and
//! indexes the valid documents by `prompt_id` and version. Files that fail to
//! load are kept as rejected entries so a single bad file never hides the
//! rest of the directory.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoadError, LoaderError, LoaderResult};
use crate::loader::parser::Format;
use crate::loader::load_document_with_config;
use crate::validation::ValidationConfig;
use promptlib_core::{DocumentVersion, PromptDocument, Status, VersionRange};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A valid document and the file it came from
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub path: PathBuf,
    pub document: PromptDocument,
}

/// Why a file was left out of the catalog
#[derive(Debug)]
pub enum RejectReason {
    /// The file could not be loaded or failed validation
    Load(LoadError),
    /// Another file already provides the same `prompt_id` and version
    Duplicate {
        qualified_id: String,
        first: PathBuf,
    },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Load(error) => write!(f, "{}", error),
            RejectReason::Duplicate { qualified_id, first } => {
                write!(f, "{} is already provided by '{}'", qualified_id, first.display())
            }
        }
    }
}

/// A file left out of the catalog
#[derive(Debug)]
pub struct RejectedEntry {
    pub path: PathBuf,
    pub reason: RejectReason,
}

/// Index of valid prompt documents under one directory
#[derive(Debug, Default)]
pub struct PromptCatalog {
    root: PathBuf,
    entries: BTreeMap<String, BTreeMap<DocumentVersion, CatalogEntry>>,
    rejected: Vec<RejectedEntry>,
}

impl PromptCatalog {
    /// Scan `dir` recursively with standard validation
    pub fn load_dir(dir: impl AsRef<Path>) -> LoaderResult<Self> {
        Self::load_dir_with_config(dir, &ValidationConfig::standard())
    }

    /// Scan `dir` recursively, validating each file under `config`
    pub fn load_dir_with_config(dir: impl AsRef<Path>, config: &ValidationConfig) -> LoaderResult<Self> {
        let dir = dir.as_ref();
        let metadata = std::fs::metadata(dir).map_err(|e| LoaderError::io_error(dir.to_path_buf(), e))?;
        if !metadata.is_dir() {
            return Err(LoaderError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        let mut catalog = Self {
            root: dir.to_path_buf(),
            ..Self::default()
        };

        for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable catalog entry");
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !Format::is_supported(path) {
                continue;
            }

            match load_document_with_config(path, config) {
                Ok(document) => catalog.insert(path.to_path_buf(), document),
                Err(error) => {
                    debug!(path = %path.display(), error = %error, "Rejected catalog file");
                    catalog.rejected.push(RejectedEntry {
                        path: path.to_path_buf(),
                        reason: RejectReason::Load(error),
                    });
                }
            }
        }

        debug!(
            root = %dir.display(),
            documents = catalog.len(),
            rejected = catalog.rejected.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Add a document; a duplicate `prompt_id@version` is rejected
    pub fn insert(&mut self, path: PathBuf, document: PromptDocument) {
        let versions = self.entries.entry(document.prompt_id.clone()).or_default();

        if let Some(existing) = versions.get(&document.version) {
            self.rejected.push(RejectedEntry {
                path,
                reason: RejectReason::Duplicate {
                    qualified_id: document.qualified_id(),
                    first: existing.path.clone(),
                },
            });
            return;
        }

        versions.insert(document.version, CatalogEntry { path, document });
    }

    /// Directory the catalog was loaded from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Exact lookup
    pub fn get(&self, prompt_id: &str, version: &DocumentVersion) -> Option<&CatalogEntry> {
        self.entries.get(prompt_id)?.get(version)
    }

    /// Highest version of `prompt_id` that is not deprecated
    pub fn latest(&self, prompt_id: &str) -> Option<&CatalogEntry> {
        self.find(prompt_id, &VersionRange::Any)
    }

    /// Highest non-deprecated version of `prompt_id` within `range`
    pub fn find(&self, prompt_id: &str, range: &VersionRange) -> Option<&CatalogEntry> {
        self.entries
            .get(prompt_id)?
            .values()
            .rev()
            .find(|entry| entry.document.status != Status::Deprecated && range.matches(&entry.document.version))
    }

    /// Every version of `prompt_id`, lowest first
    pub fn versions(&self, prompt_id: &str) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.get(prompt_id).into_iter().flat_map(|versions| versions.values())
    }

    /// Known prompt ids in order
    pub fn prompt_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All entries ordered by `prompt_id`, then version
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values().flat_map(|versions| versions.values())
    }

    /// Files left out of the catalog
    pub fn rejected(&self) -> &[RejectedEntry] {
        &self.rejected
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Check if no document was indexed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! List command handler

use crate::cli::ListArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use promptlib_core::{Metadata, VersionRange};
use promptlib_schemas::{CatalogEntry, PromptCatalog};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use super::utils::validation_config;

/// One catalog entry as listed
#[derive(Debug, Serialize)]
struct ListedDocument {
    #[serde(flatten)]
    metadata: Metadata,
    path: PathBuf,
}

/// A file the catalog left out
#[derive(Debug, Serialize)]
struct RejectedFile {
    path: PathBuf,
    reason: String,
}

/// Machine-readable outcome of `list`
#[derive(Debug, Serialize)]
struct Listing<'a> {
    root: &'a Path,
    documents: Vec<ListedDocument>,
    rejected: Vec<RejectedFile>,
}

/// Handle the list command
#[instrument(skip(config, output), fields(dir = ?args.dir, prompt = ?args.prompt))]
pub fn handle_list(args: ListArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let dir = args.dir.clone().unwrap_or_else(|| config.prompts_dir());
    let range = args.range.as_deref().map(VersionRange::parse).transpose()?;

    let spinner = output.spinner(&format!("Scanning {}...", dir.display()));
    let timer = Timer::with_details("catalog_scan", &dir.display().to_string());
    let catalog = PromptCatalog::load_dir_with_config(&dir, &validation_config(args.strict, config));
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let catalog = catalog?;
    debug!(
        elapsed_ms = timer.elapsed().as_millis() as u64,
        documents = catalog.len(),
        "Catalog scanned"
    );

    let entries = select_entries(&catalog, args.prompt.as_deref(), range.as_ref())?;
    let relative = |path: &Path| path.strip_prefix(catalog.root()).unwrap_or(path).to_path_buf();

    if !output.is_human() {
        return output.data(&Listing {
            root: catalog.root(),
            documents: entries
                .iter()
                .map(|entry| ListedDocument {
                    metadata: Metadata::from(&entry.document),
                    path: relative(&entry.path),
                })
                .collect(),
            rejected: catalog
                .rejected()
                .iter()
                .map(|rejected| RejectedFile {
                    path: relative(&rejected.path),
                    reason: rejected.reason.to_string(),
                })
                .collect(),
        });
    }

    let rows = entries
        .iter()
        .map(|entry| {
            let metadata = Metadata::from(&entry.document);
            vec![
                metadata.prompt_id,
                metadata.version.to_string(),
                metadata.status.as_str().to_string(),
                format!("{}/{}", metadata.provider, metadata.model),
                relative(&entry.path).display().to_string(),
            ]
        })
        .collect();
    output.table(&["PROMPT", "VERSION", "STATUS", "MODEL", "FILE"], rows)?;

    let rejected = catalog.rejected();
    output.info(&format!(
        "{} document(s) in {}, {} file(s) rejected",
        catalog.len(),
        dir.display(),
        rejected.len()
    ))?;

    if args.show_rejected {
        for entry in rejected {
            output.warning(&format!("{}: {}", relative(&entry.path).display(), entry.reason))?;
        }
    }

    Ok(())
}

/// Narrow the catalog to what the arguments ask for
fn select_entries<'a>(
    catalog: &'a PromptCatalog,
    prompt: Option<&str>,
    range: Option<&VersionRange>,
) -> Result<Vec<&'a CatalogEntry>> {
    let Some(prompt_id) = prompt else {
        return Ok(catalog.iter().collect());
    };

    let not_found = || Error::PromptNotFound {
        prompt_id: prompt_id.to_string(),
        dir: catalog.root().to_path_buf(),
    };

    match range {
        Some(range) => catalog.find(prompt_id, range).map(|entry| vec![entry]).ok_or_else(not_found),
        None => {
            let versions: Vec<_> = catalog.versions(prompt_id).collect();
            if versions.is_empty() {
                Err(not_found())
            } else {
                Ok(versions)
            }
        }
    }
}

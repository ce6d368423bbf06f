//! Metadata command handler

use crate::cli::MetadataArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use promptlib_core::extract;
use tracing::instrument;

use super::utils::load_prompt;

/// Handle the metadata command
#[instrument(skip(config, output), fields(file = %args.file.display()))]
pub fn handle_metadata(args: MetadataArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let document = load_prompt(&args.file, false, config)?;
    let metadata = extract(&document);

    if !output.is_human() {
        return output.data(&metadata);
    }

    output.field("prompt", &metadata.prompt_id)?;
    output.field("version", &metadata.version.to_string())?;
    output.field("status", metadata.status.as_str())?;
    output.field("owner", &metadata.owner)?;
    if let Some(tags) = &metadata.tags {
        output.field("tags", &tags.join(", "))?;
    }
    output.field("provider", &metadata.provider)?;
    output.field("model", &metadata.model)
}

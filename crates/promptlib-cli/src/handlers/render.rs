//! Render command handler

use crate::cli::RenderArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use promptlib_core::{render, render_full, resolve, DocumentVersion, ResolvedInputs};
use serde::Serialize;
use tracing::{info, instrument};

use super::utils::{collect_inputs, load_prompt, save_output};

/// Machine-readable outcome of `render`
#[derive(Debug, Serialize)]
struct RenderedPrompt<'a> {
    prompt_id: &'a str,
    version: DocumentVersion,
    inputs: &'a ResolvedInputs,
    user_only: bool,
    prompt: &'a str,
}

/// Handle the render command
#[instrument(skip(config, output), fields(file = %args.file.display(), user_only = args.user_only))]
pub fn handle_render(args: RenderArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("render_command", &format!("file: {}", args.file.display()));

    let document = load_prompt(&args.file, args.strict, config)?;
    let provided = collect_inputs(&document, &args.inputs)?;
    let resolved = resolve(&document, &provided)?;

    let prompt = if args.user_only {
        render(&document, &resolved)?
    } else {
        render_full(&document, &resolved)?
    };
    info!(prompt = %document.qualified_id(), chars = prompt.chars().count(), "Prompt rendered");

    if output.is_human() {
        output.writeln(&prompt)?;
    } else {
        output.data(&RenderedPrompt {
            prompt_id: &document.prompt_id,
            version: document.version,
            inputs: &resolved,
            user_only: args.user_only,
            prompt: &prompt,
        })?;
    }

    if let Some(path) = &args.save_to {
        save_output(path, &prompt, output)?;
    }

    Ok(())
}

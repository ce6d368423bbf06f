//! Request command handler

use crate::cli::RequestArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use promptlib_core::{build_request, render_full, resolve};
use tracing::{info, instrument};

use super::utils::{collect_inputs, load_prompt, save_output};

/// Handle the request command
#[instrument(skip(config, output), fields(file = %args.file.display()))]
pub fn handle_request(args: RequestArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("request_command", &format!("file: {}", args.file.display()));

    let document = load_prompt(&args.file, args.strict, config)?;
    let provided = collect_inputs(&document, &args.inputs)?;
    let resolved = resolve(&document, &provided)?;
    let prompt = render_full(&document, &resolved)?;

    let payload = {
        let _build_timer = Timer::new("request_building");
        build_request(&document, &prompt)?
    };
    info!(
        provider = %payload.provider,
        endpoint = %payload.endpoint,
        "Provider request built"
    );

    if output.is_human() {
        output.field("provider", payload.provider.as_str())?;
        output.field("endpoint", &payload.endpoint)?;
        output.section("Request Body")?;
        output.writeln(&payload.body_pretty()?)?;
    } else {
        output.data(&payload)?;
    }

    if let Some(path) = &args.save_to {
        save_output(path, &payload.body_pretty()?, output)?;
    }

    Ok(())
}

//! `lbrender render` — render the logical state once.
//!
//! Loads the state file, renders the HAProxy config, and atomically
//! replaces the output file. A write is skipped (and logged) when the
//! rendered text matches the file already on disk, so invoking this from
//! a reconcile loop never causes spurious daemon reloads.

use crate::cli::RenderArgs;
use crate::config::sources;
use crate::error::LbrenderError;
use crate::logging;
use crate::render::{self, WriteOutcome};

pub async fn execute(args: RenderArgs) -> Result<(), LbrenderError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let source = sources::source_for_path(&args.state)?;
    let (config, version) = source.load().await?;

    if args.stdout {
        let rendered = render::render_config(&config, args.socket.as_deref())?;
        println!("{rendered}");
        return Ok(());
    }

    match render::save(&args.output, &config, args.socket.as_deref())? {
        WriteOutcome::Written => tracing::info!(
            state = %args.state.display(),
            output = %args.output.display(),
            version = version.short(),
            "haproxy config written"
        ),
        WriteOutcome::Unchanged => tracing::info!(
            output = %args.output.display(),
            version = version.short(),
            "rendered config unchanged, write skipped"
        ),
    }

    Ok(())
}

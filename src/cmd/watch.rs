//! `lbrender watch` — keep the rendered config in sync with the state.
//!
//! Renders once, then polls the state file's content hash on an
//! interval and re-renders on change. Load or render failures inside
//! the loop are logged and retried on the next tick rather than
//! aborting, so a half-saved state file does not take the watcher down.
//! Stops cleanly on ctrl-c.

use std::time::Duration;

use crate::cli::WatchArgs;
use crate::config::sources;
use crate::config::{ConfigSource, ConfigVersion};
use crate::error::LbrenderError;
use crate::logging;
use crate::render::{self, WriteOutcome};

pub async fn execute(args: WatchArgs) -> Result<(), LbrenderError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let source = sources::source_for_path(&args.state)?;

    // The first render is fatal on error: a watcher that starts from a
    // broken state would otherwise sit silent until the next edit.
    let (config, mut version) = source.load().await?;
    render::save(&args.output, &config, args.socket.as_deref())?;
    tracing::info!(
        state = %args.state.display(),
        output = %args.output.display(),
        poll_interval_secs = args.poll_interval,
        version = version.short(),
        "initial render complete, watching for changes"
    );

    let interval = Duration::from_secs(args.poll_interval.max(1));

    loop {
        tokio::select! {
            () = tokio::time::sleep(interval) => {
                match refresh(source.as_ref(), &args, &version).await {
                    Ok(Some(new_version)) => version = new_version,
                    Ok(None) => {}
                    Err(e) => tracing::warn!(error = %e, "refresh failed, will retry"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                return Ok(());
            }
        }
    }
}

/// One poll tick: check the content hash, re-render when it moved.
/// Returns the new version when a reload happened.
async fn refresh(
    source: &dyn ConfigSource,
    args: &WatchArgs,
    current: &ConfigVersion,
) -> Result<Option<ConfigVersion>, LbrenderError> {
    if !source.has_changed(current).await? {
        return Ok(None);
    }

    let (config, version) = source.load().await?;
    match render::save(&args.output, &config, args.socket.as_deref())? {
        WriteOutcome::Written => tracing::info!(
            output = %args.output.display(),
            version = version.short(),
            "state changed, haproxy config rewritten"
        ),
        WriteOutcome::Unchanged => tracing::debug!(
            version = version.short(),
            "state changed but rendered output is identical"
        ),
    }
    Ok(Some(version))
}

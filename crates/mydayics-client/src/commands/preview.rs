//! `preview` command: fetch and list events without writing a file.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use mydayics_core::{EventRecord, preview_line};
use mydayics_providers::{EventSource, FetchOutcome, FetchRequest};

use super::run_fetch;
use crate::error::ClientResult;
use crate::status::ExportStatus;

/// Fetches through `source` and prints one line per event to `out`.
pub async fn run<W: Write>(
    source: Arc<dyn EventSource>,
    request: FetchRequest,
    poll_interval: Duration,
    max_subject: usize,
    out: &mut W,
) -> ClientResult<ExportStatus> {
    let outcome = run_fetch(source, request, poll_interval).await?;

    if let FetchOutcome::Success { events, discarded } = &outcome {
        debug!(discarded, "preview");
        render(events, max_subject, out)?;
    }
    Ok(ExportStatus::from_outcome(&outcome))
}

/// Writes the preview lines for `events`.
pub fn render<W: Write>(
    events: &[EventRecord],
    max_subject: usize,
    out: &mut W,
) -> io::Result<()> {
    for event in events {
        writeln!(out, "{}", preview_line(event, max_subject))?;
    }
    Ok(())
}

//! `export` command: fetch, build the calendar, write the file.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use mydayics_core::{CalendarDocument, EventRecord};
use mydayics_providers::{EventSource, FetchOutcome, FetchRequest};

use super::run_fetch;
use crate::error::ClientResult;
use crate::status::ExportStatus;

/// Fetches through `source` and writes the result to `output`.
///
/// The file is only touched once the calendar has been built, so a failed
/// fetch or an all-invalid result leaves any existing file alone.
pub async fn run(
    source: Arc<dyn EventSource>,
    request: FetchRequest,
    poll_interval: Duration,
    output: &Path,
) -> ClientResult<ExportStatus> {
    let outcome = run_fetch(source, request, poll_interval).await?;

    let events = match outcome {
        FetchOutcome::Success { events, discarded } => {
            if discarded > 0 {
                debug!(discarded, "some calendar items were not usable");
            }
            events
        }
        other => return Ok(ExportStatus::from_outcome(&other)),
    };

    if events.is_empty() {
        return Ok(ExportStatus::EmptyResult);
    }

    Ok(write_calendar(&events, output))
}

/// Builds the calendar for `events` and writes it to `output`.
pub fn write_calendar(events: &[EventRecord], output: &Path) -> ExportStatus {
    let document = match CalendarDocument::build(events) {
        Ok(document) => document,
        Err(e) => {
            warn!(error = %e, "calendar build failed");
            return ExportStatus::ExportFailure(e.to_string());
        }
    };

    let file = match File::create(output) {
        Ok(file) => file,
        Err(e) => {
            return ExportStatus::ExportFailure(format!("{}: {}", output.display(), e));
        }
    };

    let mut writer = BufWriter::new(file);
    match document.write_to(&mut writer) {
        Ok(summary) => {
            info!(path = %output.display(), "export complete");
            ExportStatus::Success(summary.exported)
        }
        Err(e) => ExportStatus::ExportFailure(format!("{}: {}", output.display(), e)),
    }
}

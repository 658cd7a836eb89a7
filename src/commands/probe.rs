use anyhow::Result;
use log::debug;

use crate::{
    console::Console,
    http::{RequestExecutor, RequestOutcome, Transport},
};

use super::format::preview;

const PREVIEW_CHARS: usize = 60;

/// Results of one probe run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProbeReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// GETs every URL through the executor and prints a one-line verdict for each.
#[tracing::instrument(skip(executor, console))]
pub async fn probe<T: Transport>(
    executor: &RequestExecutor<T>,
    urls: &[String],
    console: &mut dyn Console,
) -> Result<ProbeReport> {
    let mut report = ProbeReport::default();

    for url in urls {
        console.write_line("")?;
        console.write_line(&format!("Testing: {}", url))?;

        match executor.get(url, &[]).await {
            RequestOutcome::Success { payload, attempts } => {
                debug!("{} answered after {} attempt(s)", url, attempts);
                report.succeeded += 1;
                console.write_line(&format!(
                    "Success! Data preview: {}...",
                    preview(&payload, PREVIEW_CHARS)
                ))?;
            }
            RequestOutcome::Failure { message, .. } => {
                report.failed += 1;
                console.write_line(&format!("Failed: {}", message))?;
            }
        }
    }

    Ok(report)
}

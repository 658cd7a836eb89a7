use anyhow::Result;
use log::debug;

use crate::{console::LineConsole, dispatcher::RunSummary, runtime::Runtime};

pub mod blog;
pub mod config;
pub mod crypto;
pub mod dashboard;
pub mod format;
pub mod probe;
pub mod query;
pub mod save;
pub mod session;
pub mod weather;

use config::{Config, Settings};
pub use probe::ProbeReport;

/// Interactive dashboard on stdin/stdout.
#[tracing::instrument(skip(runtime, settings))]
pub async fn dashboard<R: Runtime + 'static>(runtime: R, settings: Settings) -> Result<RunSummary> {
    let config = Config::new(runtime, settings)?;
    let mut session = config.into_session(LineConsole::stdio());
    dashboard::run(&mut session).await
}

/// Interactive query menu on stdin/stdout.
#[tracing::instrument(skip(runtime, settings))]
pub async fn query<R: Runtime + 'static>(runtime: R, settings: Settings) -> Result<RunSummary> {
    let config = Config::new(runtime, settings)?;
    let mut session = config.into_session(LineConsole::stdio());
    query::run(&mut session).await
}

/// Probes each URL once through the configured executor.
#[tracing::instrument(skip(runtime, settings))]
pub async fn probe<R: Runtime + 'static>(
    runtime: R,
    settings: Settings,
    urls: &[String],
) -> Result<ProbeReport> {
    let config = Config::new(runtime, settings)?;
    let mut console = LineConsole::stdio();
    let report = probe::probe(&config.executor, urls, &mut console).await?;
    debug!("Probe finished: {:?}", report);
    Ok(report)
}

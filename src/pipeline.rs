use crate::config::IoFailurePolicy;
use crate::error::{MirrorError, ReportError, RowError};
use crate::fetchers::{self, ReportSource};
use crate::filter::DomainFilter;
use crate::parsers::Row;
use crate::paths;
use crate::results::{AssetTask, RowOutcome, RunSummary};
use std::path::PathBuf;

/// Read-only settings shared by every row of a run
#[derive(Debug)]
pub struct MirrorContext {
    /// Domain prefix filter
    pub filter: DomainFilter,
    /// Directory the site tree is reproduced under
    pub root: PathBuf,
    /// Origin prepended to replacement links
    pub report_origin: String,
}

/// Turns a row into its outcome without touching the network or the disk
pub fn plan_row(row: &Row, ctx: &MirrorContext) -> RowOutcome {
    let links = match row.link_triple() {
        Ok(links) => links,
        Err(e) => return RowOutcome::Failed(e),
    };

    if !ctx.filter.accepts(&links.source) {
        return RowOutcome::Skipped {
            index: row.index,
            source_url: links.source,
        };
    }

    match paths::map_destination(&links.source, ctx.filter.domain(), &ctx.root) {
        Ok(destination) => RowOutcome::Processed(AssetTask {
            index: row.index,
            download_url: links.download_url(&ctx.report_origin),
            source_url: links.source,
            destination,
        }),
        Err(e) => RowOutcome::Failed(e),
    }
}

/// Creates the destination directories, then downloads and writes the asset
pub async fn execute(
    client: &reqwest::Client,
    task: &AssetTask,
    ctx: &MirrorContext,
) -> Result<(), RowError> {
    let segments = paths::directory_segments(&ctx.root, &task.destination);
    paths::materialize(&ctx.root, &segments)?;

    ::log::info!(
        "Saving the image from {} to {}",
        task.download_url,
        task.destination.display()
    );
    let written = fetchers::asset::fetch(client, &task.download_url, &task.destination).await?;
    ::log::debug!("Wrote {} bytes to {}", written, task.destination.display());

    Ok(())
}

/// Loads the report and mirrors every matching row, one after another
pub async fn run(
    client: &reqwest::Client,
    source: &ReportSource,
    report_url: &str,
    row_element: &str,
    row_marker: &str,
    policy: IoFailurePolicy,
    ctx: &MirrorContext,
) -> Result<RunSummary, MirrorError> {
    let rows = fetchers::report::load(client, source, report_url)
        .await?
        .rows(row_element, row_marker)
        .map_err(|reason| ReportError::Parse {
            url: report_url.to_string(),
            reason,
        })?;

    let mut summary = RunSummary::default();
    if rows.is_empty() {
        ::log::info!("No image needs optimization.");
        return Ok(summary);
    }
    ::log::info!(
        "Found {} node{}!",
        rows.len(),
        if rows.len() > 1 { "s" } else { "" }
    );

    for row in &rows {
        ::log::info!("Parsing node #{}...", row.index);

        let outcome = match plan_row(row, ctx) {
            RowOutcome::Processed(task) => match execute(client, &task, ctx).await {
                Ok(()) => RowOutcome::Processed(task),
                Err(e) if policy == IoFailurePolicy::Abort => {
                    ::log::error!("{}", failure_line(row.index, &e));
                    return Err(MirrorError::Row {
                        index: row.index,
                        source: e,
                    });
                }
                Err(e) => RowOutcome::Failed(e),
            },
            other => other,
        };

        report_outcome(row.index, &outcome);
        summary.outcomes.push(outcome);
    }

    ::log::info!(
        "Done - {} mirrored, {} skipped, {} failed",
        summary.processed(),
        summary.skipped(),
        summary.failed()
    );
    Ok(summary)
}

fn report_outcome(index: usize, outcome: &RowOutcome) {
    match outcome {
        RowOutcome::Processed(task) => {
            ::log::info!("Node #{} {}: {}", index, outcome.label(), task.source_url)
        }
        RowOutcome::Skipped { source_url, .. } => {
            ::log::warn!("Node #{} {}: {}", index, outcome.label(), source_url)
        }
        RowOutcome::Failed(e) => ::log::error!("{}", failure_line(index, e)),
    }
}

fn failure_line(index: usize, error: &RowError) -> String {
    format!("Node #{} FAILED: {}", index, error)
}

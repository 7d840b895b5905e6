use crate::cli::ResolveArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use bindscan::{
    core::io::{document::DocumentSet, requests::RequestList, traits::RecordFile},
    engine::progress::ProgressReporter,
    workflows,
};
use tracing::{info, warn};

pub async fn run(args: ResolveArgs) -> Result<()> {
    info!("Merging configuration from defaults, file and CLI arguments...");
    let app_config = build_config(&args)?;

    info!("Loading requests from {:?}", &app_config.ids_path);
    let requests = RequestList::read_from_path(&app_config.ids_path)
        .map_err(|e| CliError::requests(&app_config.ids_path, e))?;

    info!("Loading entry documents from {:?}", &app_config.documents_path);
    let documents = DocumentSet::read_from_path(&app_config.documents_path)
        .map_err(|e| CliError::documents(&app_config.documents_path, e))?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Resolving {} request(s) against {} document(s) using '{}'...",
        requests.len(),
        documents.len(),
        app_config.core_config.search_method
    );

    let report = tokio::task::block_in_place(|| {
        workflows::batch::run(
            &requests.requests,
            &documents,
            &app_config.core_config,
            &reporter,
        )
    });

    info!(
        "Batch finished: {} resolved, {} failed.",
        report.resolved_count(),
        report.failed_count()
    );

    report
        .write_to_path(&app_config.output_path)
        .map_err(|e| CliError::documents(&app_config.output_path, e))?;

    println!(
        "✓ {} of {} request(s) resolved, report written to: {}",
        report.resolved_count(),
        requests.len(),
        app_config.output_path.display()
    );

    if report.failed_count() > 0 {
        warn!("{} request(s) failed.", report.failed_count());
        println!(
            "  {} request(s) failed: {}",
            report.failed_count(),
            progress_handler.failed_ids().join(", ")
        );
    }

    Ok(())
}

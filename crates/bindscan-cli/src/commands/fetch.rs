use crate::cli::FetchArgs;
use crate::client::EntryClient;
use crate::error::{CliError, Result};
use bindscan::core::io::document::DocumentSet;
use bindscan::core::io::requests::RequestList;
use bindscan::core::io::traits::RecordFile;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use tracing::{info, warn};

pub async fn run(args: FetchArgs) -> Result<()> {
    info!("Loading entry identifiers from {:?}", &args.ids);
    let requests =
        RequestList::read_from_path(&args.ids).map_err(|e| CliError::requests(&args.ids, e))?;

    let mut seen = BTreeSet::new();
    let pdb_ids: Vec<String> = requests
        .ids()
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect();
    if pdb_ids.len() < requests.len() {
        info!(
            "Collapsed {} request(s) into {} distinct identifier(s).",
            requests.len(),
            pdb_ids.len()
        );
    }

    let client = EntryClient::new(&args.endpoint)?;

    let pb = ProgressBar::new(pdb_ids.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map_err(|e| CliError::Other(e.into()))?
            .progress_chars("#>-"),
    );
    pb.set_draw_target(indicatif::ProgressDrawTarget::stderr_with_hz(2));
    pb.set_message("Querying...");

    println!(
        "Fetching {} entry document(s) from {}",
        pdb_ids.len(),
        args.endpoint
    );

    let results = client
        .fetch_all(&pdb_ids, args.concurrency, |pdb_id, result| {
            if let Err(e) = result {
                pb.println(format!("  ✗ {}: {}", pdb_id, e));
            }
            pb.inc(1);
        })
        .await;
    pb.finish_with_message("✓ Queries complete.");

    let mut documents = DocumentSet::new();
    let mut failed = 0usize;
    for (pdb_id, result) in results {
        match result {
            Ok(document) => {
                documents.insert(&pdb_id, document);
            }
            Err(e) => {
                warn!("Skipping '{}': {}", pdb_id, e);
                failed += 1;
            }
        }
    }

    info!("Writing {} document(s) to {:?}", documents.len(), &args.output);
    documents
        .write_to_path(&args.output)
        .map_err(|e| CliError::documents(&args.output, e))?;

    println!(
        "✓ {} document(s) written to: {}",
        documents.len(),
        args.output.display()
    );
    if failed > 0 {
        println!("  {} identifier(s) could not be fetched.", failed);
    }
    Ok(())
}

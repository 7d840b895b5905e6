use super::resolve;
use crate::core::io::document::{DocumentError, DocumentSet, normalize_id};
use crate::core::io::traits::RecordFile;
use crate::core::models::entry::{EntryRequest, ResolvedEntry};
use crate::engine::config::ResolveConfig;
use crate::engine::error::ResolveError;
use crate::engine::progress::{Progress, ProgressReporter};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub const MISSING_DOCUMENT: &str = "missing-document";

/// Serializable description of why one entry could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    pub kind: String,
    pub message: String,
}

impl From<&ResolveError> for ItemError {
    fn from(error: &ResolveError) -> Self {
        Self {
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum BatchOutcome {
    Resolved { entry: Box<ResolvedEntry> },
    Failed { error: ItemError },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub pdb_id: String,
    pub outcome: BatchOutcome,
}

impl BatchRecord {
    pub fn entry(&self) -> Option<&ResolvedEntry> {
        match &self.outcome {
            BatchOutcome::Resolved { entry } => Some(&**entry),
            BatchOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ItemError> {
        match &self.outcome {
            BatchOutcome::Resolved { .. } => None,
            BatchOutcome::Failed { error } => Some(error),
        }
    }
}

/// Ordered batch output; one record per request, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchReport {
    pub records: Vec<BatchRecord>,
}

impl BatchReport {
    pub fn resolved_count(&self) -> usize {
        self.records.iter().filter(|r| r.entry().is_some()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.records.len() - self.resolved_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &ItemError)> {
        self.records
            .iter()
            .filter_map(|r| r.error().map(|e| (r.pdb_id.as_str(), e)))
    }
}

impl RecordFile for BatchReport {
    type Error = DocumentError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    fn write_to(&self, writer: &mut impl Write) -> Result<(), Self::Error> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}

/// Resolves every request against its document.
///
/// A failing request is recorded as [`BatchOutcome::Failed`] and never affects the
/// others. The report has exactly one record per request, in request order.
#[instrument(skip_all, name = "batch_workflow", fields(requests = requests.len()))]
pub fn run(
    requests: &[EntryRequest],
    documents: &DocumentSet,
    config: &ResolveConfig,
    reporter: &ProgressReporter,
) -> BatchReport {
    reporter.report(Progress::PhaseStart { name: "Resolution" });
    info!(
        "Resolving {} request(s) with search method '{}'.",
        requests.len(),
        config.search_method
    );
    reporter.report(Progress::TaskStart {
        total_steps: requests.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = requests.iter();

    #[cfg(feature = "parallel")]
    let iterator = requests.par_iter();

    let records: Vec<BatchRecord> = iterator
        .map(|request| {
            let record = resolve_one(request, documents, config);
            if let Some(error) = record.error() {
                reporter.report(Progress::ItemFailed {
                    pdb_id: record.pdb_id.clone(),
                    reason: error.message.clone(),
                });
            }
            reporter.report(Progress::TaskIncrement);
            record
        })
        .collect();

    reporter.report(Progress::TaskFinish);

    let report = BatchReport { records };
    info!(
        resolved = report.resolved_count(),
        failed = report.failed_count(),
        "Batch resolution complete."
    );
    reporter.report(Progress::PhaseFinish);
    report
}

fn resolve_one(
    request: &EntryRequest,
    documents: &DocumentSet,
    config: &ResolveConfig,
) -> BatchRecord {
    let pdb_id = normalize_id(&request.pdb_id);
    let outcome = match documents.get(&pdb_id) {
        None => {
            warn!("No result document for '{}'.", pdb_id);
            BatchOutcome::Failed {
                error: ItemError {
                    kind: MISSING_DOCUMENT.to_string(),
                    message: format!("no result document was supplied for '{}'", pdb_id),
                },
            }
        }
        Some(document) => match resolve::run(document, request, config) {
            Ok(entry) => BatchOutcome::Resolved {
                entry: Box::new(entry),
            },
            Err(e) => {
                warn!("Failed to resolve '{}': {}", pdb_id, e);
                BatchOutcome::Failed {
                    error: ItemError::from(&e),
                }
            }
        },
    };
    BatchRecord { pdb_id, outcome }
}

use super::document::normalize_id;
use super::traits::RecordFile;
use crate::core::models::entry::EntryRequest;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum RequestFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid request on line {line}: {reason}")]
    Invalid { line: u64, reason: String },
}

#[derive(Debug, Deserialize)]
struct RequestRow {
    pdb_id: String,
    #[serde(default)]
    ligand: Option<String>,
    #[serde(default)]
    reference_sequence: Option<String>,
}

/// An ordered list of entry requests, read from a CSV file with the columns
/// `pdb_id`, `ligand` and `reference_sequence` (the latter two optional).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestList {
    pub requests: Vec<EntryRequest>,
}

impl RequestList {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            requests: ids
                .into_iter()
                .map(|id| EntryRequest::new(normalize_id(id.as_ref())))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.requests.iter().map(|r| r.pdb_id.as_str())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RecordFile for RequestList {
    type Error = RequestFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self, Self::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .flexible(true)
            .from_reader(reader);

        let mut requests = Vec::new();
        let mut seen = HashSet::new();
        let mut rows = csv_reader.deserialize::<RequestRow>();
        while let Some(row) = rows.next() {
            let row = row?;
            let pdb_id = normalize_id(&row.pdb_id);
            if pdb_id.is_empty() {
                return Err(RequestFileError::Invalid {
                    line: rows.reader().position().line(),
                    reason: "empty pdb_id".to_string(),
                });
            }
            if !seen.insert(pdb_id.clone()) {
                warn!("Request for '{}' appears more than once.", pdb_id);
            }
            requests.push(EntryRequest {
                pdb_id,
                ligand: non_blank(row.ligand),
                reference_sequence: non_blank(row.reference_sequence),
            });
        }
        Ok(Self { requests })
    }

    fn write_to(&self, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["pdb_id", "ligand", "reference_sequence"])?;
        for request in &self.requests {
            csv_writer.write_record([
                request.pdb_id.as_str(),
                request.ligand.as_deref().unwrap_or(""),
                request.reference_sequence.as_deref().unwrap_or(""),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> Result<RequestList, RequestFileError> {
        RequestList::read_from(&mut input.as_bytes())
    }

    #[test]
    fn reads_full_rows_and_normalizes_ids() {
        let list = read("pdb_id,ligand,reference_sequence\n4hhb, HEM ,MVLSPADKTNV\n").unwrap();
        assert_eq!(
            list.requests,
            vec![
                EntryRequest::new("4HHB")
                    .with_ligand("HEM")
                    .with_reference_sequence("MVLSPADKTNV")
            ]
        );
    }

    #[test]
    fn optional_columns_may_be_blank_or_absent() {
        let list = read("pdb_id,ligand\n1ABC,\n2XYZ,ATP\n").unwrap();
        assert_eq!(list.requests[0], EntryRequest::new("1ABC"));
        assert_eq!(list.requests[1].ligand.as_deref(), Some("ATP"));
        assert_eq!(list.requests[1].reference_sequence, None);
    }

    #[test]
    fn comment_lines_are_skipped_and_order_is_kept() {
        let list = read("pdb_id\n# first batch\n3CCC\n1AAA\n2BBB\n").unwrap();
        assert_eq!(list.ids().collect::<Vec<_>>(), vec!["3CCC", "1AAA", "2BBB"]);
    }

    #[test]
    fn duplicate_ids_are_kept() {
        let list = read("pdb_id\n1AAA\n1aaa\n").unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = read("pdb_id,ligand\n,ATP\n").unwrap_err();
        assert!(matches!(err, RequestFileError::Invalid { .. }));
    }

    #[test]
    fn missing_id_column_is_a_csv_error() {
        let err = read("ligand\nATP\n").unwrap_err();
        assert!(matches!(err, RequestFileError::Csv(_)));
    }

    #[test]
    fn written_list_reads_back_identically() {
        let list = RequestList {
            requests: vec![
                EntryRequest::new("1ABC").with_ligand("SO4"),
                EntryRequest::new("2XYZ").with_reference_sequence("MKT"),
            ],
        };
        let mut buffer = Vec::new();
        list.write_to(&mut buffer).unwrap();
        assert_eq!(read(std::str::from_utf8(&buffer).unwrap()).unwrap(), list);
    }

    #[test]
    fn from_ids_normalizes_each_identifier() {
        let list = RequestList::from_ids(["1abc", " 2xyz"]);
        assert_eq!(list.ids().collect::<Vec<_>>(), vec!["1ABC", "2XYZ"]);
    }
}

use crate::error::{CliError, Result};
use bindscan::core::io::document::{EntryDocument, normalize_id};
use futures_util::stream::{self, StreamExt};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_ENDPOINT: &str = "https://data.rcsb.org/graphql";

const REQUEST_TIMEOUT_SECS: u64 = 60;

// Selects exactly the fields read through `bindscan::core::io::schema`.
const ENTRY_QUERY: &str = r#"query Entry($id: String!) {
  entry(entry_id: $id) {
    rcsb_id
    polymer_entities {
      rcsb_id
      entity_poly { pdbx_seq_one_letter_code_can }
      rcsb_polymer_entity_container_identifiers { uniprot_ids }
      rcsb_polymer_entity_align {
        reference_database_accession
        aligned_regions { entity_beg_seq_id ref_beg_seq_id length }
      }
      rcsb_cofactors {
        cofactor_chem_comp_id
        cofactor_name
        binding_assay_value
        binding_assay_value_type
      }
      polymer_entity_instances {
        rcsb_polymer_instance_feature {
          type
          name
          feature_positions { beg_seq_id }
        }
      }
    }
    nonpolymer_entities {
      pdbx_entity_nonpoly { comp_id }
      nonpolymer_entity_instances {
        rcsb_nonpolymer_instance_validation_score { is_subject_of_investigation }
      }
    }
  }
}"#;

/// Client for the RCSB `entry` GraphQL query.
#[derive(Debug, Clone)]
pub struct EntryClient {
    http: reqwest::Client,
    endpoint: String,
}

impl EntryClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("bindscan/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn request_body(pdb_id: &str) -> Value {
        json!({
            "query": ENTRY_QUERY,
            "variables": {"id": normalize_id(pdb_id)},
        })
    }

    pub async fn fetch_entry(&self, pdb_id: &str) -> Result<EntryDocument> {
        debug!("Querying {} for '{}'.", self.endpoint, pdb_id);
        let response = self
            .http
            .post(&self.endpoint)
            .json(&Self::request_body(pdb_id))
            .send()
            .await?
            .error_for_status()?;
        let body: Value = response.json().await?;

        EntryDocument::from_value(body).map_err(|e| CliError::Query {
            pdb_id: pdb_id.to_string(),
            reason: e.to_string(),
        })
    }

    /// Fetches every identifier with at most `concurrency` requests in flight.
    ///
    /// Results arrive in completion order; `on_complete` is called once per identifier.
    pub async fn fetch_all(
        &self,
        pdb_ids: &[String],
        concurrency: usize,
        on_complete: impl Fn(&str, &Result<EntryDocument>),
    ) -> Vec<(String, Result<EntryDocument>)> {
        info!(
            "Fetching {} entry identifier(s) with up to {} concurrent request(s).",
            pdb_ids.len(),
            concurrency.max(1)
        );
        stream::iter(pdb_ids)
            .map(|pdb_id| async move { (pdb_id.clone(), self.fetch_entry(pdb_id).await) })
            .buffer_unordered(concurrency.max(1))
            .inspect(|(pdb_id, result)| on_complete(pdb_id, result))
            .collect()
            .await
    }
}

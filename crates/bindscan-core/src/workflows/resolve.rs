use crate::core::io::document::{EntryDocument, normalize_id};
use crate::core::io::schema;
use crate::core::models::advisory::Advisory;
use crate::core::models::entity::PolymerEntity;
use crate::core::models::entry::{Alignment, Cofactor, EntryRequest, ResolvedEntry};
use crate::core::sequence::normalize_sequence;
use crate::core::tree::path::{PathError, PathResolver, as_items};
use crate::engine::binding_site::BindingSiteExtractor;
use crate::engine::config::ResolveConfig;
use crate::engine::error::ResolveError;
use crate::engine::matcher::{EntityMatcher, MatchStrategy};
use crate::engine::mutation;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Resolves one entry: selects the relevant polymer entity and collects its sequence,
/// reference alignment, binding sites, cofactors and (optionally) control mutants.
///
/// Recoverable data problems are returned as advisories on the entry; a missing entity
/// or sequence, a misconfigured strategy and strict-mode ambiguity are errors.
#[instrument(skip_all, name = "resolve_workflow", fields(pdb_id = %request.pdb_id))]
pub fn run(
    document: &EntryDocument,
    request: &EntryRequest,
    config: &ResolveConfig,
) -> Result<ResolvedEntry, ResolveError> {
    let resolver = config.resolver();
    let mut advisories = Vec::new();
    let pdb_id = normalize_id(&request.pdb_id);

    let ligand = match request.ligand.as_deref().map(normalize_id) {
        Some(ligand) if !ligand.is_empty() => Some(ligand),
        _ => subject_ligand(document, &resolver, &mut advisories)?,
    };
    debug!(ligand = ?ligand, "Subject ligand determined.");

    let entry_id = resolver
        .resolve_str(document.root(), schema::ENTRY_ID)?
        .absorb(&mut advisories)
        .map(normalize_id)
        .unwrap_or_else(|| pdb_id.clone());
    let reference = request.reference_sequence.as_deref().map(normalize_sequence);

    let entities = document
        .polymer_entities(&resolver)?
        .absorb(&mut advisories);
    let strategy = MatchStrategy::bind(
        config.search_method,
        &entry_id,
        &config.entity_id,
        ligand.as_deref(),
        reference.as_deref(),
    )?;
    let entity = EntityMatcher::new(resolver)
        .select(&entities, strategy)?
        .absorb(&mut advisories)
        .ok_or_else(|| ResolveError::NoMatchingEntity {
            pdb_id: pdb_id.clone(),
            method: config.search_method.to_string(),
        })?;
    let entity_id = entity
        .id(&resolver)?
        .absorb(&mut advisories)
        .map(str::to_string);
    info!(entity = %entity.label(), "Selected polymer entity.");

    let sequence = entity
        .canonical_sequence(&resolver)?
        .absorb(&mut advisories)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ResolveError::MissingSequence {
            entity: entity.label(),
        })?;

    let alignment = match read_alignment(&entity, &resolver, &mut advisories) {
        Ok(alignment) => Some(alignment),
        Err(reason) => {
            debug!(entity = %entity.label(), "Alignment unavailable: {}", reason);
            advisories.push(Advisory::AlignmentUnavailable {
                entity_id: entity.label(),
                reason,
            });
            None
        }
    };

    let uniprot_ids = read_uniprot_ids(&entity, &resolver, &mut advisories)?;

    let ligand_interactions = BindingSiteExtractor::new(resolver)
        .extract(&entity, ligand.as_deref())?
        .absorb(&mut advisories);

    let cofactors = read_cofactors(
        &entity,
        &resolver,
        config.filter_affinity_nulls,
        &mut advisories,
    )?;

    let mut entry = ResolvedEntry {
        pdb_id,
        entity_id,
        sequence,
        uniprot_ids,
        alignment,
        ligand,
        ligand_interactions,
        cofactors,
        mutants: None,
        advisories: Vec::new(),
    };

    if config.auto_mutate {
        if entry.ligand.is_some() {
            let positions = entry.binding_site_positions();
            entry.mutants = Some(mutation::generate(
                &entry.sequence,
                &positions,
                config.mutation.seed,
                config.mutation.homopolymer_residue,
            )?);
        } else {
            warn!("No subject ligand; mutant generation skipped.");
            advisories.push(Advisory::MutationSkipped {
                reason: "no subject ligand was supplied or flagged in the entry".to_string(),
            });
        }
    }

    entry.advisories = dedup_in_order(advisories);
    Ok(entry)
}

/// The first non-polymer entity flagged as subject of investigation.
fn subject_ligand(
    document: &EntryDocument,
    resolver: &PathResolver,
    advisories: &mut Vec<Advisory>,
) -> Result<Option<String>, PathError> {
    let candidates = document
        .nonpolymer_entities(resolver)?
        .absorb(advisories);
    for candidate in candidates {
        if candidate
            .is_subject_of_investigation(resolver)?
            .absorb(advisories)
        {
            if let Some(comp_id) = candidate.comp_id(resolver)?.absorb(advisories) {
                return Ok(Some(normalize_id(comp_id)));
            }
        }
    }
    Ok(None)
}

fn read_alignment(
    entity: &PolymerEntity<'_>,
    resolver: &PathResolver,
    advisories: &mut Vec<Advisory>,
) -> Result<Alignment, String> {
    let regions = resolver
        .resolve(entity.node(), schema::ALIGNED_REGIONS)
        .map_err(|e| e.to_string())?
        .absorb(advisories);
    let region = as_items(regions)
        .into_iter()
        .next()
        .ok_or("entity has no aligned region")?;

    let field = |key: &str| region.get(key).and_then(Value::as_i64);
    let entity_begin = field(schema::REGION_ENTITY_BEGIN)
        .ok_or_else(|| format!("aligned region lacks '{}'", schema::REGION_ENTITY_BEGIN))?;
    let reference_begin = field(schema::REGION_REFERENCE_BEGIN)
        .ok_or_else(|| format!("aligned region lacks '{}'", schema::REGION_REFERENCE_BEGIN))?;

    let reference_accession = resolver
        .resolve_str(entity.node(), schema::ALIGNMENT_ACCESSION)
        .map_err(|e| e.to_string())?
        .absorb(advisories)
        .map(str::to_string);

    Ok(Alignment {
        reference_accession,
        entity_begin,
        reference_begin,
        length: field(schema::REGION_LENGTH),
        offset: reference_begin - entity_begin,
    })
}

fn read_uniprot_ids(
    entity: &PolymerEntity<'_>,
    resolver: &PathResolver,
    advisories: &mut Vec<Advisory>,
) -> Result<Vec<String>, PathError> {
    let ids = resolver
        .resolve(entity.node(), schema::UNIPROT_IDS)?
        .absorb(advisories);
    Ok(as_items(ids)
        .into_iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect())
}

fn read_cofactors(
    entity: &PolymerEntity<'_>,
    resolver: &PathResolver,
    filter_affinity_nulls: bool,
    advisories: &mut Vec<Advisory>,
) -> Result<Vec<Cofactor>, PathError> {
    let records = resolver
        .resolve(entity.node(), schema::COFACTORS)?
        .absorb(advisories);

    let mut cofactors = Vec::new();
    for record in as_items(records) {
        match serde_json::from_value::<Cofactor>(record.clone()) {
            Ok(cofactor) => {
                if filter_affinity_nulls && cofactor.binding_assay_value.is_none() {
                    continue;
                }
                cofactors.push(cofactor);
            }
            Err(e) => advisories.push(Advisory::MalformedRecord {
                context: "cofactor".to_string(),
                reason: e.to_string(),
            }),
        }
    }
    Ok(cofactors)
}

fn dedup_in_order(advisories: Vec<Advisory>) -> Vec<Advisory> {
    let mut unique: Vec<Advisory> = Vec::with_capacity(advisories.len());
    for advisory in advisories {
        if !unique.contains(&advisory) {
            unique.push(advisory);
        }
    }
    unique
}

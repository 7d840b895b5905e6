use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::ResolveArgs;
use crate::error::{CliError, Result};
use bindscan::core::models::residue::AminoAcid;
use bindscan::engine::config::ResolveConfigBuilder;
use bindscan::engine::matcher::SearchMethod;
use std::str::FromStr;

/// Merges compiled defaults, the optional TOML file, `--set` overrides and explicit
/// flags, in increasing order of precedence.
pub fn build_config(args: &ResolveArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let matching_file = file_config.matching.take().unwrap_or_default();
    let search_method_name = args
        .search_method
        .as_deref()
        .or(matching_file.search_method.as_deref())
        .unwrap_or(&defaults.search_method);
    let search_method = SearchMethod::from_str(search_method_name)
        .map_err(|e| CliError::Argument(e.to_string()))?;
    let entity_id = args
        .entity_id
        .clone()
        .or(matching_file.entity_id)
        .unwrap_or(defaults.entity_id);
    let strict_paths = args.strict
        || matching_file
            .strict_paths
            .unwrap_or(defaults.strict_paths);

    let extraction_file = file_config.extraction.take().unwrap_or_default();
    let filter_affinity_nulls = if args.keep_affinity_nulls {
        false
    } else {
        extraction_file
            .filter_affinity_nulls
            .unwrap_or(defaults.filter_affinity_nulls)
    };

    let mutation_file = file_config.mutation.take().unwrap_or_default();
    let auto_mutate = args.auto_mutate
        || mutation_file
            .auto_mutate
            .unwrap_or(defaults.auto_mutate);
    let seed = args.seed.or(mutation_file.seed).unwrap_or(defaults.seed);
    let homopolymer_name = args
        .homopolymer
        .as_deref()
        .or(mutation_file.homopolymer_residue.as_deref())
        .unwrap_or(&defaults.homopolymer_residue);
    let homopolymer_residue = AminoAcid::from_str(homopolymer_name)
        .map_err(|e| CliError::Argument(e.to_string()))?;

    let core_config = ResolveConfigBuilder::new()
        .search_method(search_method)
        .entity_id(entity_id)
        .strict_paths(strict_paths)
        .filter_affinity_nulls(filter_affinity_nulls)
        .auto_mutate(auto_mutate)
        .seed(seed)
        .homopolymer_residue(homopolymer_residue)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        ids_path: args.ids.clone(),
        documents_path: args.documents.clone(),
        output_path: args.output.clone(),
        core_config,
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid boolean value for {}: {}", key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();
        let value_str = value_str.trim();

        match key {
            "matching.search-method" => {
                config
                    .matching
                    .get_or_insert_with(Default::default)
                    .search_method = Some(value_str.to_string());
            }
            "matching.entity-id" => {
                config.matching.get_or_insert_with(Default::default).entity_id =
                    Some(value_str.to_string());
            }
            "matching.strict-paths" => {
                config
                    .matching
                    .get_or_insert_with(Default::default)
                    .strict_paths = Some(parse_bool(key, value_str)?);
            }
            "extraction.filter-affinity-nulls" => {
                config
                    .extraction
                    .get_or_insert_with(Default::default)
                    .filter_affinity_nulls = Some(parse_bool(key, value_str)?);
            }
            "mutation.auto-mutate" => {
                config
                    .mutation
                    .get_or_insert_with(Default::default)
                    .auto_mutate = Some(parse_bool(key, value_str)?);
            }
            "mutation.seed" => {
                config.mutation.get_or_insert_with(Default::default).seed =
                    Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
            }
            "mutation.homopolymer-residue" => {
                config
                    .mutation
                    .get_or_insert_with(Default::default)
                    .homopolymer_residue = Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

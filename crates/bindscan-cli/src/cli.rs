use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "BindScan Developers",
    version,
    about = "BindScan CLI - Resolve structure-database entries into binding-site sequences and control mutants.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log more detail: -v shows progress notes, -vv adds debugging, -vvv traces every step
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Mirror log records (with thread ids) into this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to resolve entries in parallel.
    /// Uses every logical core when omitted.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download entry query results from the RCSB GraphQL service.
    Fetch(FetchArgs),
    /// Resolve downloaded entries into entities, binding sites and mutants.
    Resolve(ResolveArgs),
}

/// Arguments for the `fetch` subcommand.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Request list in CSV format with a `pdb_id` column.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub ids: PathBuf,

    /// Path for the downloaded documents file (JSON).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// GraphQL endpoint to query.
    #[arg(long, value_name = "URL", default_value = crate::client::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Maximum number of requests in flight at once.
    #[arg(long, value_name = "NUM", default_value_t = 8)]
    pub concurrency: usize,
}

/// Arguments for the `resolve` subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    // --- Core Arguments ---
    /// Request list in CSV format (`pdb_id`, optional `ligand` and `reference_sequence`).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub ids: PathBuf,

    /// Documents file written by `fetch`.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub documents: PathBuf,

    /// Path for the resolution report (JSON).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Matching Overrides ---
    /// Entity selection method: rcsb_id, ligand, first, similarity-max or similarity-min.
    #[arg(short = 'm', long, value_name = "METHOD")]
    pub search_method: Option<String>,

    /// Entity number used by the `rcsb_id` method.
    #[arg(short = 'e', long, value_name = "ID")]
    pub entity_id: Option<String>,

    /// Treat ambiguous lists in result documents as errors.
    #[arg(long)]
    pub strict: bool,

    // --- Extraction Overrides ---
    /// Keep cofactors without a binding-assay value.
    #[arg(long)]
    pub keep_affinity_nulls: bool,

    // --- Mutation Overrides ---
    /// Generate control mutants at the binding site.
    #[arg(long)]
    pub auto_mutate: bool,

    /// Seed for the random decoy sequence.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Residue used for the homopolymer control (one- or three-letter code).
    #[arg(long, value_name = "RESIDUE")]
    pub homopolymer: Option<String>,

    /// Override one configuration key from the file, e.g. `matching.strict-paths=true`.
    /// Repeatable.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

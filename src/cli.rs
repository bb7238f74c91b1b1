//! CLI module - Command-line interface definitions and handlers

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing::warn;

use crate::cache::config::{StoreConfig, EVICT_BATCH, MAX_ENTRIES};
use crate::cache::doctor::check_store;
use crate::cache::entry::Payload;
use crate::cache::fingerprint::compute_fingerprint;
use crate::cache::store::CacheStore;
use crate::core::paths::{normalize_path, resolve_store_path};
use crate::core::render::{OutputFormat, Renderer};
use crate::core::usage_log::{append_usage, UsageRecord};
use crate::lookup::packages::{sync_environment, FreezeList, PackageEnumerator};

/// doccache - inspect and maintain the local documentation cache.
#[derive(Parser, Debug)]
#[command(name = "doccache")]
#[command(
    author,
    version,
    about,
    long_about = r#"doccache manages the JSON document that caches documentation lookups.

Every command prints a structured report in the selected format (default: json).
A missing or corrupt cache file is never an error: it is treated as an empty cache.

Examples:
    doccache stats
    doccache refresh --from requirements.lock
    pip freeze | doccache refresh --from -
    doccache get json.dumps
    doccache put mypkg.func --text "Help on function func" --package mypkg --package-version 1.0
    doccache evict --count 20
    doccache clear
"#
)]
pub struct Cli {
    /// Root directory for all operations.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory for all operations (defaults to the current directory).\n\n\
The default cache file is ROOT/.doccache/docs_index.json."
    )]
    pub root: PathBuf,

    /// Path to the cache file.
    #[arg(
        long,
        global = true,
        env = "DOCCACHE_PATH",
        value_name = "FILE",
        long_help = "Path to the cache file. Relative paths are resolved against ROOT.\n\n\
Defaults to ROOT/.doccache/docs_index.json."
    )]
    pub path: Option<PathBuf>,

    /// Maximum number of cached entries.
    #[arg(
        long,
        global = true,
        env = "DOCCACHE_MAX_ENTRIES",
        default_value_t = MAX_ENTRIES,
        value_name = "N",
        long_help = "Maximum number of cached entries. Inserting into a full cache first evicts\n\
the least frequently used entries."
    )]
    pub max_entries: usize,

    /// Entries removed per automatic eviction.
    #[arg(
        long,
        global = true,
        env = "DOCCACHE_EVICT_BATCH",
        default_value_t = EVICT_BATCH,
        value_name = "N"
    )]
    pub evict_batch: usize,

    /// Output format (json/jsonl/md).
    #[arg(
        long,
        global = true,
        default_value = "json",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- json (default, pretty-printed)\n\
- jsonl (compact, one object per line)\n\
- md (markdown)"
    )]
    pub format: String,

    /// Append a JSON line per invocation to this file.
    #[arg(
        long,
        global = true,
        env = "DOCCACHE_USAGE_LOG",
        value_name = "FILE",
        long_help = "Append one JSON line per invocation (timestamp, command, args and a\n\
preview of the output) to FILE. Failures to write the log never fail the command."
    )]
    pub usage_log: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug diagnostics on stderr. RUST_LOG overrides this."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print cache statistics.
    Stats,

    /// Reset the cache to an empty state.
    #[command(
        long_about = "Replace the cache with an empty one and write it immediately.\n\
Entries, registered packages, the environment fingerprint and counters are all reset."
    )]
    Clear,

    /// Register the current package set.
    #[command(
        long_about = r#"Read a package list and register it as the current environment.

If the package fingerprint changed, every cached entry is dropped.

The list is either a JSON array of [name, version] pairs or freeze-style lines
(name==version). Use "-" to read from stdin.

Examples:
    doccache refresh --from requirements.lock
    pip freeze | doccache refresh --from -
"#
    )]
    Refresh {
        /// Package list file, or - for stdin.
        #[arg(long, value_name = "FILE")]
        from: PathBuf,
    },

    /// Check whether a package list differs from the registered environment.
    Stale {
        /// Package list file, or - for stdin.
        #[arg(long, value_name = "FILE")]
        from: PathBuf,
    },

    /// Look up a cached entry (counts as a hit or miss).
    Get {
        /// Lookup name, e.g. json.dumps
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Store documentation for a name.
    Put {
        /// Lookup name, e.g. json.dumps
        #[arg(value_name = "NAME")]
        name: String,

        /// Raw documentation text.
        #[arg(long, value_name = "TEXT", conflicts_with = "json", required_unless_present = "json")]
        text: Option<String>,

        /// Structured documentation as a JSON object.
        #[arg(long, value_name = "OBJECT")]
        json: Option<String>,

        /// Owning package.
        #[arg(long, value_name = "NAME")]
        package: Option<String>,

        /// Owning package version.
        #[arg(long, value_name = "VERSION", requires = "package")]
        package_version: Option<String>,
    },

    /// Remove the least frequently used entries.
    Evict {
        /// Number of entries to remove.
        #[arg(long, default_value_t = EVICT_BATCH, value_name = "N")]
        count: usize,
    },

    /// Check the health of the cache file without modifying it.
    Doctor,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Stats => "stats",
            Commands::Clear => "clear",
            Commands::Refresh { .. } => "refresh",
            Commands::Stale { .. } => "stale",
            Commands::Get { .. } => "get",
            Commands::Put { .. } => "put",
            Commands::Evict { .. } => "evict",
            Commands::Doctor => "doctor",
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let renderer = Renderer::new(format);

    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or(cli.root);
    let config = StoreConfig::new(resolve_store_path(&root, cli.path.as_deref()))
        .with_max_entries(cli.max_entries)
        .with_evict_batch(cli.evict_batch);

    let command_name = cli.command.name();
    let output = execute(cli.command, config, &renderer, format)?;
    println!("{}", output);

    if let Some(log_path) = &cli.usage_log {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let record = UsageRecord::new(command_name, args, &output);
        if let Err(e) = append_usage(log_path, &record) {
            warn!(error = %e, "failed to write usage log");
        }
    }

    Ok(())
}

fn execute(
    command: Commands,
    config: StoreConfig,
    renderer: &Renderer,
    format: OutputFormat,
) -> Result<String> {
    let path = normalize_path(&config.path);
    let mut store = CacheStore::with_config(config);

    let report = match command {
        Commands::Stats => serde_json::to_value(store.stats())?,

        Commands::Clear => {
            store.clear().context("Failed to clear cache")?;
            json!({ "cleared": true, "path": path })
        }

        Commands::Refresh { from } => {
            let report = sync_environment(&mut store, &FreezeList::from_path(&from))?;
            serde_json::to_value(report)?
        }

        Commands::Stale { from } => {
            let packages = FreezeList::from_path(&from)
                .packages()
                .context("Failed to enumerate packages")?;
            json!({
                "stale": store.is_stale(&packages),
                "stored": store.fingerprint(),
                "current": compute_fingerprint(&packages),
            })
        }

        Commands::Get { name } => {
            let payload = store.get(&name);
            // Persist the hit/miss counters
            store.save().context("Failed to save cache")?;
            json!({
                "name": name,
                "found": payload.is_some(),
                "structured": payload.as_ref().map(Payload::is_structured),
                "content": payload.as_ref().map(Payload::to_value),
            })
        }

        Commands::Put {
            name,
            text,
            json,
            package,
            package_version,
        } => {
            let payload = match (text, json) {
                (Some(text), _) => Payload::Raw(text),
                (None, Some(raw)) => {
                    let value: serde_json::Value =
                        serde_json::from_str(&raw).context("--json is not valid JSON")?;
                    let payload = Payload::try_from(value)?;
                    if !payload.is_structured() {
                        bail!("--json expects a JSON object");
                    }
                    payload
                }
                (None, None) => bail!("either --text or --json is required"),
            };

            let structured = payload.is_structured();
            store.put(&name, payload, package.as_deref(), package_version.as_deref());
            store.save().context("Failed to save cache")?;
            json!({
                "name": name,
                "structured": structured,
                "package": package,
                "version": package_version,
                "entry_count": store.stats().entry_count,
            })
        }

        Commands::Evict { count } => {
            let evicted = store.evict(count);
            store.save().context("Failed to save cache")?;
            json!({
                "requested": count,
                "evicted": evicted,
                "entry_count": store.stats().entry_count,
            })
        }

        Commands::Doctor => {
            // Inspects the file directly; the store itself is never loaded
            let checks = check_store(store.config());
            return Ok(match format {
                OutputFormat::Markdown => checks
                    .iter()
                    .map(|c| c.summary_line())
                    .collect::<Vec<_>>()
                    .join("\n"),
                _ => renderer.render(&checks),
            });
        }
    };

    Ok(renderer.render(&report))
}

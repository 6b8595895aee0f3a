mod cli;
mod config;
mod error;
mod logging;
mod presenter;

use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use layout_search_client::deduplication::{DeduplicationConfig, LayoutDeduplicator};
use layout_search_client::{
    selection, FailurePolicy, LayoutClient, LayoutProvider, LayoutRecord, LayoutStore,
};
use std::path::Path;
use std::process::ExitCode;

/// Everything a single listing needs from the command line and config.
#[derive(Debug, Clone)]
struct Query {
    tags: Vec<String>,
    offset: usize,
    limit: usize,
    redupe: bool,
    policy: FailurePolicy,
}

impl Query {
    fn new(args: &Args, config: &Config) -> Self {
        Self {
            tags: args.tag_list(),
            offset: args.offset,
            limit: args.limit.unwrap_or(config.limit()),
            redupe: args.redupe,
            policy: if args.keep_going {
                FailurePolicy::Skip
            } else {
                FailurePolicy::Abort
            },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = logging::init(args.debug) {
        eprintln!("g80-layouts: could not initialize logging: {}", err);
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("g80-layouts: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let config = Config::load(args.config.as_deref())?;
    let cache_path = if args.no_cache || !config.cache_enabled() {
        None
    } else {
        Some(config.resolve_cache_path()?)
    };

    let mut store = match &cache_path {
        Some(path) => LayoutStore::load(path)?,
        None => LayoutStore::new(),
    };
    let client = LayoutClient::with_base_url(config.base_url())?;
    let query = Query::new(&args, &config);

    let outcome = list_layouts(&client, &mut store, &query).await;
    if let Ok(records) = &outcome {
        presenter::print(records);
    }
    // Saved even when the listing failed, so nothing fetched so far is lost
    if let Some(path) = &cache_path {
        persist(&store, path);
    }

    outcome.map(|_| ()).map_err(CliError::from)
}

async fn list_layouts<P: LayoutProvider>(
    client: &LayoutClient<P>,
    store: &mut LayoutStore,
    query: &Query,
) -> layout_search_client::Result<Vec<LayoutRecord>> {
    let ids = client.search(&query.tags).await?;
    let wanted = selection::window(&ids, query.offset, query.limit);
    log::debug!(
        "Showing {} of {} layouts (offset {}, limit {})",
        wanted.len(),
        ids.len(),
        query.offset,
        query.limit
    );

    let records = client.resolve_all(store, wanted, query.policy).await?;
    let deduplicator = LayoutDeduplicator::new(DeduplicationConfig::from_redupe(query.redupe));
    Ok(deduplicator.filter(records))
}

fn persist(store: &LayoutStore, path: &Path) {
    if let Err(err) = store.save(path) {
        log::warn!("Could not save layout cache: {}", err);
    } else {
        log::debug!("Layout cache holds {} layouts", store.stats().total_entries);
    }
}

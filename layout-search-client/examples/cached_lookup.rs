use layout_search_client::{deduplication, selection, FailurePolicy, LayoutClient, LayoutStore};
use std::time::Instant;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let cache_path = std::env::temp_dir().join("g80-layouts-example-cache.json");
    let mut store = LayoutStore::load(&cache_path)?;
    println!("Cache at {} holds {} layouts", cache_path.display(), store.len());

    let client = LayoutClient::new()?;
    let ids = client.search(&["colemak".to_string()]).await?;
    let wanted = selection::window(&ids, 0, 5);

    let start = Instant::now();
    let records = client.resolve_all(&mut store, wanted, FailurePolicy::Skip).await?;
    println!("First pass took: {:?}", start.elapsed());

    let start = Instant::now();
    client.resolve_all(&mut store, wanted, FailurePolicy::Skip).await?;
    println!("Cached pass took: {:?}", start.elapsed());

    for record in deduplication::filter(records, false) {
        println!("{} by {}", record.title(), record.creator());
    }

    store.save(&cache_path)?;
    println!("Cache stats: {:?}", store.stats());
    Ok(())
}

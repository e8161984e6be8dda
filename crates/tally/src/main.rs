use std::sync::Arc;

use tally_core::{bot::ActivityBot, config::Config, ports::TableStore};
use tally_supabase::SupabaseStore;

#[tokio::main]
async fn main() -> Result<(), tally_core::Error> {
    tally_core::logging::init("tally")?;

    let cfg = match Config::load() {
        Ok(cfg) => Arc::new(cfg),
        Err(tally_core::Error::Config(msg)) => {
            eprintln!("Error: {msg}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if cfg.supabase_url.is_empty() {
        tracing::warn!("SUPABASE_URL is not set; activity lookups and counting will fail");
    }

    let store: Arc<dyn TableStore> = Arc::new(SupabaseStore::new(
        cfg.supabase_url.clone(),
        cfg.supabase_key.clone(),
        cfg.activity_table.clone(),
        cfg.store_timeout,
    )?);
    let bot = Arc::new(ActivityBot::new(&cfg, store));

    tally_discord::router::run(cfg, bot)
        .await
        .map_err(|e| tally_core::Error::Discord(format!("discord bot failed: {e:#}")))?;

    Ok(())
}

use anyhow::Context;
use dictionary_seeds::config::{AppConfig, StoreBackend};
use dictionary_seeds::seed::{apply_seeds, dictionary_seeds, StoreSeedTracker};
use dictionary_seeds::store::{DocumentStore, MemoryStore, PostgresStore};
use log::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with explicit filter to suppress sqlx debug logs
    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("sqlx", LevelFilter::Warn)
        .parse_default_env()
        .init();

    let config = AppConfig::load()?;
    info!(
        "Configuration loaded: application={}, backend={:?}",
        config.application, config.store.backend
    );

    if !config.seed.enabled {
        info!("Seeding disabled, nothing to do");
        return Ok(());
    }

    match config.store.backend {
        StoreBackend::Postgres => {
            info!("Connecting to PostgreSQL...");
            let store = PostgresStore::new(&config.database_url(), config.max_connections())
                .await
                .context("failed to connect to PostgreSQL")?;
            store.migrate().await.context("failed to run store migrations")?;
            run_seeds(&store, &config).await
        }
        StoreBackend::Memory => {
            info!("Using in-memory store; seeded data is discarded on exit");
            let store = MemoryStore::new();
            run_seeds(&store, &config).await
        }
    }
}

async fn run_seeds<S: DocumentStore>(store: &S, config: &AppConfig) -> anyhow::Result<()> {
    let tracker = StoreSeedTracker::new(store);
    let seeds = dictionary_seeds(config.seed.missing_parent);

    match apply_seeds(store, &tracker, &seeds, &config.application).await {
        Ok(summary) => {
            info!(
                "Seeding complete: {} applied, {} already applied",
                summary.applied.len(),
                summary.skipped.len()
            );
            Ok(())
        }
        Err(err) => {
            error!("Seeding stopped at unit {}: {}", err.unit_id(), err);
            Err(err.into())
        }
    }
}

use std::sync::Arc;

use clap::Parser;

use todo_ai::banner::{BannerInfo, print_banner};
use todo_ai::config::{Config, StoreBackend};
use todo_ai::generator::Generator;
use todo_ai::generator::gemini::GeminiGenerator;
use todo_ai::intent::resolver::IntentResolver;
use todo_ai::server::{self, AppState};
use todo_ai::service::TodoService;
use todo_ai::store::Store;
use todo_ai::store::rest::RestStore;
use todo_ai::store::sqlite::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    // Wire up the store based on what's configured
    let store: Arc<dyn Store> = match config.store_backend()? {
        StoreBackend::Rest { url, key, table } => Arc::new(RestStore::new(&url, &key, &table)),
        StoreBackend::Sqlite { path } => Arc::new(SqliteStore::open(&path)?),
    };
    let todos = TodoService::new(store);

    let resolver = match config.gemini_key() {
        Some(key) => {
            let generator: Arc<dyn Generator> = Arc::new(
                GeminiGenerator::new(key.to_string(), Some(config.model.clone()))
                    .with_base_url(&config.gemini_base_url),
            );
            Some(IntentResolver::new(generator, todos.clone()))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set; /ai will answer with an upstream error");
            None
        }
    };

    let store_label = todos.describe();
    print_banner(&BannerInfo {
        addr: config.addr(),
        store: &store_label,
        model: resolver.as_ref().map(|r| r.model()),
    });

    let state = Arc::new(AppState { todos, resolver });
    server::serve(config.addr(), state).await
}

use chrono::Local;
use std::env;
use trendseed_core::{CoreError, ErrorReporter, KeywordConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "trendseed=info,keyword_engine=info,llm_interface=info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CoreError> {
    let env_file = dotenvy::dotenv().ok();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting trendseed keyword generator");
    if let Some(path) = env_file {
        tracing::info!("Loaded environment from {}", path.display());
    }

    let config_path = KeywordConfig::path_from_env();
    let today = Local::now().date_naive();

    keyword_engine::run_configured(config_path.as_deref(), |name| env::var(name).ok(), today)
        .await
        .map(|result| {
            tracing::info!("Generated {} keywords", result.len());
        })
        .map_err(|e| {
            ErrorReporter::new().report_error(&e);
            e
        })
}

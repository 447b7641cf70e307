use chrono::NaiveDate;
use llm_interface::{LlmProvider, Provider};
use std::path::Path;
use tracing::{error, info};
use trendseed_core::{CoreError, Credentials, ErrorReporter, KeywordConfig, KeywordResult};

use crate::normalize::extract_keywords;
use crate::prompt::build_prompt;
use crate::writer::write_result;

/// Prompt, call and normalize. Nothing is written here.
pub async fn generate_keywords<P: LlmProvider>(
    config: &KeywordConfig,
    provider: &P,
    date: NaiveDate,
) -> Result<Vec<String>, CoreError> {
    let prompt = build_prompt(config, date);
    info!(
        "Requesting {} trending keywords from {}",
        config.keyword_count,
        provider.name()
    );

    let raw = provider.generate(&prompt).await?;
    let keywords = extract_keywords(&raw)?;
    info!("{} returned {} keywords", provider.name(), keywords.len());
    Ok(keywords)
}

/// Loads the configuration, reads credentials through `lookup` and runs.
///
/// A configuration failure still replaces the output file with an error
/// entry, written to [`KeywordConfig::fallback_output_path`].
pub async fn run_configured<F>(
    config_path: Option<&Path>,
    lookup: F,
    date: NaiveDate,
) -> Result<KeywordResult, CoreError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match KeywordConfig::load_from(config_path) {
        Ok(config) => config,
        Err(e) => {
            let path = KeywordConfig::fallback_output_path(config_path);
            record_failure(&path, &e);
            return Err(e);
        }
    };

    let credentials = Credentials::from_lookup(&config, lookup);
    run(&config, &credentials, date).await
}

/// One full run: select a provider from `credentials`, generate, and write
/// the output file exactly once.
///
/// On failure the file holds a single error entry and the original error is
/// returned.
pub async fn run(
    config: &KeywordConfig,
    credentials: &Credentials,
    date: NaiveDate,
) -> Result<KeywordResult, CoreError> {
    let outcome = match Provider::from_config(config, credentials) {
        Ok(provider) => generate_keywords(config, &provider, date).await,
        Err(e) => Err(e),
    };
    finish(config, outcome)
}

/// Same as [`run`] with an already chosen provider.
pub async fn run_with_provider<P: LlmProvider>(
    config: &KeywordConfig,
    provider: &P,
    date: NaiveDate,
) -> Result<KeywordResult, CoreError> {
    let outcome = generate_keywords(config, provider, date).await;
    finish(config, outcome)
}

fn finish(
    config: &KeywordConfig,
    outcome: Result<Vec<String>, CoreError>,
) -> Result<KeywordResult, CoreError> {
    let path = &config.output_path;
    let outcome = outcome.and_then(|keywords| {
        let result = KeywordResult::new(keywords);
        write_result(path, &result)?;
        Ok(result)
    });

    match outcome {
        Ok(result) => {
            info!("Saved {} keywords to '{}'", result.len(), path.display());
            Ok(result)
        }
        Err(e) => {
            record_failure(path, &e);
            Err(e)
        }
    }
}

/// Replaces the output with the error entry. A failed write is only reported,
/// the caller still returns `error`.
fn record_failure(path: &Path, error: &CoreError) {
    error!("Keyword generation failed: {}", error);
    if let Err(write_err) = write_result(path, &KeywordResult::from_error(error)) {
        error!("Could not write error entry to '{}'", path.display());
        ErrorReporter::new().report_warning(&write_err);
    }
}

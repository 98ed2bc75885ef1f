//! Command handlers. Output goes to stdout; logs go to stderr.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use sitesmith_core::{load_catalog, AppConfig, Catalog, RawExtractionInput};
use sitesmith_generator::{AnthropicClient, FileArtifactStore, GenerationOrchestrator};
use sitesmith_profile::build_brand_profile;

/// Read and validate a request file.
pub(crate) fn load_request(path: &Path) -> anyhow::Result<RawExtractionInput> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request file {}", path.display()))?;
    parse_request(&raw).with_context(|| format!("invalid request file {}", path.display()))
}

pub(crate) fn parse_request(raw: &str) -> anyhow::Result<RawExtractionInput> {
    let input: RawExtractionInput = serde_yaml::from_str(raw)?;
    if input.business_name.trim().is_empty() {
        anyhow::bail!("business_name must not be empty");
    }
    if input.category.trim().is_empty() {
        anyhow::bail!("category must not be empty");
    }
    Ok(input)
}

/// The catalog named by `SITESMITH_CATALOG_PATH`, or the embedded one.
pub(crate) fn catalog_for(config: &AppConfig) -> anyhow::Result<Catalog> {
    match &config.catalog_path {
        Some(path) => Ok(load_catalog(path)?),
        None => Ok(Catalog::builtin()),
    }
}

/// Print the fused brand profile for the request at `input`.
///
/// # Errors
///
/// Returns an error if the request or catalog cannot be loaded, or a signal
/// source client cannot be constructed.
pub(crate) async fn run_profile(config: &AppConfig, input: &Path) -> anyhow::Result<()> {
    let request = load_request(input)?;
    let catalog = catalog_for(config)?;

    let profile = build_brand_profile(config, &catalog, &request).await?;
    for (family, source) in profile.provenance() {
        tracing::info!(family, %source, "resolved");
    }

    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

/// Build the profile, run the generation pipeline and save the artifact.
///
/// # Errors
///
/// Returns an error if the generation credential is missing, the request or
/// catalog cannot be loaded, or the artifact stage fails. A failed save is
/// reported but does not fail the command.
pub(crate) async fn run_generate(
    config: &AppConfig,
    input: &Path,
    out_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let client = AnthropicClient::from_config(config)?;
    let request = load_request(input)?;
    let catalog = catalog_for(config)?;

    let profile = build_brand_profile(config, &catalog, &request).await?;
    let orchestrator =
        GenerationOrchestrator::new(Arc::new(client), config.generation_model.clone());
    let store = FileArtifactStore::new(out_dir.unwrap_or_else(|| config.output_dir.clone()));

    let artifact = orchestrator
        .generate_and_persist(&profile, &store)
        .await
        .context("generation failed")?;

    if artifact.persisted {
        println!(
            "generated {} in {} ms -> {}",
            artifact.slug,
            artifact.elapsed_ms,
            store.artifact_dir(&artifact.slug).display()
        );
    } else {
        println!(
            "generated {} in {} ms (not saved; see log)",
            artifact.slug, artifact.elapsed_ms
        );
    }
    Ok(())
}

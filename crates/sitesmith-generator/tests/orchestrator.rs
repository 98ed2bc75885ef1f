//! Pipeline tests against a scripted in-memory generator.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sitesmith_core::{BrandProfile, Catalog, GenerationArtifact, RawExtractionInput};
use sitesmith_generator::{
    ArtifactStore, FileArtifactStore, GenerationOrchestrator, GenerationRequest,
    GenerationResponse, GeneratorError, StoreError, TextGenerator,
};
use sitesmith_profile::{fuse_brand_profile, ExtractedSignals};

/// Replies with scripted responses in order and records every request.
struct ScriptedGenerator {
    replies: Mutex<Vec<Result<GenerationResponse, GeneratorError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    fn new(replies: Vec<Result<GenerationResponse, GeneratorError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().rev().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("lock")
            .iter()
            .map(|r| r.prompt.clone())
            .collect()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GeneratorError> {
        self.requests.lock().expect("lock").push(request.clone());
        self.replies
            .lock()
            .expect("lock")
            .pop()
            .unwrap_or_else(|| Ok(GenerationResponse::default()))
    }
}

struct FailingStore;

#[async_trait]
impl ArtifactStore for FailingStore {
    async fn save(&self, slug: &str, _artifact: &GenerationArtifact) -> Result<(), StoreError> {
        Err(StoreError::InvalidSlug(slug.to_string()))
    }
}

const DOCUMENT: &str = "<!DOCTYPE html><html><body>Acme</body></html>";

fn profile() -> BrandProfile {
    let input = RawExtractionInput {
        business_name: "Acme Plumbing".to_string(),
        category: "plumber".to_string(),
        location: Some("Richmond".to_string()),
        ..RawExtractionInput::default()
    };
    fuse_brand_profile(&input, &ExtractedSignals::default(), &Catalog::builtin())
}

fn orchestrator(generator: &Arc<ScriptedGenerator>) -> GenerationOrchestrator {
    GenerationOrchestrator::new(generator.clone(), "test-model")
}

#[tokio::test]
async fn each_prompt_carries_the_previous_output() {
    let generator = ScriptedGenerator::new(vec![
        Ok(GenerationResponse::from_text("RESEARCH-NOTES-7f3")),
        Ok(GenerationResponse::from_text("BRIEF-TEXT-91c")),
        Ok(GenerationResponse::from_text(format!("Sure!\n```html\n{DOCUMENT}\n```"))),
    ]);

    let artifact = orchestrator(&generator)
        .generate(&profile())
        .await
        .expect("pipeline should succeed");

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[0].contains("Acme Plumbing"));
    assert!(prompts[1].contains("RESEARCH-NOTES-7f3"));
    assert!(prompts[2].contains("BRIEF-TEXT-91c"));
    assert!(!prompts[2].contains("RESEARCH-NOTES-7f3"));

    assert_eq!(artifact.research, "RESEARCH-NOTES-7f3");
    assert_eq!(artifact.brief, "BRIEF-TEXT-91c");
    assert_eq!(artifact.document, DOCUMENT);
    assert_eq!(artifact.slug, "acme-plumbing");
    assert_eq!(artifact.model, "test-model");
    assert!(!artifact.persisted);
}

#[tokio::test]
async fn every_stage_uses_the_configured_model() {
    let generator = ScriptedGenerator::new(vec![
        Ok(GenerationResponse::from_text("r")),
        Ok(GenerationResponse::from_text("b")),
        Ok(GenerationResponse::from_text(DOCUMENT)),
    ]);
    orchestrator(&generator)
        .generate(&profile())
        .await
        .expect("pipeline should succeed");

    let requests = generator.requests.lock().expect("lock");
    assert!(requests.iter().all(|r| r.model == "test-model"));
    assert!(requests[2].max_tokens > requests[0].max_tokens);
}

#[tokio::test]
async fn advisory_failures_degrade_to_empty_strings() {
    let generator = ScriptedGenerator::new(vec![
        Err(GeneratorError::EmptyArtifact),
        Ok(GenerationResponse::default()),
        Ok(GenerationResponse::from_text(DOCUMENT)),
    ]);

    let artifact = orchestrator(&generator)
        .generate(&profile())
        .await
        .expect("advisory failures are not fatal");

    assert_eq!(artifact.research, "");
    assert_eq!(artifact.brief, "");
    assert_eq!(artifact.document, DOCUMENT);
    let prompts = generator.prompts();
    assert!(prompts[1].contains("No research notes are available"));
    assert!(prompts[2].contains("No design brief is available"));
}

#[tokio::test]
async fn artifact_without_text_is_fatal() {
    let generator = ScriptedGenerator::new(vec![
        Ok(GenerationResponse::from_text("r")),
        Ok(GenerationResponse::from_text("b")),
        Ok(GenerationResponse::default()),
    ]);

    let err = orchestrator(&generator)
        .generate(&profile())
        .await
        .unwrap_err();
    assert!(matches!(err, GeneratorError::NoTextBlock { stage: "artifact" }));
}

#[tokio::test]
async fn persists_to_the_file_store() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileArtifactStore::new(dir.path());
    let generator = ScriptedGenerator::new(vec![
        Ok(GenerationResponse::from_text("r")),
        Ok(GenerationResponse::from_text("b")),
        Ok(GenerationResponse::from_text(DOCUMENT)),
    ]);

    let artifact = orchestrator(&generator)
        .generate_and_persist(&profile(), &store)
        .await
        .expect("pipeline should succeed");

    assert!(artifact.persisted);
    let site_dir = dir.path().join("acme-plumbing");
    let html = std::fs::read_to_string(site_dir.join("index.html")).expect("index.html");
    assert_eq!(html, DOCUMENT);
    let json = std::fs::read_to_string(site_dir.join("artifact.json")).expect("artifact.json");
    let saved: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(saved["slug"], "acme-plumbing");
    assert_eq!(saved["id"], artifact.id.to_string());
    assert_eq!(saved["persisted"], true);
}

#[tokio::test]
async fn failed_save_is_reported_not_raised() {
    let generator = ScriptedGenerator::new(vec![
        Ok(GenerationResponse::from_text("r")),
        Ok(GenerationResponse::from_text("b")),
        Ok(GenerationResponse::from_text(DOCUMENT)),
    ]);

    let artifact = orchestrator(&generator)
        .generate_and_persist(&profile(), &FailingStore)
        .await
        .expect("persistence failures are not fatal");

    assert!(!artifact.persisted);
    assert_eq!(artifact.document, DOCUMENT);
}

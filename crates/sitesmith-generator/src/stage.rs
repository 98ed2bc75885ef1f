//! Typed generation stages and the runner that chains them.
//!
//! A stage owns its prompt and decides what a response (or a failed call)
//! means for its output. Advisory stages absorb failures into an empty string;
//! the artifact stage turns them into errors.

use std::time::Instant;

use sitesmith_core::BrandProfile;

use crate::clean::clean_document;
use crate::client::{GenerationRequest, GenerationResponse, TextGenerator};
use crate::error::GeneratorError;
use crate::prompts::{artifact_prompt, brief_prompt, research_prompt};

pub const RESEARCH_MAX_TOKENS: u32 = 2_000;
pub const BRIEF_MAX_TOKENS: u32 = 4_000;
pub const ARTIFACT_MAX_TOKENS: u32 = 16_000;

pub trait Stage {
    type Output;

    fn name(&self) -> &'static str;

    fn max_tokens(&self) -> u32;

    fn prompt(&self) -> String;

    /// Interpret the outcome of the generation call.
    ///
    /// # Errors
    ///
    /// Stages that cannot continue without output return the failure.
    fn finish(
        &self,
        outcome: Result<GenerationResponse, GeneratorError>,
    ) -> Result<Self::Output, GeneratorError>;
}

/// First text block of an advisory stage, or an empty string.
fn advisory_text(
    stage: &'static str,
    outcome: Result<GenerationResponse, GeneratorError>,
) -> String {
    match outcome {
        Ok(response) => match response.first_text() {
            Some(text) => text.trim().to_string(),
            None => {
                tracing::warn!(stage, "response had no text block; continuing without it");
                String::new()
            }
        },
        Err(e) => {
            tracing::warn!(stage, error = %e, "stage failed; continuing without it");
            String::new()
        }
    }
}

pub struct ResearchStage<'a> {
    pub profile: &'a BrandProfile,
}

impl Stage for ResearchStage<'_> {
    type Output = String;

    fn name(&self) -> &'static str {
        "research"
    }

    fn max_tokens(&self) -> u32 {
        RESEARCH_MAX_TOKENS
    }

    fn prompt(&self) -> String {
        research_prompt(self.profile)
    }

    fn finish(
        &self,
        outcome: Result<GenerationResponse, GeneratorError>,
    ) -> Result<String, GeneratorError> {
        Ok(advisory_text(self.name(), outcome))
    }
}

pub struct BriefStage<'a> {
    pub profile: &'a BrandProfile,
    pub research: &'a str,
}

impl Stage for BriefStage<'_> {
    type Output = String;

    fn name(&self) -> &'static str {
        "brief"
    }

    fn max_tokens(&self) -> u32 {
        BRIEF_MAX_TOKENS
    }

    fn prompt(&self) -> String {
        brief_prompt(self.profile, self.research)
    }

    fn finish(
        &self,
        outcome: Result<GenerationResponse, GeneratorError>,
    ) -> Result<String, GeneratorError> {
        Ok(advisory_text(self.name(), outcome))
    }
}

pub struct ArtifactStage<'a> {
    pub profile: &'a BrandProfile,
    pub brief: &'a str,
}

impl Stage for ArtifactStage<'_> {
    type Output = String;

    fn name(&self) -> &'static str {
        "artifact"
    }

    fn max_tokens(&self) -> u32 {
        ARTIFACT_MAX_TOKENS
    }

    fn prompt(&self) -> String {
        artifact_prompt(self.profile, self.brief)
    }

    fn finish(
        &self,
        outcome: Result<GenerationResponse, GeneratorError>,
    ) -> Result<String, GeneratorError> {
        let response = outcome?;
        let raw = response.first_text().ok_or(GeneratorError::NoTextBlock {
            stage: self.name(),
        })?;
        let document = clean_document(raw);
        if document.is_empty() {
            return Err(GeneratorError::EmptyArtifact);
        }
        Ok(document)
    }
}

/// Runs stages one at a time against a single generator and model.
pub struct StageRunner<'a> {
    generator: &'a dyn TextGenerator,
    model: &'a str,
}

impl<'a> StageRunner<'a> {
    #[must_use]
    pub fn new(generator: &'a dyn TextGenerator, model: &'a str) -> Self {
        Self { generator, model }
    }

    /// # Errors
    ///
    /// Returns whatever the stage's `finish` returns.
    pub async fn run<S: Stage>(&self, stage: &S) -> Result<S::Output, GeneratorError> {
        let request = GenerationRequest {
            model: self.model.to_string(),
            max_tokens: stage.max_tokens(),
            prompt: stage.prompt(),
        };
        let started = Instant::now();
        tracing::debug!(
            stage = stage.name(),
            generator = self.generator.name(),
            prompt_chars = request.prompt.len(),
            "stage started"
        );
        let outcome = self.generator.generate(&request).await;
        tracing::info!(
            stage = stage.name(),
            ok = outcome.is_ok(),
            elapsed_ms = %started.elapsed().as_millis(),
            "stage finished"
        );
        stage.finish(outcome)
    }
}

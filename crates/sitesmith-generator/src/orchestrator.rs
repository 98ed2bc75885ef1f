//! The research → brief → artifact pipeline.

use std::time::Instant;

use chrono::Utc;
use sitesmith_core::{BrandProfile, GenerationArtifact};
use uuid::Uuid;

use crate::client::SharedGenerator;
use crate::error::GeneratorError;
use crate::stage::{ArtifactStage, BriefStage, ResearchStage, StageRunner};
use crate::store::ArtifactStore;

pub struct GenerationOrchestrator {
    generator: SharedGenerator,
    model: String,
}

impl GenerationOrchestrator {
    pub fn new(generator: SharedGenerator, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run the three stages in order, each prompt carrying the previous
    /// stage's output. The returned artifact is not yet persisted.
    ///
    /// # Errors
    ///
    /// Only the artifact stage is fatal: a failed call, a response without a
    /// text block, or an empty cleaned document.
    pub async fn generate(
        &self,
        profile: &BrandProfile,
    ) -> Result<GenerationArtifact, GeneratorError> {
        let started = Instant::now();
        let runner = StageRunner::new(self.generator.as_ref(), &self.model);

        let research = runner.run(&ResearchStage { profile }).await?;
        let brief = runner
            .run(&BriefStage {
                profile,
                research: &research,
            })
            .await?;
        let document = match runner
            .run(&ArtifactStage {
                profile,
                brief: &brief,
            })
            .await
        {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(slug = %profile.slug, error = %e, "artifact generation failed");
                return Err(e);
            }
        };

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(
            slug = %profile.slug,
            research_chars = research.len(),
            brief_chars = brief.len(),
            document_chars = document.len(),
            elapsed_ms,
            "generation finished"
        );

        Ok(GenerationArtifact {
            id: Uuid::new_v4(),
            slug: profile.slug.clone(),
            model: self.model.clone(),
            research,
            brief,
            document,
            elapsed_ms,
            persisted: false,
            generated_at: Utc::now(),
        })
    }

    /// [`generate`](Self::generate), then hand the artifact to `store`.
    ///
    /// A failed save is logged and reported via `persisted = false`.
    ///
    /// # Errors
    ///
    /// See [`generate`](Self::generate); persistence never fails the run.
    pub async fn generate_and_persist(
        &self,
        profile: &BrandProfile,
        store: &dyn ArtifactStore,
    ) -> Result<GenerationArtifact, GeneratorError> {
        let mut artifact = self.generate(profile).await?;
        match store.save(&artifact.slug, &artifact).await {
            Ok(()) => artifact.persisted = true,
            Err(e) => {
                tracing::error!(slug = %artifact.slug, error = %e, "failed to persist artifact");
            }
        }
        Ok(artifact)
    }
}

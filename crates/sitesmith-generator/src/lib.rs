//! Website generation from a fused brand profile: a text-generation client,
//! typed prompt stages, the orchestrator that chains them, and artifact
//! persistence.

pub mod clean;
pub mod client;
pub mod error;
pub mod orchestrator;
pub mod prompts;
pub mod stage;
pub mod store;

pub use clean::clean_document;
pub use client::{
    AnthropicClient, ContentBlock, GenerationRequest, GenerationResponse, SharedGenerator,
    TextGenerator,
};
pub use error::{GeneratorError, StoreError};
pub use orchestrator::GenerationOrchestrator;
pub use prompts::{
    artifact_prompt, brief_prompt, business_context, provenance_phrase, research_prompt,
};
pub use stage::{ArtifactStage, BriefStage, ResearchStage, Stage, StageRunner};
pub use store::{ArtifactStore, FileArtifactStore};

#[cfg(test)]
pub(crate) mod test_support {
    use sitesmith_core::{BrandProfile, Catalog, RawExtractionInput, UserPreferences};
    use sitesmith_profile::{fuse_brand_profile, ExtractedSignals};

    pub(crate) fn plumber_profile() -> BrandProfile {
        let input = RawExtractionInput {
            business_name: "Acme Plumbing".to_string(),
            category: "plumber".to_string(),
            location: Some("Richmond".to_string()),
            preferences: UserPreferences {
                colors: vec!["#1e3a5f".to_string(), "#f59e0b".to_string()],
                ..UserPreferences::default()
            },
            ..RawExtractionInput::default()
        };
        fuse_brand_profile(&input, &ExtractedSignals::default(), &Catalog::builtin())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Output of one run of the research → brief → artifact pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationArtifact {
    pub id: Uuid,
    pub slug: String,
    pub model: String,
    /// Research phase output; empty when that phase degraded.
    pub research: String,
    /// Design brief; empty when that phase degraded.
    pub brief: String,
    /// Cleaned final document.
    pub document: String,
    pub elapsed_ms: u64,
    pub persisted: bool,
    pub generated_at: DateTime<Utc>,
}

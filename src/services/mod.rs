// Service exports
pub mod artifact;

pub use artifact::{default_artifact_path, load_model, ArtifactError};

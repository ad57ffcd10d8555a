use gbdt::gradient_boost::GBDT;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading the model artifact
///
/// All of these are fatal: the service must not start serving traffic
/// without a loaded model.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model artifact not found at {0}")]
    NotFound(PathBuf),

    #[error("cannot resolve service location: {0}")]
    ServiceLocation(#[from] std::io::Error),

    #[error("failed to deserialize model artifact {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

/// Default artifact location: a per-variant file co-located with the
/// service executable
pub fn default_artifact_path(file_name: &str) -> Result<PathBuf, ArtifactError> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(file_name))
}

/// Deserialize the pre-trained regression model from disk
pub fn load_model(path: &Path) -> Result<GBDT, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.to_path_buf()));
    }

    let path_str = path.to_string_lossy();
    GBDT::load_model(path_str.as_ref()).map_err(|e| ArtifactError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

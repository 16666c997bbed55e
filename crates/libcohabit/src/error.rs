#[derive(Debug, thiserror::Error)]
pub enum CohabitError {
  #[error("invalid configuration: {0}")]
  ConfigError(String),
  #[error("resource not found")]
  ResourceNotFound,
  #[error("could not load snapshot: {0}")]
  SnapshotError(String),
  #[error("not enough answers recognized ({got} of at least {min})")]
  InsufficientCoverage { got: usize, min: usize },
  #[error("scoring service error: {0}")]
  ScoringError(#[from] reqwest::Error),
  #[error(transparent)]
  OtherError(#[from] anyhow::Error),
}

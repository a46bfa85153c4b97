use thiserror::Error;
use uuid::Uuid;

use crate::application::repos::RepoError;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("post id `{0}` is malformed")]
    MalformedId(String),
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for PostError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound,
            other => Self::Repo(other),
        }
    }
}

impl PostError {
    /// True when the id did not resolve to a post, either because it was absent or unparseable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound | Self::MalformedId(_))
    }
}

/// Parse a path segment into a post id.
pub fn parse_post_id(raw: &str) -> Result<Uuid, PostError> {
    Uuid::parse_str(raw.trim()).map_err(|_| PostError::MalformedId(raw.to_string()))
}

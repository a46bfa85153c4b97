//! Domain entities mirrored from persistent storage.

use time::OffsetDateTime;
use uuid::Uuid;

/// A blog post as stored. `id` and `created` are assigned once and never rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub body: String,
    pub created: OffsetDateTime,
}

use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::entities::PostRecord;

pub(crate) const POST_COLUMNS: &str = "id, title, image, body, created";

#[derive(sqlx::FromRow)]
pub(crate) struct PostRow {
    pub(crate) id: Uuid,
    pub(crate) title: String,
    pub(crate) image: String,
    pub(crate) body: String,
    pub(crate) created: OffsetDateTime,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            image: row.image,
            body: row.body,
            created: row.created,
        }
    }
}

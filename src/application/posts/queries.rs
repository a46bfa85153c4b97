use uuid::Uuid;

use crate::domain::entities::PostRecord;

use super::commands::store_failure;
use super::service::PostService;
use super::types::PostError;

const LIST_EXCERPT_CHARS: usize = 100;

impl PostService {
    pub async fn list_all(&self) -> Result<Vec<PostRecord>, PostError> {
        self.reader
            .list_posts()
            .await
            .map_err(|err| store_failure("list", err))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<PostRecord, PostError> {
        self.reader
            .find_by_id(id)
            .await
            .map_err(|err| store_failure("find", err))?
            .ok_or(PostError::NotFound)
    }

    pub async fn health(&self) -> Result<(), PostError> {
        self.reader
            .ping()
            .await
            .map_err(|err| store_failure("ping", err))
    }

    /// Short sanitized preview of a post body for list views.
    pub fn excerpt(&self, post: &PostRecord) -> String {
        self.sanitizer.excerpt(&post.body, LIST_EXCERPT_CHARS)
    }
}

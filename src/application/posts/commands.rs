use metrics::counter;
use tracing::info;
use uuid::Uuid;

use crate::application::repos::{CreatePostParams, RepoError, UpdatePostParams};
use crate::domain::entities::PostRecord;
use crate::domain::posts::{PostContent, PostUpdate};

use super::service::PostService;
use super::types::PostError;

impl PostService {
    /// Store a new post; `created` is stamped by the store.
    pub async fn create(&self, content: PostContent) -> Result<PostRecord, PostError> {
        let content = self.sanitize(content);
        let params = CreatePostParams {
            title: content.title,
            image: content.image,
            body: content.body,
            created: None,
        };

        let post = self
            .writer
            .create_post(params)
            .await
            .map_err(|err| store_failure("create", err))?;

        counter!("postbox_posts_created_total").increment(1);
        info!(target = "postbox::posts", post_id = %post.id, "post created");
        Ok(post)
    }

    /// Overwrite the supplied fields of an existing post; omitted ones are kept.
    /// `id` and `created` are never written.
    pub async fn update_by_id(
        &self,
        id: Uuid,
        update: impl Into<PostUpdate>,
    ) -> Result<PostRecord, PostError> {
        let PostUpdate { title, image, body } = update.into();
        let params = UpdatePostParams {
            id,
            title,
            image,
            body: body.map(|body| self.sanitizer.clean(&body)),
        };

        let post = self
            .writer
            .update_post(params)
            .await
            .map_err(|err| store_failure("update", err))?;

        counter!("postbox_posts_updated_total").increment(1);
        info!(target = "postbox::posts", post_id = %post.id, "post updated");
        Ok(post)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<(), PostError> {
        self.writer
            .delete_post(id)
            .await
            .map_err(|err| store_failure("delete", err))?;

        counter!("postbox_posts_deleted_total").increment(1);
        info!(target = "postbox::posts", post_id = %id, "post deleted");
        Ok(())
    }

    fn sanitize(&self, content: PostContent) -> PostContent {
        let body = self.sanitizer.clean(&content.body);
        content.with_body(body)
    }
}

pub(super) fn store_failure(operation: &'static str, err: RepoError) -> PostError {
    if !matches!(err, RepoError::NotFound) {
        counter!("postbox_store_failures_total", "operation" => operation).increment(1);
    }
    PostError::from(err)
}

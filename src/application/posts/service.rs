use std::sync::Arc;

use crate::application::repos::{PostsRepo, PostsWriteRepo};
use crate::application::sanitize::BodySanitizer;

/// Entry point for the five post operations; owns the sanitizer so bodies are cleaned on every write path.
#[derive(Clone)]
pub struct PostService {
    pub(crate) reader: Arc<dyn PostsRepo>,
    pub(crate) writer: Arc<dyn PostsWriteRepo>,
    pub(crate) sanitizer: Arc<BodySanitizer>,
}

impl PostService {
    pub fn new(reader: Arc<dyn PostsRepo>, writer: Arc<dyn PostsWriteRepo>) -> Self {
        Self {
            reader,
            writer,
            sanitizer: Arc::new(BodySanitizer::new()),
        }
    }
}

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, Response, header},
};
use http_body_util::BodyExt;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use postbox::application::posts::PostService;
use postbox::application::repos::{
    CreatePostParams, PostsRepo, PostsWriteRepo, RepoError, UpdatePostParams,
};
use postbox::domain::entities::PostRecord;
use postbox::infra::http::{HttpState, HttpService, build_service};

/// Insertion-ordered store double. Flip `failing` to make every call error out.
#[derive(Default)]
pub struct InMemoryPosts {
    posts: Mutex<Vec<PostRecord>>,
    failing: AtomicBool,
}

impl InMemoryPosts {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.posts.lock().await.len()
    }

    pub async fn snapshot(&self) -> Vec<PostRecord> {
        self.posts.lock().await.clone()
    }

    fn check(&self) -> Result<(), RepoError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepoError::Persistence("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PostsRepo for InMemoryPosts {
    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError> {
        self.check()?;
        Ok(self.posts.lock().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        self.check()?;
        Ok(self
            .posts
            .lock()
            .await
            .iter()
            .find(|post| post.id == id)
            .cloned())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.check()
    }
}

#[async_trait]
impl PostsWriteRepo for InMemoryPosts {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        self.check()?;
        let record = PostRecord {
            id: Uuid::new_v4(),
            title: params.title,
            image: params.image,
            body: params.body,
            created: params.created.unwrap_or_else(OffsetDateTime::now_utc),
        };
        self.posts.lock().await.push(record.clone());
        Ok(record)
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        self.check()?;
        let mut posts = self.posts.lock().await;
        let post = posts
            .iter_mut()
            .find(|post| post.id == params.id)
            .ok_or(RepoError::NotFound)?;
        if let Some(title) = params.title {
            post.title = title;
        }
        if let Some(image) = params.image {
            post.image = image;
        }
        if let Some(body) = params.body {
            post.body = body;
        }
        Ok(post.clone())
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
        self.check()?;
        let mut posts = self.posts.lock().await;
        let before = posts.len();
        posts.retain(|post| post.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

pub fn post_service(store: &Arc<InMemoryPosts>) -> PostService {
    let reader: Arc<dyn PostsRepo> = store.clone();
    let writer: Arc<dyn PostsWriteRepo> = store.clone();
    PostService::new(reader, writer)
}

pub fn app(store: &Arc<InMemoryPosts>) -> HttpService {
    build_service(HttpState {
        posts: Arc::new(post_service(store)),
    })
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

pub fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}

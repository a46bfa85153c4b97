use axum::{
    extract::{Form, Path, State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::warn;

use crate::{
    application::posts::{PostError, parse_post_id},
    presentation::views::{
        LayoutContext, POSTS_HREF, PostCardView, PostDetailView, PostEditTemplate, PostFormView,
        PostIndexTemplate, PostIndexView, PostNewTemplate, PostShowTemplate,
        render_template_response,
    },
};

use super::{
    HttpState,
    forms::{PostForm, PostUpdateForm},
};

const NEW_POST_HREF: &str = "/posts/new";

pub(super) async fn root() -> Redirect {
    Redirect::to(POSTS_HREF)
}

pub(super) async fn index(State(state): State<HttpState>) -> Response {
    let posts = match state.posts.list_all().await {
        Ok(posts) => posts,
        Err(err) => {
            log_swallowed("list", None, &err);
            Vec::new()
        }
    };

    let cards = posts
        .iter()
        .map(|post| PostCardView::from_record(post, state.posts.excerpt(post)))
        .collect();

    let view = LayoutContext::new(
        "Posts",
        PostIndexView {
            posts: cards,
            new_post_href: NEW_POST_HREF.to_string(),
        },
    );
    render_template_response(PostIndexTemplate { view }, StatusCode::OK)
}

pub(super) async fn new_form() -> Response {
    render_new_form()
}

pub(super) async fn create(
    State(state): State<HttpState>,
    form: Result<Form<PostForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(
                target = "postbox::http::posts",
                operation = "create",
                error = %rejection,
                "post form rejected; showing empty form",
            );
            return render_new_form();
        }
    };

    match state.posts.create(form.into_content()).await {
        Ok(_) => Redirect::to(POSTS_HREF).into_response(),
        Err(err) => {
            log_swallowed("create", None, &err);
            render_new_form()
        }
    }
}

pub(super) async fn show(State(state): State<HttpState>, Path(raw_id): Path<String>) -> Response {
    let result = match parse_post_id(&raw_id) {
        Ok(id) => state.posts.find_by_id(id).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(post) => {
            let view = LayoutContext::new(post.title.clone(), PostDetailView::from_record(&post));
            render_template_response(PostShowTemplate { view }, StatusCode::OK)
        }
        Err(err) => {
            log_swallowed("show", Some(&raw_id), &err);
            back_to_list()
        }
    }
}

pub(super) async fn edit_form(
    State(state): State<HttpState>,
    Path(raw_id): Path<String>,
) -> Response {
    let result = match parse_post_id(&raw_id) {
        Ok(id) => state.posts.find_by_id(id).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(post) => {
            let view = LayoutContext::new(
                format!("Edit {}", post.title),
                PostFormView::edit_post(&post),
            );
            render_template_response(PostEditTemplate { view }, StatusCode::OK)
        }
        Err(err) => {
            log_swallowed("edit", Some(&raw_id), &err);
            back_to_list()
        }
    }
}

pub(super) async fn update(
    State(state): State<HttpState>,
    Path(raw_id): Path<String>,
    form: Result<Form<PostUpdateForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(
                target = "postbox::http::posts",
                operation = "update",
                post_id = %raw_id,
                error = %rejection,
                "post form rejected; returning to list",
            );
            return back_to_list();
        }
    };

    let result = match parse_post_id(&raw_id) {
        Ok(id) => state.posts.update_by_id(id, form.into_update()).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(post) => Redirect::to(&format!("{POSTS_HREF}/{}", post.id)).into_response(),
        Err(err) => {
            log_swallowed("update", Some(&raw_id), &err);
            back_to_list()
        }
    }
}

pub(super) async fn delete(State(state): State<HttpState>, Path(raw_id): Path<String>) -> Response {
    let result = match parse_post_id(&raw_id) {
        Ok(id) => state.posts.delete_by_id(id).await,
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        log_swallowed("delete", Some(&raw_id), &err);
    }
    back_to_list()
}

fn render_new_form() -> Response {
    let view = LayoutContext::new("New post", PostFormView::new_post());
    render_template_response(PostNewTemplate { view }, StatusCode::OK)
}

fn back_to_list() -> Response {
    Redirect::to(POSTS_HREF).into_response()
}

/// Failures on these routes never reach the user; they are recorded here instead.
fn log_swallowed(operation: &'static str, raw_id: Option<&str>, err: &PostError) {
    let post_id = raw_id.unwrap_or("");
    if err.is_not_found() {
        warn!(
            target = "postbox::http::posts",
            operation,
            post_id,
            error = %err,
            "post not found; redirecting to list",
        );
    } else {
        warn!(
            target = "postbox::http::posts",
            operation,
            post_id,
            error = %err,
            "post store operation failed; degrading",
        );
    }
}

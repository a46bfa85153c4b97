use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description};

use crate::application::error::{ErrorReport, HttpError};
use crate::domain::entities::PostRecord;

const SITE_TITLE: &str = "Postbox";

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response() -> Response {
    let view = LayoutContext::new("Not found", ErrorPageView::not_found());
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct PageMetaView {
    pub site_title: String,
    pub page_title: String,
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub meta: PageMetaView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(page_title: impl Into<String>, content: T) -> Self {
        Self {
            meta: PageMetaView {
                site_title: SITE_TITLE.to_string(),
                page_title: page_title.into(),
            },
            content,
        }
    }
}

#[derive(Clone)]
pub struct PostCardView {
    pub title: String,
    pub image: String,
    pub excerpt_html: String,
    pub created_display: String,
    pub created_iso: String,
    pub href: String,
}

impl PostCardView {
    /// `excerpt_html` must already be sanitized; it is emitted unescaped.
    pub fn from_record(post: &PostRecord, excerpt_html: String) -> Self {
        Self {
            title: post.title.clone(),
            image: post.image.clone(),
            excerpt_html,
            created_display: display_date(post.created),
            created_iso: iso_timestamp(post.created),
            href: post_href(post),
        }
    }
}

pub struct PostIndexView {
    pub posts: Vec<PostCardView>,
    pub new_post_href: String,
}

#[derive(Template)]
#[template(path = "posts/index.html")]
pub struct PostIndexTemplate {
    pub view: LayoutContext<PostIndexView>,
}

pub struct PostDetailView {
    pub title: String,
    pub image: String,
    pub body_html: String,
    pub created_display: String,
    pub created_iso: String,
    pub index_href: String,
    pub edit_href: String,
    pub delete_action: String,
}

impl PostDetailView {
    /// The stored body is rendered as markup; it was sanitized when written.
    pub fn from_record(post: &PostRecord) -> Self {
        let href = post_href(post);
        Self {
            title: post.title.clone(),
            image: post.image.clone(),
            body_html: post.body.clone(),
            created_display: display_date(post.created),
            created_iso: iso_timestamp(post.created),
            index_href: POSTS_HREF.to_string(),
            edit_href: format!("{href}/edit"),
            delete_action: format!("{href}?_method=DELETE"),
        }
    }
}

#[derive(Template)]
#[template(path = "posts/show.html")]
pub struct PostShowTemplate {
    pub view: LayoutContext<PostDetailView>,
}

pub struct PostFormView {
    pub heading: String,
    pub action: String,
    pub submit_label: String,
    pub cancel_href: String,
    pub title: String,
    pub image: String,
    pub body: String,
}

impl PostFormView {
    pub fn new_post() -> Self {
        Self {
            heading: "New post".to_string(),
            action: POSTS_HREF.to_string(),
            submit_label: "Publish".to_string(),
            cancel_href: POSTS_HREF.to_string(),
            title: String::new(),
            image: String::new(),
            body: String::new(),
        }
    }

    pub fn edit_post(post: &PostRecord) -> Self {
        let href = post_href(post);
        Self {
            heading: format!("Edit “{}”", post.title),
            action: format!("{href}?_method=PUT"),
            submit_label: "Save changes".to_string(),
            cancel_href: href,
            title: post.title.clone(),
            image: post.image.clone(),
            body: post.body.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "posts/new.html")]
pub struct PostNewTemplate {
    pub view: LayoutContext<PostFormView>,
}

#[derive(Template)]
#[template(path = "posts/edit.html")]
pub struct PostEditTemplate {
    pub view: LayoutContext<PostFormView>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub index_href: String,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Page not found".to_string(),
            message: "There is nothing at this address.".to_string(),
            index_href: POSTS_HREF.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}

pub const POSTS_HREF: &str = "/posts";

fn post_href(post: &PostRecord) -> String {
    format!("{POSTS_HREF}/{}", post.id)
}

fn display_date(value: OffsetDateTime) -> String {
    let format = format_description!("[weekday repr:short] [month repr:short] [day] [year]");
    value
        .format(format)
        .unwrap_or_else(|_| iso_timestamp(value))
}

fn iso_timestamp(value: OffsetDateTime) -> String {
    value.format(&Rfc3339).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;
    use uuid::Uuid;

    use super::*;

    fn sample_post() -> PostRecord {
        PostRecord {
            id: Uuid::nil(),
            title: "Hello <World>".to_string(),
            image: "https://example.com/cover.jpg".to_string(),
            body: "<p>Body <strong>text</strong></p>".to_string(),
            created: datetime!(2025-06-01 12:30:00 UTC),
        }
    }

    #[test]
    fn dates_render_like_a_calendar_day() {
        assert_eq!(
            display_date(datetime!(2025-06-01 12:30:00 UTC)),
            "Sun Jun 01 2025"
        );
        assert_eq!(
            iso_timestamp(datetime!(2025-06-01 12:30:00 UTC)),
            "2025-06-01T12:30:00Z"
        );
    }

    #[test]
    fn detail_view_links_back_to_the_post() {
        let view = PostDetailView::from_record(&sample_post());
        let id = Uuid::nil();
        assert_eq!(view.edit_href, format!("/posts/{id}/edit"));
        assert_eq!(view.delete_action, format!("/posts/{id}?_method=DELETE"));
    }

    #[test]
    fn show_page_escapes_title_but_keeps_body_markup() {
        let view = LayoutContext::new("Hello", PostDetailView::from_record(&sample_post()));
        let html = PostShowTemplate { view }.render().expect("render show");

        assert!(html.contains("Hello &#60;World&#62;") || html.contains("Hello &lt;World&gt;"));
        assert!(html.contains("<p>Body <strong>text</strong></p>"));
        assert!(html.contains("https://example.com/cover.jpg"));
    }

    #[test]
    fn edit_form_overrides_method_and_prefills_fields() {
        let view = LayoutContext::new("Edit", PostFormView::edit_post(&sample_post()));
        let html = PostEditTemplate { view }.render().expect("render edit");

        assert!(html.contains(&format!("/posts/{}?_method=PUT", Uuid::nil())));
        assert!(html.contains("https://example.com/cover.jpg"));
        assert!(html.contains(r#"name="body""#));
    }

    #[test]
    fn new_form_posts_to_the_collection() {
        let view = LayoutContext::new("New post", PostFormView::new_post());
        let html = PostNewTemplate { view }.render().expect("render new");

        assert!(html.contains(r#"action="/posts""#));
        assert!(!html.contains("_method"));
    }

    #[test]
    fn empty_index_says_so() {
        let view = LayoutContext::new(
            "Posts",
            PostIndexView {
                posts: Vec::new(),
                new_post_href: "/posts/new".to_string(),
            },
        );
        let html = PostIndexTemplate { view }.render().expect("render index");
        assert!(html.contains("No posts yet"));
    }

    #[test]
    fn not_found_page_has_404_status() {
        let response = render_not_found_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<ErrorReport>().is_some());
    }
}

/// The user-editable part of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostContent {
    pub title: String,
    pub image: String,
    pub body: String,
}

impl PostContent {
    pub fn new(
        title: impl Into<String>,
        image: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            image: image.into(),
            body: body.into(),
        }
    }

    /// Replace the body, leaving title and image untouched.
    pub fn with_body(self, body: String) -> Self {
        Self { body, ..self }
    }
}

/// Fields to change on an existing post. `None` leaves the stored value as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub image: Option<String>,
    pub body: Option<String>,
}

impl From<PostContent> for PostUpdate {
    fn from(content: PostContent) -> Self {
        Self {
            title: Some(content.title),
            image: Some(content.image),
            body: Some(content.body),
        }
    }
}

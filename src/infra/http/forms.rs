use serde::Deserialize;

use crate::domain::posts::{PostContent, PostUpdate};

/// Creation form. Missing fields arrive as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PostForm {
    pub(crate) title: String,
    pub(crate) image: String,
    pub(crate) body: String,
}

impl PostForm {
    pub(crate) fn into_content(self) -> PostContent {
        PostContent::new(self.title, self.image, self.body)
    }
}

/// Edit form. A field left out of the request is not touched; a field sent
/// empty is cleared.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PostUpdateForm {
    pub(crate) title: Option<String>,
    pub(crate) image: Option<String>,
    pub(crate) body: Option<String>,
}

impl PostUpdateForm {
    pub(crate) fn into_update(self) -> PostUpdate {
        PostUpdate {
            title: self.title,
            image: self.image,
            body: self.body,
        }
    }
}

//! Post payloads for the blog API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::PostRow;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    pub id: Uuid,
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedPost {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct AuthorInfo {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub author_id: String,
    pub author: AuthorInfo,
    pub created_at: String,
}

impl From<PostRow> for PostResponse {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id.to_string(),
            title: row.title,
            content: row.content,
            published: row.published,
            author_id: row.author_id.to_string(),
            author: AuthorInfo {
                name: row.author_name,
            },
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

//! Blog post handlers. Every route here sits behind the auth gate.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::db::{post_create, post_get, post_update, posts_list};
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::handlers::http::AppState;
use crate::middleware::AuthenticatedContext;
use crate::models::{CreatePostRequest, CreatedPost, PostResponse, UpdatePostRequest};

/// POST /api/v1/blog
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedContext,
    ValidatedJson(body): ValidatedJson<CreatePostRequest>,
) -> Result<Json<CreatedPost>, AppError> {
    let author_id = auth.user_id()?;
    let id = post_create(state.db(), author_id, &body.title, &body.content).await?;
    info!(post_id = %id, %author_id, "post created");
    Ok(Json(CreatedPost { id: id.to_string() }))
}

/// PUT /api/v1/blog. Only the author's own post is touched.
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedContext,
    ValidatedJson(body): ValidatedJson<UpdatePostRequest>,
) -> Result<&'static str, AppError> {
    let author_id = auth.user_id()?;
    post_update(state.db(), body.id, author_id, &body.title, &body.content).await?;
    info!(post_id = %body.id, %author_id, "post updated");
    Ok("updated post")
}

/// GET /api/v1/blog/bulk
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let rows = posts_list(state.db()).await?;
    Ok(Json(rows.into_iter().map(PostResponse::from).collect()))
}

/// GET /api/v1/blog/:id
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PostResponse>, AppError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::Validation("post id must be a UUID".to_string()))?;
    let row = post_get(state.db(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;
    Ok(Json(row.into()))
}

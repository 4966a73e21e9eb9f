//! Post handlers.

use actix_web::{HttpResponse, web};
use serde_json::Value;

use quill_core::DomainError;
use quill_core::domain::Post;
use quill_core::posts as post_ops;
use quill_shared::dto::{CreatePostResponse, PostResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        author_id: post.author_id,
        author_name: post.author_name,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// GET /api/posts
///
/// Always 200: a store failure yields an empty list.
pub async fn list(state: web::Data<AppState>) -> HttpResponse {
    let posts: Vec<PostResponse> = post_ops::list_posts(state.posts.as_ref())
        .await
        .into_iter()
        .map(to_response)
        .collect();

    HttpResponse::Ok().json(posts)
}

/// POST /api/posts
///
/// The body may be any JSON value; its shape is checked by validation.
pub async fn create(state: web::Data<AppState>, body: web::Bytes) -> AppResult<HttpResponse> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Request body is not valid JSON: {}", e)))?;

    let post = post_ops::create_post(state.posts.as_ref(), &payload).await?;

    Ok(HttpResponse::Created().json(CreatePostResponse::created(to_response(post))))
}

/// GET /api/posts/{post_id}
pub async fn show(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = post_ops::get_post(state.posts.as_ref(), &post_id)
        .await
        .ok_or_else(|| DomainError::NotFound {
            entity_type: "Post",
            id: post_id.clone(),
        })?;

    Ok(HttpResponse::Ok().json(to_response(post)))
}

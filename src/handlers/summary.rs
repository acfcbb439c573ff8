// src/handlers/summary.rs

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::quiz::SearchParams,
    services::{
        analytics::{self, Scope},
        scorecard,
    },
    utils::jwt::Claims,
};

/// Subject-wise top scores and attempts of the current user.
pub async fn my_summary(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let summary = analytics::summarize(&pool, Scope::User(user_id)).await?;

    Ok(Json(summary))
}

/// Subject-wise top scores and attempts across all users.
/// Admin only.
pub async fn admin_summary(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let summary = analytics::summarize(&pool, Scope::Global).await?;

    Ok(Json(summary))
}

/// Completed attempts of the current user with percentages.
pub async fn my_scorecard(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;
    let user_id = claims.user_id()?;

    let entries = scorecard::scorecard(&pool, user_id, &params.normalized()).await?;

    Ok(Json(entries))
}

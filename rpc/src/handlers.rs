//! Request handlers and their request/response bodies.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use feedback_board::{Board, BoardError, FeedbackQuery, RoadmapBoard};
use feedback_types::{
    ChangelogEntry, ChangelogId, ChangelogPatch, Comment, FeedbackId, FeedbackItem,
    FeedbackStatus, NewChangelogEntry, NewComment, NewFeedback, NewRoadmapItem, RoadmapId,
    RoadmapItem, RoadmapPatch, Timeline, VoterId,
};
use serde::{Deserialize, Serialize};

use crate::error::RpcError;
use crate::server::AppState;

type Rpc<T> = Result<T, RpcError>;
type JsonBody<T> = Result<Json<T>, JsonRejection>;

fn parse_id<T: std::str::FromStr<Err = feedback_types::TypeError>>(
    path: Result<Path<String>, PathRejection>,
) -> Rpc<T> {
    let Path(raw) = path?;
    Ok(raw.parse()?)
}

/// Run a board call on the blocking pool. Store access and per-item locks
/// block, so they stay off the async workers.
async fn blocking<T, F>(board: AppState, f: F) -> Rpc<T>
where
    T: Send + 'static,
    F: FnOnce(&Board) -> Result<T, BoardError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&board))
        .await
        .map_err(|e| RpcError::Server(e.to_string()))?
        .map_err(RpcError::from)
}

// ── Health ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ── Feedback ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct VoteRequest {
    pub voter: String,
}

pub async fn list_feedback(
    State(board): State<AppState>,
    query: Result<Query<FeedbackQuery>, QueryRejection>,
) -> Rpc<Json<Vec<FeedbackItem>>> {
    let Query(query) = query?;
    let items = blocking(board, move |b| b.feedback.list(&query)).await?;
    Ok(Json(items))
}

pub async fn submit_feedback(
    State(board): State<AppState>,
    body: JsonBody<NewFeedback>,
) -> Rpc<(StatusCode, Json<FeedbackItem>)> {
    let Json(submission) = body?;
    let item = blocking(board, move |b| b.feedback.submit(submission)).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get_feedback(
    State(board): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Rpc<Json<FeedbackItem>> {
    let id: FeedbackId = parse_id(path)?;
    Ok(Json(blocking(board, move |b| b.feedback.get(id)).await?))
}

pub async fn delete_feedback(
    State(board): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Rpc<StatusCode> {
    let id: FeedbackId = parse_id(path)?;
    blocking(board, move |b| b.feedback.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_status(
    State(board): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: JsonBody<StatusRequest>,
) -> Rpc<Json<FeedbackItem>> {
    let id: FeedbackId = parse_id(path)?;
    let Json(request) = body?;
    let status: FeedbackStatus = request.status.parse()?;
    Ok(Json(blocking(board, move |b| b.feedback.update_status(id, status)).await?))
}

pub async fn upvote(
    State(board): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: JsonBody<VoteRequest>,
) -> Rpc<Json<FeedbackItem>> {
    let id: FeedbackId = parse_id(path)?;
    let Json(request) = body?;
    let voter = VoterId::parse(&request.voter)?;
    Ok(Json(blocking(board, move |b| b.feedback.upvote(id, &voter)).await?))
}

pub async fn downvote(
    State(board): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: JsonBody<VoteRequest>,
) -> Rpc<Json<FeedbackItem>> {
    let id: FeedbackId = parse_id(path)?;
    let Json(request) = body?;
    let voter = VoterId::parse(&request.voter)?;
    Ok(Json(blocking(board, move |b| b.feedback.downvote(id, &voter)).await?))
}

pub async fn list_comments(
    State(board): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Rpc<Json<Vec<Comment>>> {
    let id: FeedbackId = parse_id(path)?;
    Ok(Json(blocking(board, move |b| b.feedback.comments(id)).await?))
}

pub async fn add_comment(
    State(board): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: JsonBody<NewComment>,
) -> Rpc<(StatusCode, Json<Comment>)> {
    let id: FeedbackId = parse_id(path)?;
    let Json(comment) = body?;
    let comment = blocking(board, move |b| b.feedback.add_comment(id, comment)).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

// ── Roadmap ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RoadmapParams {
    pub timeline: Option<String>,
}

pub async fn list_roadmap(
    State(board): State<AppState>,
    params: Result<Query<RoadmapParams>, QueryRejection>,
) -> Rpc<Json<Vec<RoadmapItem>>> {
    let Query(params) = params?;
    let timeline = params
        .timeline
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(str::parse::<Timeline>)
        .transpose()?;
    let items = blocking(board, move |b| match timeline {
        Some(timeline) => b.roadmap.by_timeline(timeline),
        None => b.roadmap.list(),
    })
    .await?;
    Ok(Json(items))
}

pub async fn roadmap_board(State(board): State<AppState>) -> Rpc<Json<RoadmapBoard>> {
    Ok(Json(blocking(board, |b| b.roadmap.board()).await?))
}

pub async fn create_roadmap_item(
    State(board): State<AppState>,
    body: JsonBody<NewRoadmapItem>,
) -> Rpc<(StatusCode, Json<RoadmapItem>)> {
    let Json(item) = body?;
    let item = blocking(board, move |b| b.roadmap.create(item)).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get_roadmap_item(
    State(board): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Rpc<Json<RoadmapItem>> {
    let id: RoadmapId = parse_id(path)?;
    Ok(Json(blocking(board, move |b| b.roadmap.get(id)).await?))
}

pub async fn update_roadmap_item(
    State(board): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: JsonBody<RoadmapPatch>,
) -> Rpc<Json<RoadmapItem>> {
    let id: RoadmapId = parse_id(path)?;
    let Json(patch) = body?;
    Ok(Json(blocking(board, move |b| b.roadmap.update(id, patch)).await?))
}

pub async fn delete_roadmap_item(
    State(board): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Rpc<StatusCode> {
    let id: RoadmapId = parse_id(path)?;
    blocking(board, move |b| b.roadmap.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Changelog ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangelogParams {
    pub version: Option<String>,
}

pub async fn list_changelog(
    State(board): State<AppState>,
    params: Result<Query<ChangelogParams>, QueryRejection>,
) -> Rpc<Json<Vec<ChangelogEntry>>> {
    let Query(params) = params?;
    let version = params.version.filter(|v| !v.trim().is_empty());
    let entries = blocking(board, move |b| match version {
        Some(version) => b.changelog.by_version(&version),
        None => b.changelog.list(),
    })
    .await?;
    Ok(Json(entries))
}

pub async fn create_changelog_entry(
    State(board): State<AppState>,
    body: JsonBody<NewChangelogEntry>,
) -> Rpc<(StatusCode, Json<ChangelogEntry>)> {
    let Json(entry) = body?;
    let entry = blocking(board, move |b| b.changelog.create(entry)).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_changelog_entry(
    State(board): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Rpc<Json<ChangelogEntry>> {
    let id: ChangelogId = parse_id(path)?;
    Ok(Json(blocking(board, move |b| b.changelog.get(id)).await?))
}

pub async fn update_changelog_entry(
    State(board): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: JsonBody<ChangelogPatch>,
) -> Rpc<Json<ChangelogEntry>> {
    let id: ChangelogId = parse_id(path)?;
    let Json(patch) = body?;
    Ok(Json(blocking(board, move |b| b.changelog.update(id, patch)).await?))
}

pub async fn delete_changelog_entry(
    State(board): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Rpc<StatusCode> {
    let id: ChangelogId = parse_id(path)?;
    blocking(board, move |b| b.changelog.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

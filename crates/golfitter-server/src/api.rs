use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Path, Query, State},
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use golfitter_media::{BackTarget, ComparisonRoute};
use golfitter_shared::analysis::{
    mock_analysis, mock_detailed_analysis, AnalysisPreset, AnalysisResult, DetailedAnalysis,
};
use golfitter_shared::constants::{ALLOWED_VIDEO_TYPES, MAX_UPLOAD_SIZE};
use golfitter_shared::matching::{find_best_match, match_score, BodyMeasurements, MatchProfile};
use golfitter_shared::upload::validate_upload;
use golfitter_shared::{UploadError, VideoId};
use golfitter_store::{NewVideo, VideoStore, VideoSummary};

use crate::config::ServerConfig;
use crate::error::ServerError;

#[derive(Clone)]
pub struct AppState {
    pub store: VideoStore,
    pub profiles: Arc<Vec<MatchProfile>>,
    pub config: Arc<ServerConfig>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/info", get(server_info))
        .route("/profiles", get(list_profiles))
        .route("/match", post(match_profile))
        .route(
            "/videos",
            get(list_videos).post(upload_video).delete(clear_videos),
        )
        .route("/videos/{id}", get(get_video).delete(delete_video))
        .route("/videos/{id}/content", get(video_content))
        .route("/videos/{id}/playback", post(create_playback))
        .route("/videos/{id}/analysis", post(analyze_video))
        .route("/videos/{id}/analysis/detailed", get(detailed_analysis))
        .route(
            "/playback/{token}",
            get(stream_playback).delete(release_playback),
        )
        .route("/comparison/back", get(comparison_back))
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ServerInfoResponse {
    name: String,
    version: &'static str,
    max_upload_size: u64,
    accepted_types: &'static [&'static str],
}

#[derive(Serialize)]
struct MatchResponse {
    profile: MatchProfile,
    score: f64,
}

#[derive(Serialize)]
struct UploadResponse {
    id: VideoId,
}

#[derive(Serialize)]
struct PlaybackResponse {
    url: String,
    href: String,
}

#[derive(Deserialize)]
struct AnalysisQuery {
    #[serde(default)]
    preset: AnalysisPreset,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn server_info(State(state): State<AppState>) -> Json<ServerInfoResponse> {
    Json(ServerInfoResponse {
        name: state.config.instance_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        max_upload_size: MAX_UPLOAD_SIZE,
        accepted_types: &ALLOWED_VIDEO_TYPES,
    })
}

// ─── Matching ───

async fn list_profiles(State(state): State<AppState>) -> Json<Vec<MatchProfile>> {
    Json(state.profiles.as_ref().clone())
}

async fn match_profile(
    State(state): State<AppState>,
    Json(measurements): Json<BodyMeasurements>,
) -> Result<Json<MatchResponse>, ServerError> {
    let profile = find_best_match(&measurements, &state.profiles)
        .ok_or_else(|| ServerError::NotFound("No reference profiles configured".into()))?;
    let score = match_score(&measurements, profile);

    info!(profile = %profile.id, score, "Matched reference profile");

    Ok(Json(MatchResponse {
        profile: profile.clone(),
        score,
    }))
}

// ─── Videos ───

async fn upload_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), ServerError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, &state))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().unwrap_or("video").to_string();
        let mime_type = field.content_type().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, &state))?;

        validate_upload(&mime_type, data.len() as u64)?;

        let id = state
            .store
            .save(NewVideo::new(name, mime_type, data.to_vec()))
            .await?;

        return Ok((StatusCode::CREATED, Json(UploadResponse { id })));
    }

    Err(ServerError::BadRequest(
        "Missing 'file' field in multipart form".to_string(),
    ))
}

/// A body cut off by the request limit is an oversized upload, not a
/// malformed one.
fn multipart_error(err: MultipartError, state: &AppState) -> ServerError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::FileTooLarge {
            size: state.config.max_body_size as u64,
            max: MAX_UPLOAD_SIZE,
        }
        .into()
    } else {
        ServerError::BadRequest(format!("Multipart error: {}", err))
    }
}

async fn list_videos(
    State(state): State<AppState>,
) -> Result<Json<Vec<VideoSummary>>, ServerError> {
    Ok(Json(state.store.list_summaries().await?))
}

async fn clear_videos(State(state): State<AppState>) -> Result<StatusCode, ServerError> {
    state.store.clear_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn find_video(
    state: &AppState,
    id: String,
) -> Result<golfitter_store::StoredVideo, ServerError> {
    let id = VideoId::from(id);
    state
        .store
        .get(&id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Video {id}")))
}

async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VideoSummary>, ServerError> {
    let video = find_video(&state, id).await?;
    Ok(Json(VideoSummary::from(&video)))
}

async fn video_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let video = find_video(&state, id).await?;
    Ok(([(header::CONTENT_TYPE, video.mime_type)], video.data))
}

async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.store.delete(&VideoId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Playback handles ───

async fn create_playback(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<PlaybackResponse>), ServerError> {
    let video = find_video(&state, id).await?;
    let url = state.store.url_for(&video);

    Ok((
        StatusCode::CREATED,
        Json(PlaybackResponse {
            href: format!("/playback/{}", url.token()),
            url: url.to_string(),
        }),
    ))
}

async fn stream_playback(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let (mime_type, data) = state
        .store
        .resolve_url(&token)
        .ok_or_else(|| ServerError::NotFound("Playback url expired or unknown".into()))?;
    Ok(([(header::CONTENT_TYPE, mime_type)], data))
}

async fn release_playback(State(state): State<AppState>, Path(token): Path<String>) -> StatusCode {
    state.store.release_url(&token);
    StatusCode::NO_CONTENT
}

// ─── Analysis ───

async fn analyze_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<AnalysisResult>, ServerError> {
    let video = find_video(&state, id).await?;
    info!(id = %video.id, preset = ?query.preset, "Returning mock analysis");
    Ok(Json(mock_analysis(query.preset)))
}

async fn detailed_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DetailedAnalysis>, ServerError> {
    find_video(&state, id).await?;
    Ok(Json(mock_detailed_analysis()))
}

// ─── Navigation ───

async fn comparison_back(
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<BackTarget>, ServerError> {
    let route = ComparisonRoute::from_pairs(params)?;
    Ok(Json(route.back_target()))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::fmt;
use std::net::SocketAddr;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, Request, State};
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::Method;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use contracts::{
    AdventureEvent, AdventureEventType, AdventureOutcome, ApiError, Attribute, Avatar, ErrorCode,
    GameConfig, GameError, Notification, RealmStatus, RewardCaps, Role, Skill, SkillFlag,
    SCHEMA_VERSION_V1,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, Mutex};

use crate::RealmApi;

const DEFAULT_PAGE_SIZE: usize = 500;
const MAX_PAGE_SIZE: usize = 5000;

include!("error.rs");
include!("state.rs");
include!("routes/realms.rs");
include!("routes/avatars.rs");
include!("routes/skills.rs");
include!("routes/adventures.rs");
include!("routes/admin.rs");
include!("routes/stream.rs");
include!("util.rs");

pub async fn serve(addr: SocketAddr) -> Result<(), ServerError> {
    let state = AppState::new();
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/realms", post(create_realm))
        .route("/api/v1/realms/{realm_id}/status", get(get_status))
        .route(
            "/api/v1/realms/{realm_id}/avatars/mint_free",
            post(mint_free_avatar),
        )
        .route("/api/v1/realms/{realm_id}/avatars/mint", post(mint_avatar))
        .route(
            "/api/v1/realms/{realm_id}/avatars/{avatar_id}",
            get(get_avatar),
        )
        .route(
            "/api/v1/realms/{realm_id}/avatars/{avatar_id}/attribute_points",
            post(add_attribute_points),
        )
        .route(
            "/api/v1/realms/{realm_id}/avatars/{avatar_id}/attributes",
            post(set_attributes),
        )
        .route(
            "/api/v1/realms/{realm_id}/avatars/{avatar_id}/skills",
            post(learn_skill),
        )
        .route("/api/v1/realms/{realm_id}/skills", post(create_skill))
        .route("/api/v1/realms/{realm_id}/skills/{skill_id}", get(get_skill))
        .route(
            "/api/v1/realms/{realm_id}/skills/{skill_id}/requirement",
            post(set_skill_requirement),
        )
        .route("/api/v1/realms/{realm_id}/adventures", post(do_adventure))
        .route(
            "/api/v1/realms/{realm_id}/adventures/{adventure_id}/events",
            get(get_adventure_events).post(create_adventure_event),
        )
        .route("/api/v1/realms/{realm_id}/events/{event_id}", get(get_event))
        .route(
            "/api/v1/realms/{realm_id}/rewards/cor",
            post(set_max_reward_cor),
        )
        .route(
            "/api/v1/realms/{realm_id}/rewards/exp",
            post(set_max_reward_exp),
        )
        .route("/api/v1/realms/{realm_id}/roles/grant", post(grant_role))
        .route("/api/v1/realms/{realm_id}/roles/revoke", post(revoke_role))
        .route(
            "/api/v1/realms/{realm_id}/oracle/price",
            get(get_current_price).post(set_current_price),
        )
        .route(
            "/api/v1/realms/{realm_id}/notifications",
            get(get_notifications),
        )
        .route("/api/v1/realms/{realm_id}/stream", get(stream_realm))
        .layer(middleware::from_fn(cors_middleware))
        .with_state(state)
}

async fn cors_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = Response::new(axum::body::Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        apply_cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

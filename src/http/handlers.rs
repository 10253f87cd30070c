//! Axum handlers: thin adapters between JSON bodies and the decision
//! pipeline / ACL facade. No business logic lives here.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::acl::access::Access;
use crate::acl::RequestContext;
use crate::decision::{Decision, DecisionRequest};
use crate::error::AclError;

use super::dto::{AuthDto, IpDto, MembershipDto, StatusDto};

/// Bound on how long a single request is allowed to sit behind the store's
/// mutex before it is treated as expired.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone)]
pub struct AppState {
    pub decision: Arc<Decision>,
    pub access: Access,
}

fn ctx() -> RequestContext {
    RequestContext::with_timeout(REQUEST_TIMEOUT)
}

fn status_from_code(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Renders an [`AclError`] the way admin endpoints surface it: `NotFound`
/// becomes a 404, everything else mirrors [`AclError::status_code`].
fn error_response(err: AclError) -> (StatusCode, Json<StatusDto>) {
    let code = if err.is_not_found() {
        404
    } else {
        err.status_code()
    };
    (status_from_code(code), Json(StatusDto::error(code, err.to_string())))
}

pub async fn auth(State(state): State<AppState>, Json(body): Json<AuthDto>) -> impl IntoResponse {
    let req = DecisionRequest {
        login: body.login,
        password: body.password,
        ip: body.ip,
    };
    let resp = state.decision.evaluate(&ctx(), &req);
    (status_from_code(resp.code), Json(resp))
}

pub async fn add_whitelist(
    State(state): State<AppState>,
    Json(body): Json<IpDto>,
) -> impl IntoResponse {
    match state.access.add_to_white_list(&ctx(), &body.ip) {
        Ok(()) => (StatusCode::OK, Json(StatusDto::ok("added"))),
        Err(e) => error_response(e),
    }
}

pub async fn delete_whitelist(
    State(state): State<AppState>,
    Json(body): Json<IpDto>,
) -> impl IntoResponse {
    match state.access.delete_from_white_list(&ctx(), &body.ip) {
        Ok(()) => (StatusCode::OK, Json(StatusDto::ok("deleted"))),
        Err(e) => error_response(e),
    }
}

pub async fn check_whitelist(
    State(state): State<AppState>,
    Json(body): Json<IpDto>,
) -> impl IntoResponse {
    check(&state.access, &body.ip, true)
}

pub async fn add_blacklist(
    State(state): State<AppState>,
    Json(body): Json<IpDto>,
) -> impl IntoResponse {
    match state.access.add_to_black_list(&ctx(), &body.ip) {
        Ok(()) => (StatusCode::OK, Json(StatusDto::ok("added"))),
        Err(e) => error_response(e),
    }
}

pub async fn delete_blacklist(
    State(state): State<AppState>,
    Json(body): Json<IpDto>,
) -> impl IntoResponse {
    match state.access.delete_from_black_list(&ctx(), &body.ip) {
        Ok(()) => (StatusCode::OK, Json(StatusDto::ok("deleted"))),
        Err(e) => error_response(e),
    }
}

pub async fn check_blacklist(
    State(state): State<AppState>,
    Json(body): Json<IpDto>,
) -> impl IntoResponse {
    check(&state.access, &body.ip, false)
}

fn check(access: &Access, ip: &str, white: bool) -> (StatusCode, Json<serde_json::Value>) {
    let result = if white {
        access.is_in_white_list(&ctx(), ip)
    } else {
        access.is_in_black_list(&ctx(), ip)
    };
    match result {
        Ok(found) => (
            StatusCode::OK,
            Json(serde_json::to_value(MembershipDto { in_list: found }).expect("serializable")),
        ),
        Err(e) => {
            let (status, Json(body)) = error_response(e);
            (status, Json(serde_json::to_value(body).expect("serializable")))
        }
    }
}

pub async fn acl_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    match state.access.snapshot(&ctx()) {
        Ok(snapshot) => (StatusCode::OK, Json(serde_json::to_value(snapshot).expect("serializable"))),
        Err(e) => {
            let (status, Json(body)) = error_response(e);
            (status, Json(serde_json::to_value(body).expect("serializable")))
        }
    }
}

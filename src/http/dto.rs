//! Wire-level request/response bodies for the HTTP transport.

use serde::{Deserialize, Serialize};

/// Body shared by all six admin ACL endpoints.
#[derive(Debug, Deserialize)]
pub struct IpDto {
    pub ip: String,
}

/// Body for `POST /auth`, adapted into a [`crate::decision::DecisionRequest`].
#[derive(Debug, Deserialize)]
pub struct AuthDto {
    pub ip: String,
    pub login: String,
    pub password: String,
}

/// Uniform envelope for admin endpoints that only report success/failure,
/// mirroring the `{status, code, msg}` shape of the decision response.
#[derive(Debug, Serialize)]
pub struct StatusDto {
    pub status: String,
    pub code: u16,
    pub msg: String,
}

impl StatusDto {
    pub fn ok(msg: &str) -> Self {
        Self {
            status: "ok".to_string(),
            code: 200,
            msg: msg.to_string(),
        }
    }

    pub fn error(code: u16, msg: String) -> Self {
        Self {
            status: "error".to_string(),
            code,
            msg,
        }
    }
}

/// Response body for `IsIn{W,B}List`.
#[derive(Debug, Serialize)]
pub struct MembershipDto {
    pub in_list: bool,
}

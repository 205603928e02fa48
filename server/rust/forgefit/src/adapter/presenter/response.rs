use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entity::session::{IssuedSession, Session, SessionRealm};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// ログイン・セッション確認の応答。
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub realm: SessionRealm,
    pub authenticated: bool,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionResponse {
    pub fn new(realm: SessionRealm, session: &Session) -> Self {
        Self {
            realm,
            authenticated: session.authenticated,
            issued_at: session.issued_at,
            expires_at: session.expires_at().unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

/// ログイン成功時の応答。token を以後のリクエストの Bearer トークンとして送る。
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(flatten)]
    pub session: SessionResponse,
}

impl LoginResponse {
    pub fn new(realm: SessionRealm, issued: &IssuedSession) -> Self {
        Self {
            token: issued.id.to_string(),
            session: SessionResponse::new(realm, &issued.session),
        }
    }
}

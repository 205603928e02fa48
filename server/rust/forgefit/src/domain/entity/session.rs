use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// セッションの既定有効期間（24 時間）。
pub const DEFAULT_SESSION_TTL_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Session はログイン成功時に保存されるタイムスタンプ付きのセッション記録。
///
/// 保存形式: `{"authenticated": true, "timestamp": <epoch ms>, "expiresIn": <ms>}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub authenticated: bool,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub issued_at: DateTime<Utc>,
    #[serde(rename = "expiresIn")]
    pub ttl_millis: i64,
}

impl Session {
    /// now を発行時刻とするセッションを作る。保存形式に合わせてミリ秒に切り詰める。
    pub fn issue(now: DateTime<Utc>, ttl_millis: i64) -> Self {
        let issued_at = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);
        Self {
            authenticated: true,
            issued_at,
            ttl_millis,
        }
    }

    /// `now − issuedAt < ttlMillis` のときだけ有効。期限が日時として表せないものは無効。
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.authenticated && self.expires_at().is_some_and(|expires_at| now < expires_at)
    }

    /// 失効時刻。保存値が大きすぎて日時の範囲を超える場合は None。
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        TimeDelta::try_milliseconds(self.ttl_millis)
            .and_then(|ttl| self.issued_at.checked_add_signed(ttl))
    }
}

/// IssuedSession はログインで発行したセッションとその ID。
/// ID はクライアントへ Bearer トークンとして渡し、以後の確認・ログアウトに使う。
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedSession {
    pub id: Uuid,
    pub session: Session,
}

/// SessionRealm はセッションの種別。種別ごとに別のストアキーへ保存する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionRealm {
    Admin,
    Member,
}

impl SessionRealm {
    /// セッション ID ごとのストアキー（`admin_session_<id>` / `member_session_<id>`）。
    pub fn storage_key(self, id: Uuid) -> String {
        let prefix = match self {
            Self::Admin => "admin_session",
            Self::Member => "member_session",
        };
        format!("{prefix}_{}", id.as_hyphenated())
    }

    /// 未認証時の誘導先。
    pub fn login_path(self) -> &'static str {
        match self {
            Self::Admin => "/admin/login",
            Self::Member => "/login",
        }
    }
}

impl fmt::Display for SessionRealm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Member => write!(f, "member"),
        }
    }
}

/// セッション確認の結果。Expired と Absent はどちらもログイン画面への誘導になる。
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Valid(Session),
    Expired,
    Absent,
}

impl SessionStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn test_valid_within_ttl() {
        let s = Session::issue(at(1_000), 500);
        assert!(s.is_valid_at(at(1_000)));
        assert!(s.is_valid_at(at(1_499)));
    }

    #[test]
    fn test_invalid_at_ttl_boundary() {
        let s = Session::issue(at(1_000), 500);
        assert!(!s.is_valid_at(at(1_500)));
        assert!(!s.is_valid_at(at(9_000)));
    }

    #[test]
    fn test_unauthenticated_is_never_valid() {
        let mut s = Session::issue(at(1_000), 500);
        s.authenticated = false;
        assert!(!s.is_valid_at(at(1_000)));
    }

    #[test]
    fn test_stored_shape() {
        let s = Session::issue(at(1_700_000_000_123), DEFAULT_SESSION_TTL_MILLIS);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "authenticated": true,
                "timestamp": 1_700_000_000_123_i64,
                "expiresIn": 86_400_000,
            })
        );
    }

    #[test]
    fn test_roundtrip_truncates_to_millis() {
        let now = Utc::now();
        let s = Session::issue(now, DEFAULT_SESSION_TTL_MILLIS);
        let restored: Session = serde_json::from_str(&serde_json::to_string(&s).unwrap()).unwrap();
        assert_eq!(restored, s);
        assert_eq!(s.expires_at().unwrap() - s.issued_at, TimeDelta::hours(24));
    }

    #[test]
    fn test_unrepresentable_expiry_is_not_valid() {
        let s: Session = serde_json::from_str(
            r#"{"authenticated":true,"timestamp":1700000000000,"expiresIn":9223372036854775807}"#,
        )
        .unwrap();
        assert_eq!(s.expires_at(), None);
        assert!(!s.is_valid_at(at(1_700_000_000_001)));

        let negative = Session::issue(at(1_000), i64::MIN);
        assert_eq!(negative.expires_at(), None);
        assert!(!negative.is_valid_at(at(1_000)));
    }

    #[test]
    fn test_storage_key_per_realm_and_id() {
        let id = Uuid::new_v4();
        let admin = SessionRealm::Admin.storage_key(id);
        assert_eq!(admin, format!("admin_session_{id}"));
        assert_ne!(admin, SessionRealm::Member.storage_key(id));
        assert_ne!(admin, SessionRealm::Admin.storage_key(Uuid::new_v4()));
    }
}

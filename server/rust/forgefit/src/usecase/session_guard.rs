use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use forgefit_validation::{validate_email, validate_required, FieldErrors};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entity::session::{IssuedSession, Session, SessionRealm, SessionStatus};
use crate::domain::repository::SessionRepository;
use crate::error::ServiceError;

/// Credentials は設定ファイルで与えられるログイン用の資格情報。
#[derive(Debug, Clone)]
pub struct Credentials {
    identity: String,
    secret: SecretString,
}

impl Credentials {
    pub fn new(identity: impl Into<String>, secret: SecretString) -> Self {
        Self {
            identity: identity.into(),
            secret,
        }
    }

    /// ID とパスワードの両方が一致するかを定数時間で比較する。
    pub fn matches(&self, identity: &str, secret: &str) -> bool {
        let identity_ok = self.identity.as_bytes().ct_eq(identity.as_bytes());
        let secret_ok = self
            .secret
            .expose_secret()
            .as_bytes()
            .ct_eq(secret.as_bytes());
        (identity_ok & secret_ok).into()
    }
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

/// ログインフォームの入力。管理者は username、会員は email を ID として送る。
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    #[serde(default, alias = "username", alias = "email")]
    pub identity: String,
    #[serde(default = "empty_secret")]
    pub password: SecretString,
}

impl LoginInput {
    pub fn new(identity: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            password: SecretString::new(password.into()),
        }
    }
}

/// validate_login は会員ログインフォームを検証する。
/// 管理者ログインは検証せず、資格情報の照合結果だけを返す。
pub fn validate_login(realm: SessionRealm, input: &LoginInput) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if realm == SessionRealm::Admin {
        return errors;
    }
    if let Err(e) = validate_required(Some(input.identity.as_str()), "Email") {
        errors.add("email", e);
    } else if let Err(e) = validate_email(&input.identity) {
        errors.add("email", e);
    }
    if let Err(e) = validate_required(Some(input.password.expose_secret()), "Password") {
        errors.add("password", e);
    }
    errors
}

/// SessionGuardUseCase は 1 つのレルムのログイン・セッション確認・ログアウトを扱う。
///
/// セッションはログインごとに発行する ID で区別する。期限切れのセッションは
/// バックグラウンドで掃除せず、確認時に見つけた時点で削除する。
pub struct SessionGuardUseCase {
    repo: Arc<dyn SessionRepository>,
    realm: SessionRealm,
    credentials: Option<Credentials>,
    ttl_millis: i64,
    /// セッションの保存と削除を直列化する。
    mutation_gate: Mutex<()>,
}

impl SessionGuardUseCase {
    pub fn new(
        repo: Arc<dyn SessionRepository>,
        realm: SessionRealm,
        credentials: Option<Credentials>,
        ttl_millis: i64,
    ) -> Self {
        Self {
            repo,
            realm,
            credentials,
            ttl_millis,
            mutation_gate: Mutex::new(()),
        }
    }

    pub fn realm(&self) -> SessionRealm {
        self.realm
    }

    fn lock_gate(&self) -> MutexGuard<'_, ()> {
        self.mutation_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn login(&self, input: &LoginInput) -> Result<IssuedSession, ServiceError> {
        self.login_at(input, Utc::now())
    }

    pub fn login_at(
        &self,
        input: &LoginInput,
        now: DateTime<Utc>,
    ) -> Result<IssuedSession, ServiceError> {
        validate_login(self.realm, input).into_result()?;

        let Some(credentials) = &self.credentials else {
            warn!(realm = %self.realm, "login rejected: no credentials configured");
            return Err(ServiceError::Rejected);
        };
        if !credentials.matches(&input.identity, input.password.expose_secret()) {
            warn!(realm = %self.realm, "login rejected");
            return Err(ServiceError::Rejected);
        }

        let id = Uuid::new_v4();
        let session = Session::issue(now, self.ttl_millis);
        {
            let _gate = self.lock_gate();
            self.repo.save(self.realm, id, &session)?;
        }
        info!(realm = %self.realm, expires_at = ?session.expires_at(), "session started");
        Ok(IssuedSession { id, session })
    }

    pub fn check(&self, id: Uuid) -> Result<SessionStatus, ServiceError> {
        self.check_at(id, Utc::now())
    }

    pub fn check_at(&self, id: Uuid, now: DateTime<Utc>) -> Result<SessionStatus, ServiceError> {
        match self.repo.load(self.realm, id) {
            Ok(Some(session)) if session.is_valid_at(now) => Ok(SessionStatus::Valid(session)),
            Ok(Some(session)) if session.expires_at().is_none() => {
                warn!(realm = %self.realm, "discarding session with out-of-range expiry");
                self.discard(id, Some(&session))?;
                Ok(SessionStatus::Absent)
            }
            Ok(Some(session)) => {
                self.discard(id, Some(&session))?;
                info!(realm = %self.realm, "session expired");
                Ok(SessionStatus::Expired)
            }
            Ok(None) => Ok(SessionStatus::Absent),
            Err(e) if e.is_corrupt() => {
                warn!(realm = %self.realm, "discarding unreadable session");
                self.discard(id, None)?;
                Ok(SessionStatus::Absent)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 読み込んだ時点の内容がまだ保存されているときだけ削除する。
    /// seen が None なら読めない文書が残っているときだけ削除する。
    fn discard(&self, id: Uuid, seen: Option<&Session>) -> Result<(), ServiceError> {
        let _gate = self.lock_gate();
        let unchanged = match (self.repo.load(self.realm, id), seen) {
            (Ok(Some(current)), Some(seen)) => current == *seen,
            (Ok(_), _) => false,
            (Err(e), None) if e.is_corrupt() => true,
            (Err(e), _) if e.is_corrupt() => false,
            (Err(e), _) => return Err(e.into()),
        };
        if unchanged {
            self.repo.remove(self.realm, id)?;
        }
        Ok(())
    }

    pub fn logout(&self, id: Uuid) -> Result<(), ServiceError> {
        {
            let _gate = self.lock_gate();
            self.repo.remove(self.realm, id)?;
        }
        info!(realm = %self.realm, "session ended");
        Ok(())
    }
}

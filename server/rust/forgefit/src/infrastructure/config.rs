use std::path::PathBuf;

use secrecy::SecretString;
use serde::Deserialize;

use forgefit_pagination::MAX_PER_PAGE;

use crate::domain::entity::plan::Plan;
use crate::domain::entity::site::SiteInfo;

/// Application configuration for the ForgeFit server.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub plan: Plan,
    #[serde(default)]
    pub site: SiteInfo,
}

impl Config {
    /// 設定ファイルを読み込み、環境変数による上書きを適用する。
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut cfg = Self::parse(&content)?;
        cfg.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// 資格情報は設定ファイルに書かず環境変数で与えることもできる。
    ///
    /// - `FORGEFIT_ADMIN_USERNAME` / `FORGEFIT_ADMIN_PASSWORD`
    /// - `FORGEFIT_MEMBER_EMAIL` / `FORGEFIT_MEMBER_PASSWORD`
    /// - `FORGEFIT_CHECKOUT_PRODUCT_ID`
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let username = lookup("FORGEFIT_ADMIN_USERNAME");
        let password = lookup("FORGEFIT_ADMIN_PASSWORD");
        if let Some(admin) = self.auth.admin.as_mut() {
            if let Some(username) = username {
                admin.username = username;
            }
            if let Some(password) = password {
                admin.password = SecretString::new(password);
            }
        } else if let (Some(username), Some(password)) = (username, password) {
            self.auth.admin = Some(AdminAuthConfig {
                username,
                password: SecretString::new(password),
            });
        }

        let email = lookup("FORGEFIT_MEMBER_EMAIL");
        let password = lookup("FORGEFIT_MEMBER_PASSWORD");
        if let Some(member) = self.auth.member.as_mut() {
            if let Some(email) = email {
                member.email = email;
            }
            if let Some(password) = password {
                member.password = SecretString::new(password);
            }
        } else if let (Some(email), Some(password)) = (email, password) {
            self.auth.member = Some(MemberAuthConfig {
                email,
                password: SecretString::new(password),
            });
        }

        if let Some(product_id) = lookup("FORGEFIT_CHECKOUT_PRODUCT_ID") {
            self.plan.product_id = product_id;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.app.name.trim().is_empty() {
            anyhow::bail!("app.name must not be empty");
        }
        if self.server.port == 0 {
            anyhow::bail!("server.port must not be 0");
        }
        if self.admin.page_size == 0 || self.admin.page_size > MAX_PER_PAGE {
            anyhow::bail!("admin.page_size must be between 1 and {MAX_PER_PAGE}");
        }
        if self.session.ttl_hours == 0 {
            anyhow::bail!("session.ttl_hours must be greater than 0");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_environment")]
    pub environment: String,
    /// "text" 以外は JSON で出力する。
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8130
}

/// StorageConfig はキー・バリューストアの保存先を表す。
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// AuthConfig はログインに使う資格情報。未設定のレルムにはログインできない。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub admin: Option<AdminAuthConfig>,
    #[serde(default)]
    pub member: Option<MemberAuthConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminAuthConfig {
    pub username: String,
    pub password: SecretString,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberAuthConfig {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
        }
    }
}

impl SessionConfig {
    pub fn ttl_millis(&self) -> i64 {
        i64::from(self.ttl_hours) * 60 * 60 * 1000
    }
}

fn default_ttl_hours() -> u32 {
    24
}

/// AdminConfig は管理画面のユーザー一覧に関する設定。
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    10
}

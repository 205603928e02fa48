use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// init_logger は tracing-subscriber を初期化する。
/// `RUST_LOG` が無ければ環境に応じてログレベルを決める。
///
/// - dev: debug
/// - staging: info
/// - その他: warn
///
/// format が "text" の場合はプレーンテキスト出力、それ以外は JSON 出力。
pub fn init_logger(env: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(env)));
    let registry = tracing_subscriber::registry().with(filter);

    if format == "text" {
        registry.with(fmt::layer().with_target(true)).init();
    } else {
        registry.with(fmt::layer().json().with_target(true)).init();
    }
}

fn default_level(env: &str) -> &'static str {
    match env {
        "dev" => "debug",
        "staging" => "info",
        _ => "warn",
    }
}

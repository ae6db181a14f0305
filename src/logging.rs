//! 診断ログ初期化モジュール
//!
//! ロガー自身の失敗（初期化・ローテーション・書き込み）は`tracing`で報告される。
//! CLIではそれを標準エラー出力に流す。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG未設定時のフィルタ
///
/// daylogが出す診断はすべてerrorなので常に表示される。
/// 抑制されるのは依存crateのinfo/debug/traceだけ。
const DEFAULT_FILTER: &str = "warn";

/// 診断ログを初期化
///
/// RUST_LOG環境変数でレベルを変更可能
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

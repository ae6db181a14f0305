//! ロガー自身の失敗の報告
//!
//! グローバルなtracingサブスクライバが設定されていればそちらへ、
//! なければ標準エラー出力へ直接書く。

use std::fmt;

/// 失敗を報告
pub(crate) fn report(message: &str, error: &dyn fmt::Display) {
    if tracing::dispatcher::has_been_set() {
        tracing::error!(error = %error, "{}", message);
    } else {
        eprintln!("{}", format_stderr(message, error));
    }
}

fn format_stderr(message: &str, error: &dyn fmt::Display) -> String {
    format!("daylog: {}: {}", message, error)
}

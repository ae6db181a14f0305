//! プロセス共通ロガーモジュール
//!
//! `setup`の初期化処理はプロセス内で最大1回だけ実行される。
//! 1回目が失敗した場合も再実行はされず、以降のログ呼び出しは何もしない。

use crate::config::Config;
use crate::diagnostics;
use crate::error::LogError;
use crate::level::Level;
use crate::logger::{Location, Logger, PrintHook, FATAL_EXIT_CODE};
use crate::value::LogValue;
use std::fmt;
use std::sync::{Once, OnceLock};

static SETUP: Once = Once::new();
static LOGGER: OnceLock<Logger> = OnceLock::new();

/// プロセス共通ロガーを初期化
///
/// 最初の呼び出しの設定だけが有効になり、2回目以降は引数に関わらず`Ok(())`を返す。
///
/// ログ呼び出し時の暗黙の初期化やローテーションの失敗は戻り値では返らない。
/// tracingのグローバルサブスクライバがあればerrorイベントとして、なければ標準エラー出力に報告される。
pub fn setup(config: Config) -> Result<(), LogError> {
    let mut result = Ok(());

    SETUP.call_once(|| match Logger::new(config) {
        Ok(logger) => {
            let _ = LOGGER.set(logger);
        }
        Err(e) => result = Err(e),
    });

    result
}

/// 初期化済みのロガー
pub fn logger() -> Option<&'static Logger> {
    LOGGER.get()
}

/// フックを設定
///
/// 未初期化ならフック付きのデフォルト設定で初期化する
pub fn set_print_hook(hook: PrintHook) {
    if LOGGER.get().is_none() {
        let config = Config::default().with_print_hook(hook.clone());
        if let Err(e) = setup(config) {
            diagnostics::report("ロガーの初期化に失敗しました", &e);
        }
    }

    // 他スレッドの初期化と競合した場合もフックを反映する
    if let Some(logger) = LOGGER.get() {
        logger.set_print_hook(Some(hook));
    }
}

/// ロガーを取得（未初期化ならデフォルト設定で初期化）
fn instance() -> Option<&'static Logger> {
    if LOGGER.get().is_none() {
        if let Err(e) = setup(Config::default()) {
            diagnostics::report("ロガーの初期化に失敗しました", &e);
        }
    }
    LOGGER.get()
}

#[doc(hidden)]
pub fn write(level: Level, location: Location, values: &[&dyn LogValue]) {
    let Some(logger) = instance() else {
        return exit_if_fatal(level);
    };
    if let Err(e) = logger.write(level, Some(location), values) {
        diagnostics::report(&format!("{}ログの書き込みに失敗しました", level), &e);
    }
}

#[doc(hidden)]
pub fn writef(level: Level, location: Location, args: fmt::Arguments<'_>) {
    let Some(logger) = instance() else {
        return exit_if_fatal(level);
    };
    if let Err(e) = logger.writef(level, Some(location), args) {
        diagnostics::report(&format!("{}ログの書き込みに失敗しました", level), &e);
    }
}

#[doc(hidden)]
pub fn fatal(location: Location, values: &[&dyn LogValue]) -> ! {
    write(Level::Fatal, location, values);
    std::process::exit(FATAL_EXIT_CODE)
}

#[doc(hidden)]
pub fn fatalf(location: Location, args: fmt::Arguments<'_>) -> ! {
    writef(Level::Fatal, location, args);
    std::process::exit(FATAL_EXIT_CODE)
}

fn exit_if_fatal(level: Level) {
    if level.terminates() {
        std::process::exit(FATAL_EXIT_CODE);
    }
}

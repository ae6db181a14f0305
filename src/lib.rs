//! daylog - 日次ローテーション付きのレベル別ファイルロガー
//!
//! ```no_run
//! use daylog::Config;
//!
//! daylog::setup(Config {
//!     directory: "runtime/consoles".into(),
//!     file_name_prefix: "console".to_string(),
//!     ..Default::default()
//! })
//! .expect("ログの初期化に失敗");
//!
//! daylog::info!(12, "rao", ["q", "w", "e"]);
//! daylog::warnf!("retry {} of {}", 1, 3);
//! ```

pub mod config;
mod diagnostics;
pub mod error;
pub mod global;
mod level;
mod logger;
mod macros;
pub mod paths;
pub mod rotation;
mod value;

pub use config::{CliArgs, Config};
pub use error::{ConfigError, LogError};
pub use global::{logger, set_print_hook, setup};
pub use level::Level;
pub use logger::{line_prefix, Location, Logger, PrintHook, Record, Sink, FATAL_EXIT_CODE};
pub use value::{join_values, LogValue, Shown};

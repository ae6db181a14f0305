//! 設定モジュール

use crate::error::ConfigError;
use crate::logger::PrintHook;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// ログディレクトリのデフォルト値
pub const DEFAULT_DIRECTORY: &str = "runtime/logs";
/// ファイル名プレフィックスのデフォルト値
pub const DEFAULT_FILE_NAME_PREFIX: &str = "log";
/// エンコーディングのデフォルト値（現状は`plain`以外を解釈しない）
pub const DEFAULT_ENCODING: &str = "plain";

/// ロガー設定
#[derive(Clone)]
pub struct Config {
    /// ログファイルの保存ディレクトリ
    pub directory: PathBuf,
    /// ログファイル名のプレフィックス
    pub file_name_prefix: String,
    /// エンコーディング
    pub encoding: String,
    /// 出力処理の差し替えフック
    pub print_hook: Option<PrintHook>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            file_name_prefix: DEFAULT_FILE_NAME_PREFIX.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
            print_hook: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("directory", &self.directory)
            .field("file_name_prefix", &self.file_name_prefix)
            .field("encoding", &self.encoding)
            .field("print_hook", &self.print_hook.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// TOML設定ファイル用構造体
#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    directory: Option<String>,
    file_name_prefix: Option<String>,
    encoding: Option<String>,
}

/// CLI引数
#[derive(Debug, Default)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub directory: Option<PathBuf>,
    pub prefix: Option<String>,
}

impl Config {
    /// 設定を読み込む
    ///
    /// 優先順位: CLI引数 > 設定ファイル > デフォルト値
    pub fn load(cli_args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // 明示された設定ファイルは必須、既定の場所は存在する場合のみ
        let config_path = match cli_args.config {
            Some(ref path) => Some(path.clone()),
            None => Self::default_config_file_path().filter(|p| p.exists()),
        };
        if let Some(path) = config_path {
            let content = fs::read_to_string(&path)?;
            let file_config: FileConfig = toml::from_str(&content)?;
            config.merge_file_config(&file_config);
        }

        config.merge_cli_args(cli_args);

        let config = config.with_defaults();
        config.validate()?;

        Ok(config)
    }

    /// フックを設定したコピーを返す
    pub fn with_print_hook(mut self, hook: PrintHook) -> Self {
        self.print_hook = Some(hook);
        self
    }

    /// 空の項目をデフォルト値で埋める
    pub fn with_defaults(mut self) -> Self {
        if self.directory.as_os_str().is_empty() {
            self.directory = PathBuf::from(DEFAULT_DIRECTORY);
        }
        if self.file_name_prefix.is_empty() {
            self.file_name_prefix = DEFAULT_FILE_NAME_PREFIX.to_string();
        }
        if self.encoding.is_empty() {
            self.encoding = DEFAULT_ENCODING.to_string();
        }
        self
    }

    /// 設定ファイルの既定パス
    fn default_config_file_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".daylog").join("config.toml"))
    }

    /// ファイル設定をマージ
    fn merge_file_config(&mut self, file_config: &FileConfig) {
        if let Some(ref dir) = file_config.directory {
            self.directory = PathBuf::from(dir);
        }
        if let Some(ref prefix) = file_config.file_name_prefix {
            self.file_name_prefix = prefix.clone();
        }
        if let Some(ref encoding) = file_config.encoding {
            self.encoding = encoding.clone();
        }
    }

    /// CLI引数をマージ
    fn merge_cli_args(&mut self, cli_args: &CliArgs) {
        if let Some(ref dir) = cli_args.directory {
            self.directory = dir.clone();
        }
        if let Some(ref prefix) = cli_args.prefix {
            self.file_name_prefix = prefix.clone();
        }
    }

    /// 設定値をバリデート
    fn validate(&self) -> Result<(), ConfigError> {
        if self.file_name_prefix.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue(format!(
                "file_name_prefix must not contain a path separator: {}",
                self.file_name_prefix
            )));
        }
        Ok(())
    }
}

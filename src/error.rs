//! エラー型定義モジュール

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// ロガーエラー
#[derive(Error, Debug)]
pub enum LogError {
    #[error("アクセス権限がありません: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("ディレクトリ作成失敗: {}: {source}", .path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("ファイルオープン失敗: {}: {source}", .path.display())]
    FileOpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("書き込みエラー: {0}")]
    Write(#[source] io::Error),
}

/// 設定エラー
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IOエラー: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML解析エラー: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("不正な設定値: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_permission_denied_display() {
        let err = LogError::PermissionDenied {
            path: PathBuf::from("/var/log/app"),
        };
        assert!(err.to_string().contains("アクセス権限がありません"));
        assert!(err.to_string().contains("/var/log/app"));
    }

    #[test]
    fn test_directory_creation_failed_keeps_source() {
        let err = LogError::DirectoryCreationFailed {
            path: PathBuf::from("runtime/logs"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        assert!(err.to_string().contains("ディレクトリ作成失敗"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_file_open_failed_display() {
        let err = LogError::FileOpenFailed {
            path: PathBuf::from("runtime/logs/log-20240101.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("ファイルオープン失敗"));
        assert!(err.to_string().contains("log-20240101.log"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue("file_name_prefix".to_string());
        assert!(err.to_string().contains("不正な設定値"));
    }
}

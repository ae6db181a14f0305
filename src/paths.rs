//! パスユーティリティモジュール

use crate::error::LogError;
use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};

/// ログファイルのパーミッション
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// 作成するディレクトリのパーミッション（umask適用前）
#[cfg(unix)]
const DIR_MODE: u32 = 0o777;

/// パスが存在しないかどうか
///
/// 権限エラーなど存在しない以外の理由でstatに失敗した場合はfalse
pub fn path_missing(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(_) => false,
        Err(e) => e.kind() == io::ErrorKind::NotFound,
    }
}

/// パスへのアクセスが拒否されているかどうか
///
/// statが権限エラーで失敗した場合に加え、statはできるが
/// 書き込み権限ビットを持たないディレクトリもtrueとする
pub fn path_forbidden(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) => meta.is_dir() && meta.permissions().readonly(),
        Err(e) => e.kind() == io::ErrorKind::PermissionDenied,
    }
}

/// ディレクトリが存在しなければ親も含めて作成
pub fn ensure_directory(path: &Path) -> Result<(), LogError> {
    if !path_missing(path) {
        return Ok(());
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(DIR_MODE);

    builder
        .create(path)
        .map_err(|source| LogError::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source,
        })
}

/// 追記モードでファイルを開く（なければ作成）
pub fn open_append(full_path: &Path) -> Result<File, LogError> {
    let mut options = OpenOptions::new();
    options.read(true).append(true).create(true);
    #[cfg(unix)]
    options.mode(FILE_MODE);

    options
        .open(full_path)
        .map_err(|source| LogError::FileOpenFailed {
            path: full_path.to_path_buf(),
            source,
        })
}

/// ログファイルを開く
///
/// 1. ディレクトリへのアクセスが拒否されていれば即座に`PermissionDenied`
/// 2. ディレクトリがなければ作成
/// 3. `directory/file_name`を追記モードで開く
///
/// 2と3がOSの権限エラーで失敗した場合も`PermissionDenied`になる
/// （他ユーザー所有の0755ディレクトリなど、権限ビットだけでは判定できないケース）
pub fn open_or_create_log_file(file_name: &str, directory: &Path) -> Result<File, LogError> {
    if path_forbidden(directory) {
        return Err(LogError::PermissionDenied {
            path: directory.to_path_buf(),
        });
    }

    ensure_directory(directory)
        .and_then(|()| open_append(&directory.join(file_name)))
        .map_err(|e| permission_denied_as_such(directory, e))
}

/// 権限エラーが原因の作成・オープン失敗を`PermissionDenied`に読み替える
fn permission_denied_as_such(directory: &Path, err: LogError) -> LogError {
    match err {
        LogError::DirectoryCreationFailed { ref source, .. }
        | LogError::FileOpenFailed { ref source, .. }
            if source.kind() == io::ErrorKind::PermissionDenied =>
        {
            LogError::PermissionDenied {
                path: directory.to_path_buf(),
            }
        }
        other => other,
    }
}

//! ログファイルローテーションモジュール

use crate::error::LogError;
use crate::paths;
use chrono::{DateTime, Local, NaiveDate};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// ファイル名に埋め込む日付の形式
const DAY_FORMAT: &str = "%Y%m%d";

/// 日付からログファイル名を生成
///
/// 形式: {prefix}-YYYYMMDD.log
pub fn log_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.log", prefix, date.format(DAY_FORMAT))
}

/// 開いているログファイル
struct LogFile {
    path: PathBuf,
    file: File,
}

/// 日付が変わると出力先を切り替えるファイル
pub struct RotatingFile {
    directory: PathBuf,
    prefix: String,
    current: Option<LogFile>,
}

impl RotatingFile {
    /// `now`の日付のログファイルを開く
    pub fn open(
        directory: PathBuf,
        prefix: String,
        now: &DateTime<Local>,
    ) -> Result<Self, LogError> {
        let mut rotating = Self {
            directory,
            prefix,
            current: None,
        };
        rotating.current = Some(rotating.open_for(now)?);
        Ok(rotating)
    }

    /// `now`の時点で書き込むべきファイル名
    pub fn current_file_name(&self, now: &DateTime<Local>) -> String {
        log_file_name(&self.prefix, now.date_naive())
    }

    /// `now`の時点で書き込むべきファイルのパス
    pub fn expected_path(&self, now: &DateTime<Local>) -> PathBuf {
        self.directory.join(self.current_file_name(now))
    }

    /// 現在開いているファイルのパス
    ///
    /// 直前のローテーションに失敗している場合は`None`
    pub fn path(&self) -> Option<&Path> {
        self.current.as_ref().map(|f| f.path.as_path())
    }

    /// 日付が変わっていればファイルを切り替える
    ///
    /// 古いハンドルを閉じてから新しいファイルを開く。切り替えた場合は`true`。
    /// 再オープンに失敗するとハンドルがない状態になり、次回の呼び出しで再試行される。
    pub fn ensure_current(&mut self, now: &DateTime<Local>) -> Result<bool, LogError> {
        let expected = self.expected_path(now);
        if self.path() == Some(expected.as_path()) {
            return Ok(false);
        }

        // 古いファイルを閉じる
        self.current = None;

        self.current = Some(self.open_for(now)?);
        Ok(true)
    }

    fn open_for(&self, now: &DateTime<Local>) -> Result<LogFile, LogError> {
        let file_name = self.current_file_name(now);
        let file = paths::open_or_create_log_file(&file_name, &self.directory)?;
        Ok(LogFile {
            path: self.directory.join(file_name),
            file,
        })
    }

    fn active(&mut self) -> io::Result<&mut File> {
        self.current.as_mut().map(|f| &mut f.file).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotConnected, "ログファイルが開かれていません")
        })
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.active()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.current.as_mut() {
            Some(f) => f.file.flush(),
            None => Ok(()),
        }
    }
}

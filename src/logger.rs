//! ロガー本体モジュール
//!
//! 1回の書き込みはインスタンスのMutex内で次の順に処理する:
//! 1. レベルと呼び出し元から行プレフィックスを組み立てる
//! 2. 日付が変わっていればログファイルを切り替える
//! 3. フック、またはデフォルトの書式で1行出力する
//! 4. FATALならロックを保持したままプロセスを終了する

use crate::config::Config;
use crate::diagnostics;
use crate::error::LogError;
use crate::level::Level;
use crate::rotation::{self, RotatingFile};
use crate::value::{join_values, LogValue};
use chrono::{DateTime, Local};
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// プレフィックスの直後に置くタイムスタンプの形式
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S ";

/// FATAL時の終了コード
pub const FATAL_EXIT_CODE: i32 = 1;

/// 出力処理を差し替えるフック
///
/// 設定されている間はすべての書き込みがデフォルトの書式ではなくこのフックを通る。
/// フックの中から同じロガーへ書き込むとデッドロックする。
pub type PrintHook = Arc<dyn Fn(&mut Sink, &Record<'_>) -> io::Result<()> + Send + Sync>;

/// ログ呼び出し元のソース位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    file: &'static str,
    line: u32,
}

impl Location {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// `#[track_caller]`経由で呼び出し元の位置を取得
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), location.line())
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// ディレクトリを除いたファイル名
    pub fn file_name(&self) -> &'static str {
        Path::new(self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file)
    }
}

/// フックに渡される1回分のログ内容
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub level: Level,
    pub location: Option<Location>,
    pub message: &'a str,
}

/// 行プレフィックスを生成
///
/// 形式: {LEVEL}|{file}:{line}| または位置が不明なら {LEVEL}|
pub fn line_prefix(level: Level, location: Option<&Location>) -> String {
    match location {
        Some(loc) => format!("{}|{}:{}|", level.tag(), loc.file_name(), loc.line()),
        None => format!("{}|", level.tag()),
    }
}

/// 現在のログファイルと行プレフィックスを束ねた出力先
pub struct Sink {
    output: RotatingFile,
    prefix: String,
}

impl Sink {
    /// 現在の行プレフィックス
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// 現在開いているログファイルのパス
    pub fn path(&self) -> Option<&Path> {
        self.output.path()
    }

    /// デフォルトの書式で1行出力
    pub fn print(&mut self, message: &str) -> io::Result<()> {
        self.print_at(&Local::now(), message)
    }

    fn print_at(&mut self, now: &DateTime<Local>, message: &str) -> io::Result<()> {
        let mut line = format!("{}{}{}", self.prefix, now.format(TIMESTAMP_FORMAT), message);
        if !line.ends_with('\n') {
            line.push('\n');
        }
        self.output.write_all(line.as_bytes())
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

struct Inner {
    sink: Sink,
    hook: Option<PrintHook>,
}

/// 日次ローテーション付きファイルロガー
pub struct Logger {
    config: Config,
    inner: Mutex<Inner>,
}

impl Logger {
    /// ロガーを作成し、今日のログファイルを開く
    pub fn new(config: Config) -> Result<Self, LogError> {
        Self::new_at(config, &Local::now())
    }

    pub(crate) fn new_at(config: Config, now: &DateTime<Local>) -> Result<Self, LogError> {
        let mut config = config.with_defaults();
        let hook = config.print_hook.take();

        let output = RotatingFile::open(
            config.directory.clone(),
            config.file_name_prefix.clone(),
            now,
        )?;

        Ok(Self {
            config,
            inner: Mutex::new(Inner {
                sink: Sink {
                    output,
                    prefix: String::new(),
                },
                hook,
            }),
        })
    }

    /// 確定した設定（フックは含まない）
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 今日のログファイル名
    pub fn current_log_file_name(&self) -> String {
        rotation::log_file_name(&self.config.file_name_prefix, Local::now().date_naive())
    }

    /// 現在開いているログファイルのパス
    pub fn current_path(&self) -> Option<PathBuf> {
        self.lock().sink.path().map(Path::to_path_buf)
    }

    /// フックを設定（`None`でデフォルトの書式に戻す）
    pub fn set_print_hook(&self, hook: Option<PrintHook>) {
        self.lock().hook = hook;
    }

    /// 値をスペース区切りで書き込む
    pub fn write(
        &self,
        level: Level,
        location: Option<Location>,
        values: &[&dyn LogValue],
    ) -> Result<(), LogError> {
        self.emit(level, location, &join_values(values), &Local::now())
    }

    /// 書式付きで書き込む
    pub fn writef(
        &self,
        level: Level,
        location: Option<Location>,
        args: fmt::Arguments<'_>,
    ) -> Result<(), LogError> {
        self.emit(level, location, &args.to_string(), &Local::now())
    }

    /// 呼び出し元の位置付きで値を書き込む
    #[track_caller]
    pub fn log(&self, level: Level, values: &[&dyn LogValue]) -> Result<(), LogError> {
        self.write(level, Some(Location::caller()), values)
    }

    /// 呼び出し元の位置付きで書式付き書き込み
    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.writef(level, Some(Location::caller()), args)
    }

    pub(crate) fn emit(
        &self,
        level: Level,
        location: Option<Location>,
        message: &str,
        now: &DateTime<Local>,
    ) -> Result<(), LogError> {
        let mut inner = self.lock();
        let Inner { sink, hook } = &mut *inner;

        sink.prefix = line_prefix(level, location.as_ref());

        // 切り替えに失敗しても書き込みは試みる
        if let Err(e) = sink.output.ensure_current(now) {
            diagnostics::report("ログファイルの切り替えに失敗しました", &e);
        }

        let record = Record {
            level,
            location,
            message,
        };
        let result = match hook.as_deref() {
            Some(hook) => hook(&mut *sink, &record),
            None => sink.print_at(now, message),
        }
        .map_err(LogError::Write);

        if level.terminates() {
            if let Err(ref e) = result {
                diagnostics::report("FATALログの書き込みに失敗しました", e);
            }
            let _ = sink.flush();
            std::process::exit(FATAL_EXIT_CODE);
        }

        result
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, TimeZone};
    use std::fs;
    use std::thread;
    use tempfile::TempDir;

    fn create_test_logger() -> (Logger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            directory: temp_dir.path().join("logs"),
            file_name_prefix: "test".to_string(),
            ..Default::default()
        };
        let logger = Logger::new(config).unwrap();
        (logger, temp_dir)
    }

    fn read_current(logger: &Logger) -> String {
        fs::read_to_string(logger.current_path().unwrap()).unwrap()
    }

    /// {prefix}{YYYY/MM/DD HH:MM:SS }{message} の形であることを確認
    fn assert_line(line: &str, prefix: &str, message: &str) {
        assert!(line.starts_with(prefix), "unexpected line: {:?}", line);
        let rest = &line[prefix.len()..];
        assert!(
            NaiveDateTime::parse_from_str(&rest[..19], "%Y/%m/%d %H:%M:%S").is_ok(),
            "unexpected line: {:?}",
            line
        );
        assert_eq!(&rest[19..20], " ");
        assert_eq!(&rest[20..], message);
    }

    #[test]
    fn test_location_file_name() {
        let loc = Location::new("src/handlers/user.rs", 42);
        assert_eq!(loc.file_name(), "user.rs");
        assert_eq!(loc.line(), 42);
    }

    #[test]
    fn test_location_caller() {
        let expected = line!() + 1;
        let loc = Location::caller();
        assert_eq!(loc.file_name(), "logger.rs");
        assert_eq!(loc.line(), expected);
    }

    #[test]
    fn test_line_prefix() {
        let loc = Location::new("tests/log_test.rs", 7);
        assert_eq!(line_prefix(Level::Info, Some(&loc)), "INFO|log_test.rs:7|");
        assert_eq!(line_prefix(Level::Error, None), "ERROR|");
    }

    #[test]
    fn test_new_creates_directory_and_file() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("runtime").join("consoles");
        let config = Config {
            directory: dir.clone(),
            file_name_prefix: "console".to_string(),
            ..Default::default()
        };

        let logger = Logger::new(config).unwrap();

        let expected = dir.join(logger.current_log_file_name());
        assert!(expected.exists());
        assert_eq!(logger.current_path(), Some(expected));
    }

    #[test]
    fn test_current_log_file_name() {
        let (logger, _temp_dir) = create_test_logger();
        let today = Local::now().format("%Y%m%d").to_string();
        assert_eq!(logger.current_log_file_name(), format!("test-{}.log", today));
    }

    #[test]
    fn test_line_format() {
        let (logger, _temp_dir) = create_test_logger();

        let expected_line = line!() + 1;
        logger.log(Level::Debug, &[&12, &"rao", &["q", "w", "e"]]).unwrap();

        let content = read_current(&logger);
        assert!(content.ends_with("12 rao [q w e]\n"));

        // プレフィックスが先頭、タイムスタンプはその後ろ
        let prefix = format!("DEBUG|logger.rs:{}|", expected_line);
        assert_line(content.trim_end_matches('\n'), &prefix, "12 rao [q w e]");
    }

    #[test]
    fn test_write_without_location() {
        let (logger, _temp_dir) = create_test_logger();
        logger.write(Level::Warn, None, &[&"disk", &90]).unwrap();
        assert_line(read_current(&logger).trim_end(), "WARN|", "disk 90");
    }

    #[test]
    fn test_logf_appends_single_newline() {
        let (logger, _temp_dir) = create_test_logger();
        logger
            .logf(Level::Error, format_args!("code={} reason={}", 500, "timeout"))
            .unwrap();
        logger.logf(Level::Info, format_args!("done\n")).unwrap();

        let content = read_current(&logger);
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ERROR|logger.rs:"));
        assert!(lines[0].ends_with(" code=500 reason=timeout"));
        assert!(lines[1].starts_with("INFO|logger.rs:"));
        assert!(lines[1].ends_with(" done"));
    }

    #[test]
    fn test_rotation_on_date_change() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            directory: temp_dir.path().to_path_buf(),
            file_name_prefix: "app".to_string(),
            ..Default::default()
        };
        let day1 = Local.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let day2 = Local.with_ymd_and_hms(2025, 1, 1, 0, 0, 1).unwrap();

        let logger = Logger::new_at(config, &day1).unwrap();
        logger.emit(Level::Info, None, "before", &day1).unwrap();
        logger.emit(Level::Info, None, "after", &day2).unwrap();

        let first = temp_dir.path().join("app-20241231.log");
        let second = temp_dir.path().join("app-20250101.log");
        assert_eq!(logger.current_path(), Some(second.clone()));
        assert_eq!(
            fs::read_to_string(first).unwrap(),
            "INFO|2024/12/31 23:59:59 before\n"
        );
        assert_eq!(
            fs::read_to_string(second).unwrap(),
            "INFO|2025/01/01 00:00:01 after\n"
        );
    }

    #[test]
    fn test_failed_rotation_is_reported_as_write_error() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("logs");
        let config = Config {
            directory: dir.clone(),
            ..Default::default()
        };
        let day1 = Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let day2 = Local.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).unwrap();

        let logger = Logger::new_at(config, &day1).unwrap();
        fs::remove_dir_all(&dir).unwrap();
        fs::write(&dir, b"").unwrap();

        let result = logger.emit(Level::Info, None, "lost", &day2);
        assert!(matches!(result, Err(LogError::Write(_))));
        assert!(logger.current_path().is_none());
    }

    #[test]
    fn test_print_hook_replaces_output() {
        let (logger, _temp_dir) = create_test_logger();
        let hook: PrintHook = Arc::new(|sink: &mut Sink, record: &Record<'_>| {
            let prefix = sink.prefix().to_string();
            writeln!(sink, "[hook] {} {} {}", record.level, prefix, record.message)
        });
        logger.set_print_hook(Some(hook));

        logger.write(Level::Info, None, &[&"hello"]).unwrap();
        assert_eq!(read_current(&logger), "[hook] INFO INFO| hello\n");

        logger.set_print_hook(None);
        logger.write(Level::Info, None, &[&"plain"]).unwrap();
        let content = read_current(&logger);
        let last = content.lines().last().unwrap();
        assert_line(last, "INFO|", "plain");
    }

    #[test]
    fn test_print_hook_from_config() {
        let temp_dir = TempDir::new().unwrap();
        let hook: PrintHook = Arc::new(|sink: &mut Sink, record: &Record<'_>| {
            sink.print(&record.message.to_uppercase())
        });
        let config = Config {
            directory: temp_dir.path().to_path_buf(),
            ..Default::default()
        }
        .with_print_hook(hook);

        let logger = Logger::new(config).unwrap();
        assert!(logger.config().print_hook.is_none());

        logger.write(Level::Debug, None, &[&"quiet"]).unwrap();
        assert_line(read_current(&logger).trim_end(), "DEBUG|", "QUIET");
    }

    #[test]
    fn test_concurrent_writers_keep_lines_intact() {
        let (logger, _temp_dir) = create_test_logger();
        let logger = Arc::new(logger);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    for i in 0..50 {
                        logger.log(Level::Info, &[&"thread", &t, &i]).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let content = read_current(&logger);
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 400);
        assert!(lines
            .iter()
            .all(|line| line.starts_with("INFO|logger.rs:") && line.contains(" thread ")));
    }
}

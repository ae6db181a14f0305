//! レベル別ログマクロ
//!
//! 非書式系（`info!`など）は値をスペース区切りで連結し、書式系（`infof!`など）は
//! `format!`と同じ書式を受け取る。どちらも末尾に改行を付けて1行として出力する。
//! 呼び出し元の`file!()`/`line!()`が行プレフィックスに使われる。

#[doc(hidden)]
#[macro_export]
macro_rules! __daylog_write {
    ($level:expr; $($value:expr),* $(,)?) => {
        $crate::global::write(
            $level,
            $crate::Location::new(::std::file!(), ::std::line!()),
            &[$(&$value as &dyn $crate::LogValue),*],
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __daylog_writef {
    ($level:expr; $($arg:tt)+) => {
        $crate::global::writef(
            $level,
            $crate::Location::new(::std::file!(), ::std::line!()),
            ::std::format_args!($($arg)+),
        )
    };
}

/// DEBUGレベルで値を出力
#[macro_export]
macro_rules! debug {
    ($($value:expr),* $(,)?) => {
        $crate::__daylog_write!($crate::Level::Debug; $($value),*)
    };
}

/// DEBUGレベルで書式付き出力
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)+) => {
        $crate::__daylog_writef!($crate::Level::Debug; $($arg)+)
    };
}

/// INFOレベルで値を出力
///
/// ```no_run
/// daylog::info!(12, "rao", ["q", "w", "e"]);
/// ```
#[macro_export]
macro_rules! info {
    ($($value:expr),* $(,)?) => {
        $crate::__daylog_write!($crate::Level::Info; $($value),*)
    };
}

/// INFOレベルで書式付き出力
#[macro_export]
macro_rules! infof {
    ($($arg:tt)+) => {
        $crate::__daylog_writef!($crate::Level::Info; $($arg)+)
    };
}

/// WARNレベルで値を出力
#[macro_export]
macro_rules! warn {
    ($($value:expr),* $(,)?) => {
        $crate::__daylog_write!($crate::Level::Warn; $($value),*)
    };
}

/// WARNレベルで書式付き出力
#[macro_export]
macro_rules! warnf {
    ($($arg:tt)+) => {
        $crate::__daylog_writef!($crate::Level::Warn; $($arg)+)
    };
}

/// ERRORレベルで値を出力
#[macro_export]
macro_rules! error {
    ($($value:expr),* $(,)?) => {
        $crate::__daylog_write!($crate::Level::Error; $($value),*)
    };
}

/// ERRORレベルで書式付き出力
#[macro_export]
macro_rules! errorf {
    ($($arg:tt)+) => {
        $crate::__daylog_writef!($crate::Level::Error; $($arg)+)
    };
}

/// FATALレベルで値を出力し、プロセスを終了する
#[macro_export]
macro_rules! fatal {
    ($($value:expr),* $(,)?) => {
        $crate::global::fatal(
            $crate::Location::new(::std::file!(), ::std::line!()),
            &[$(&$value as &dyn $crate::LogValue),*],
        )
    };
}

/// FATALレベルで書式付き出力し、プロセスを終了する
#[macro_export]
macro_rules! fatalf {
    ($($arg:tt)+) => {
        $crate::global::fatalf(
            $crate::Location::new(::std::file!(), ::std::line!()),
            ::std::format_args!($($arg)+),
        )
    };
}

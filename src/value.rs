//! ログ値モジュール
//!
//! 非書式系API（`info!(a, b, c)`など）に渡す値の文字列化を定義する。
//! 値はスペース区切りで連結され、スライスや`Vec`は`[a b c]`の形で出力される。

use std::borrow::Cow;
use std::fmt::{self, Write};
use std::path::{Path, PathBuf};

/// ログに出力できる値
pub trait LogValue {
    /// 値を`out`の末尾に書き出す
    fn render(&self, out: &mut String);
}

/// `Display`を実装する任意の値をログ値として扱うラッパー
#[derive(Debug, Clone, Copy)]
pub struct Shown<T>(pub T);

impl<T: fmt::Display> LogValue for Shown<T> {
    fn render(&self, out: &mut String) {
        let _ = write!(out, "{}", self.0);
    }
}

macro_rules! impl_log_value_via_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl LogValue for $ty {
                fn render(&self, out: &mut String) {
                    let _ = write!(out, "{}", self);
                }
            }
        )*
    };
}

impl_log_value_via_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, str,
    String,
);

impl LogValue for Cow<'_, str> {
    fn render(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl LogValue for fmt::Arguments<'_> {
    fn render(&self, out: &mut String) {
        let _ = out.write_fmt(*self);
    }
}

impl LogValue for Path {
    fn render(&self, out: &mut String) {
        let _ = write!(out, "{}", self.display());
    }
}

impl LogValue for PathBuf {
    fn render(&self, out: &mut String) {
        self.as_path().render(out);
    }
}

impl<T: LogValue + ?Sized> LogValue for &T {
    fn render(&self, out: &mut String) {
        (**self).render(out);
    }
}

impl<T: LogValue> LogValue for Option<T> {
    fn render(&self, out: &mut String) {
        match self {
            Some(value) => value.render(out),
            None => out.push_str("<nil>"),
        }
    }
}

impl<T: LogValue> LogValue for [T] {
    fn render(&self, out: &mut String) {
        out.push('[');
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            item.render(out);
        }
        out.push(']');
    }
}

impl<T: LogValue, const N: usize> LogValue for [T; N] {
    fn render(&self, out: &mut String) {
        self.as_slice().render(out);
    }
}

impl<T: LogValue> LogValue for Vec<T> {
    fn render(&self, out: &mut String) {
        self.as_slice().render(out);
    }
}

/// 値をスペース区切りで連結
pub fn join_values(values: &[&dyn LogValue]) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        value.render(&mut out);
    }
    out
}

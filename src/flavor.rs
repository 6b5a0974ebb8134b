//! SQL Flavor（方言）：决定标识符引号与字面量转义规则，是内置的 [`Escaper`] 实现。

use crate::error::{RenderError, RenderResult};
use crate::escaper::{Escaper, EscaperRef};
use crate::value::SqlValue;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard};
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    /// 反引号标识符，反斜杠转义字符串（MySQL / MariaDB）。
    #[default]
    MySQL,
    PostgreSQL,
    SQLite,
}

static DEFAULT_FLAVOR: AtomicU8 = AtomicU8::new(Flavor::MySQL as u8);
static DEFAULT_FLAVOR_LOCK: Mutex<()> = Mutex::new(());

impl Flavor {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::PostgreSQL,
            2 => Self::SQLite,
            _ => Self::MySQL,
        }
    }

    fn to_u8(self) -> u8 {
        self as u8
    }

    /// 以当前 flavor 构造一个共享 escaper 句柄。
    pub fn escaper(self) -> EscaperRef {
        Rc::new(self)
    }
}

/// 获取当前全局默认 Flavor。
pub fn default_flavor() -> Flavor {
    Flavor::from_u8(DEFAULT_FLAVOR.load(Ordering::Relaxed))
}

/// 设置全局默认 Flavor，返回旧值。
pub fn set_default_flavor(flavor: Flavor) -> Flavor {
    let old = DEFAULT_FLAVOR.swap(flavor.to_u8(), Ordering::Relaxed);
    Flavor::from_u8(old)
}

/// 修改全局默认 Flavor 的 RAII guard（持有全局锁，避免并行测试互相干扰）。
pub struct DefaultFlavorGuard {
    _lock: MutexGuard<'static, ()>,
    old: Flavor,
}

impl Drop for DefaultFlavorGuard {
    fn drop(&mut self) {
        set_default_flavor(self.old);
    }
}

/// 在一个作用域内临时设置 DefaultFlavor，退出作用域后自动恢复。
pub fn set_default_flavor_scoped(flavor: Flavor) -> DefaultFlavorGuard {
    let lock = DEFAULT_FLAVOR_LOCK
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let old = set_default_flavor(flavor);
    DefaultFlavorGuard { _lock: lock, old }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MySQL => "MySQL",
            Self::PostgreSQL => "PostgreSQL",
            Self::SQLite => "SQLite",
        };
        f.write_str(s)
    }
}

impl Escaper for Flavor {
    fn escape_identifier(&self, name: &str) -> String {
        let q = match self {
            Self::MySQL => '`',
            Self::PostgreSQL | Self::SQLite => '"',
        };
        let mut out = String::with_capacity(name.len() + 2);
        out.push(q);
        for ch in name.chars() {
            if ch == q {
                out.push(q);
            }
            out.push(ch);
        }
        out.push(q);
        out
    }

    fn quote(&self, value: &SqlValue) -> RenderResult<String> {
        let mut out = String::new();
        encode_sql_value(&mut out, value, *self)?;
        Ok(out)
    }
}

const DATETIME_FORMAT: &[FormatItem<'static>] =
    format_description!("'[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]'");

const DATETIME_OFFSET_FORMAT: &[FormatItem<'static>] = format_description!(
    "'[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6] [offset_hour sign:mandatory]:[offset_minute]'"
);

fn encode_sql_value(out: &mut String, v: &SqlValue, flavor: Flavor) -> RenderResult<()> {
    match v {
        SqlValue::Null => out.push_str("NULL"),
        SqlValue::Bool(b) => out.push_str(if *b { "TRUE" } else { "FALSE" }),
        SqlValue::I64(n) => out.push_str(&n.to_string()),
        SqlValue::U64(n) => out.push_str(&n.to_string()),
        // NaN / inf 没有对应的 SQL 字面量
        SqlValue::F64(n) if !n.is_finite() => out.push_str("NULL"),
        SqlValue::F64(n) => out.push_str(&n.to_string()),
        SqlValue::String(s) => quote_string(out, s.as_ref(), flavor),
        SqlValue::Bytes(b) => encode_bytes(out, b),
        SqlValue::DateTime(dt) => encode_datetime(out, dt, flavor)?,
    }
    Ok(())
}

fn encode_bytes(out: &mut String, data: &[u8]) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    if data.is_empty() {
        out.push_str("NULL");
        return;
    }
    out.push_str("X'");
    for &b in data {
        out.push(HEX[((b >> 4) & 0xF) as usize] as char);
        out.push(HEX[(b & 0xF) as usize] as char);
    }
    out.push('\'');
}

fn quote_string(out: &mut String, s: &str, flavor: Flavor) {
    if flavor == Flavor::SQLite {
        // SQLite 不认反斜杠转义，只能把单引号成对写出。
        out.push('\'');
        out.push_str(&s.replace('\'', "''"));
        out.push('\'');
        return;
    }

    if flavor == Flavor::PostgreSQL {
        out.push('E');
    }
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\u{0000}' => out.push_str("\\0"),
            '\u{0008}' => out.push_str("\\b"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{001a}' => out.push_str("\\Z"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
}

/// MySQL / SQLite：`'YYYY-MM-DD HH:MM:SS.ffffff'`（本地时间，不带时区）；
/// PostgreSQL 额外带上偏移：`'... ffffff +08:00'`。
fn encode_datetime(out: &mut String, dt: &OffsetDateTime, flavor: Flavor) -> RenderResult<()> {
    // 四舍五入到微秒：+500ns 后截断
    let dt = dt.checked_add(Duration::nanoseconds(500)).unwrap_or(*dt);
    let format = match flavor {
        Flavor::PostgreSQL => DATETIME_OFFSET_FORMAT,
        Flavor::MySQL | Flavor::SQLite => DATETIME_FORMAT,
    };
    let text = dt
        .format(format)
        .map_err(|e| RenderError::InvalidDateTime(e.to_string()))?;
    out.push_str(&text);
    Ok(())
}

//! 内置标量函数：每个函数返回一个新的延迟 producer。
//!
//! 参数在外层函数自身被渲染时才渲染，因此函数结果可以继续作为其它函数或条件的操作数。
//! `cast` 的目标类型与 `trim` 的修饰词在调用时立即校验。
//!
//! 参考：<https://mariadb.com/kb/en/built-in-functions/>

use crate::error::{ArgumentError, RenderResult};
use crate::escaper::Escaper;
use crate::operand::{Operand, render_operands};
use crate::subquery::{Producer, Subquery};
use std::fmt;
use std::str::FromStr;

/// `CAST(expr AS type)` 支持的目标类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastType {
    Binary,
    Char,
    Date,
    DateTime,
    Double,
    Float,
    Integer,
    UnsignedInteger,
    Time,
    Varchar,
}

impl CastType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "BINARY",
            Self::Char => "CHAR",
            Self::Date => "DATE",
            Self::DateTime => "DATETIME",
            Self::Double => "DOUBLE",
            Self::Float => "FLOAT",
            Self::Integer => "INTEGER",
            Self::UnsignedInteger => "UNSIGNED INTEGER",
            Self::Time => "TIME",
            Self::Varchar => "VARCHAR",
        }
    }
}

impl FromStr for CastType {
    type Err = ArgumentError;

    /// 大小写不敏感。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.trim().to_ascii_uppercase().as_str() {
            "BINARY" => Self::Binary,
            "CHAR" => Self::Char,
            "DATE" => Self::Date,
            "DATETIME" => Self::DateTime,
            "DOUBLE" => Self::Double,
            "FLOAT" => Self::Float,
            "INTEGER" => Self::Integer,
            "UNSIGNED INTEGER" => Self::UnsignedInteger,
            "TIME" => Self::Time,
            "VARCHAR" => Self::Varchar,
            _ => return Err(ArgumentError::InvalidCastType(s.to_string())),
        };
        Ok(ty)
    }
}

impl fmt::Display for CastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `TRIM` 的修饰词。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimSpecifier {
    Both,
    Leading,
    Trailing,
}

impl TrimSpecifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Both => "BOTH",
            Self::Leading => "LEADING",
            Self::Trailing => "TRAILING",
        }
    }
}

impl FromStr for TrimSpecifier {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BOTH" => Ok(Self::Both),
            "LEADING" => Ok(Self::Leading),
            "TRAILING" => Ok(Self::Trailing),
            _ => Err(ArgumentError::InvalidTrimSpecifier(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
enum CallShape {
    /// `NAME(a, b, ...)`
    Args,
    /// `CAST(a AS TYPE)`
    Cast(CastType),
    /// `TRIM([SPEC] [remstr] FROM str)`
    Trim {
        specifier: Option<TrimSpecifier>,
        remove: Option<Operand>,
    },
}

#[derive(Debug, Clone)]
struct FunctionCall {
    name: &'static str,
    args: Vec<Operand>,
    shape: CallShape,
}

impl FunctionCall {
    fn new(name: &'static str, args: Vec<Operand>) -> Self {
        Self {
            name,
            args,
            shape: CallShape::Args,
        }
    }

    fn into_subquery(self) -> Subquery {
        Subquery::from_producer(self)
    }
}

impl Producer for FunctionCall {
    fn produce(&self, escaper: &dyn Escaper) -> RenderResult<String> {
        let args = render_operands(&self.args, escaper)?;
        let body = match &self.shape {
            CallShape::Args => args,
            CallShape::Cast(ty) => format!("{args} AS {ty}"),
            CallShape::Trim { specifier, remove } => {
                let mut head = Vec::with_capacity(2);
                if let Some(spec) = specifier {
                    head.push(spec.as_str().to_string());
                }
                if let Some(remove) = remove {
                    head.push(remove.render(escaper)?);
                }
                if head.is_empty() {
                    args
                } else {
                    format!("{} FROM {args}", head.join(" "))
                }
            }
        };
        Ok(format!("{}({body})", self.name))
    }
}

/// 原样返回 `text` 的 producer；调用方必须保证文本本身安全。
pub fn same(text: impl Into<String>) -> Subquery {
    let text = text.into();
    Subquery::new(move |_| text.clone())
}

/// `CONCAT(v1, v2, ...)`
pub fn concat(
    value1: impl Into<Operand>,
    value2: impl Into<Operand>,
    more: impl IntoIterator<Item = Operand>,
) -> Subquery {
    let mut args = vec![value1.into(), value2.into()];
    args.extend(more);
    FunctionCall::new("CONCAT", args).into_subquery()
}

/// `CONCAT_WS(separator, v1, ...)`
pub fn concat_ws(
    separator: impl Into<Operand>,
    values: impl IntoIterator<Item = Operand>,
) -> Subquery {
    let mut args = vec![separator.into()];
    args.extend(values);
    FunctionCall::new("CONCAT_WS", args).into_subquery()
}

pub fn hex(value: impl Into<Operand>) -> Subquery {
    FunctionCall::new("HEX", vec![value.into()]).into_subquery()
}

pub fn unhex(value: impl Into<Operand>) -> Subquery {
    FunctionCall::new("UNHEX", vec![value.into()]).into_subquery()
}

pub fn lower(value: impl Into<Operand>) -> Subquery {
    FunctionCall::new("LOWER", vec![value.into()]).into_subquery()
}

pub fn upper(value: impl Into<Operand>) -> Subquery {
    FunctionCall::new("UPPER", vec![value.into()]).into_subquery()
}

pub fn length(value: impl Into<Operand>) -> Subquery {
    FunctionCall::new("LENGTH", vec![value.into()]).into_subquery()
}

pub fn md5(value: impl Into<Operand>) -> Subquery {
    FunctionCall::new("MD5", vec![value.into()]).into_subquery()
}

/// `COALESCE(v1, ...)`：返回第一个非 NULL 参数。
pub fn coalesce(values: impl IntoIterator<Item = Operand>) -> Subquery {
    FunctionCall::new("COALESCE", values.into_iter().collect()).into_subquery()
}

pub fn if_null(value: impl Into<Operand>, fallback: impl Into<Operand>) -> Subquery {
    FunctionCall::new("IFNULL", vec![value.into(), fallback.into()]).into_subquery()
}

/// `NOW()` 或带小数秒精度的 `NOW(p)`。
pub fn now(precision: impl Into<Option<u8>>) -> Subquery {
    let args = precision
        .into()
        .map(|p| vec![Operand::from(p)])
        .unwrap_or_default();
    FunctionCall::new("NOW", args).into_subquery()
}

pub fn uuid() -> Subquery {
    FunctionCall::new("UUID", Vec::new()).into_subquery()
}

/// `CAST(value AS type)`；`ty` 不在白名单内时立即返回错误。
pub fn cast(value: impl Into<Operand>, ty: &str) -> Result<Subquery, ArgumentError> {
    let ty: CastType = ty.parse()?;
    Ok(FunctionCall {
        name: "CAST",
        args: vec![value.into()],
        shape: CallShape::Cast(ty),
    }
    .into_subquery())
}

/// `TRIM([{BOTH | LEADING | TRAILING}] [remstr] FROM str)`；修饰词在调用时校验。
pub fn trim(
    value: impl Into<Operand>,
    specifier: Option<&str>,
    remove: Option<Operand>,
) -> Result<Subquery, ArgumentError> {
    let specifier = specifier.map(str::parse::<TrimSpecifier>).transpose()?;
    Ok(FunctionCall {
        name: "TRIM",
        args: vec![value.into()],
        shape: CallShape::Trim { specifier, remove },
    }
    .into_subquery())
}

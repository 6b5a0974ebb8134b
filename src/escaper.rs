//! Escaper：标识符与字面量的转义能力。
//!
//! 语句在构造时拿到一个 `Rc<dyn Escaper>`，之后整个生命周期都不会再替换；
//! 延迟 producer 渲染时也只会收到这个能力对象，不会接触全局状态。

use crate::error::RenderResult;
use crate::value::SqlValue;
use std::fmt;
use std::rc::Rc;

/// 共享的 escaper 句柄。
pub type EscaperRef = Rc<dyn Escaper>;

pub trait Escaper: fmt::Debug {
    /// 为单个标识符加引号，并转义内部的引号字符。
    fn escape_identifier(&self, name: &str) -> String;

    /// 把标量渲染成类型正确的 SQL 字面量。
    fn quote(&self, value: &SqlValue) -> RenderResult<String>;

    /// 保护一个可能带 `.` 的标识符：`*` 原样保留，其余部分逐段 escape。
    fn protect_identifier(&self, name: &str) -> String {
        if name == "*" {
            return name.to_string();
        }
        name.split('.')
            .map(|part| {
                if part == "*" {
                    part.to_string()
                } else {
                    self.escape_identifier(part)
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

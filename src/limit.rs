//! LimitClause：行数与偏移。

use crate::error::{RenderError, RenderResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LimitClause {
    bounds: Option<(i64, Option<i64>)>,
}

impl LimitClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// 后一次调用覆盖前一次；边界在渲染时才检查。
    pub fn set(&mut self, count: i64, offset: Option<i64>) -> &mut Self {
        self.bounds = Some((count, offset));
        self
    }

    pub fn is_set(&self) -> bool {
        self.bounds.is_some()
    }

    /// ` LIMIT n` 或 ` LIMIT n OFFSET m`；从未设置时返回 `None`。
    ///
    /// `offset` 显式给出 0 视为非法，不需要偏移的调用方应直接省略。
    pub fn render(&self) -> RenderResult<Option<String>> {
        let Some((count, offset)) = self.bounds else {
            return Ok(None);
        };
        if count < 1 {
            return Err(RenderError::LimitOutOfRange(count));
        }
        let mut out = format!(" LIMIT {count}");
        if let Some(offset) = offset {
            if offset < 1 {
                return Err(RenderError::OffsetOutOfRange(offset));
            }
            out.push_str(&format!(" OFFSET {offset}"));
        }
        Ok(Some(out))
    }
}

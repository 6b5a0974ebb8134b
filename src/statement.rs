//! Statement：所有语句共享的渲染入口与标识符工具。

use crate::error::{ArgumentError, RenderResult};
use crate::escaper::Escaper;
use crate::operand::Column;
use crate::subquery::Subquery;

const RENDER_TARGET: &str = "halo_composer::render";

/// 可渲染成最终 SQL 文本的语句。
pub trait Statement {
    /// 构造时绑定的 escaper。
    fn escaper(&self) -> &dyn Escaper;

    /// 渲染整条语句；任何一处失败都不返回部分 SQL。
    fn sql(&self) -> RenderResult<String>;

    fn render_identifier(&self, column: &Column) -> RenderResult<String> {
        column.render(self.escaper())
    }

    fn render_aliased_identifier(&self, aliased: &Aliased) -> RenderResult<String> {
        aliased.render(self.escaper())
    }

    fn subquery(&self, subquery: &Subquery) -> RenderResult<String> {
        subquery.render(self.escaper())
    }
}

/// 可带别名的标识符：`<column> AS `alias``。
#[derive(Debug, Clone)]
pub struct Aliased {
    column: Column,
    alias: Option<String>,
}

impl Aliased {
    pub fn new(column: impl Into<Column>) -> Self {
        Self {
            column: column.into(),
            alias: None,
        }
    }

    pub fn with_alias(alias: impl Into<String>, column: impl Into<Column>) -> Self {
        Self {
            column: column.into(),
            alias: Some(alias.into()),
        }
    }

    /// 从 `alias => column` 映射构造；映射必须恰好一个 key，否则立即报错。
    pub fn from_mapping<K, V>(mapping: impl IntoIterator<Item = (K, V)>) -> Result<Self, ArgumentError>
    where
        K: Into<String>,
        V: Into<Column>,
    {
        let mut entries = mapping.into_iter();
        match (entries.next(), entries.next()) {
            (Some((alias, column)), None) => Ok(Self::with_alias(alias, column)),
            (None, _) => Err(ArgumentError::AliasKeys(0)),
            (Some(_), Some(_)) => Err(ArgumentError::AliasKeys(2 + entries.count())),
        }
    }

    pub fn column(&self) -> &Column {
        &self.column
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn render(&self, escaper: &dyn Escaper) -> RenderResult<String> {
        let column = self.column.render(escaper)?;
        Ok(match &self.alias {
            Some(alias) => format!("{column} AS {}", escaper.escape_identifier(alias)),
            None => column,
        })
    }
}

/// [`Aliased::from_mapping`] 的简写。
pub fn aliased<K, V>(mapping: impl IntoIterator<Item = (K, V)>) -> Result<Aliased, ArgumentError>
where
    K: Into<String>,
    V: Into<Column>,
{
    Aliased::from_mapping(mapping)
}

impl From<Column> for Aliased {
    fn from(v: Column) -> Self {
        Self::new(v)
    }
}

impl From<&str> for Aliased {
    fn from(v: &str) -> Self {
        Self::new(v)
    }
}

impl From<String> for Aliased {
    fn from(v: String) -> Self {
        Self::new(v)
    }
}

impl From<Subquery> for Aliased {
    fn from(v: Subquery) -> Self {
        Self::new(v)
    }
}

/// 记录一次语句渲染的结果并原样返回。
pub(crate) fn traced(statement: &'static str, result: RenderResult<String>) -> RenderResult<String> {
    match &result {
        Ok(sql) => tracing::trace!(target: RENDER_TARGET, statement, sql = %sql, "rendered statement"),
        Err(err) => tracing::debug!(target: RENDER_TARGET, statement, error = %err, "statement render failed"),
    }
    result
}

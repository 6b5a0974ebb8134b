//! 错误类型：构造期（eager）与渲染期（lazy）两层。
//!
//! - [`ArgumentError`]：调用当下即可判定的静态形状错误（CAST 类型、TRIM 修饰、别名映射）。
//! - [`RenderError`]：依赖整棵子句状态的错误，只在 `sql()` / `render()` 时抛出。

/// 构造期错误：在引入非法形状的那一次调用上立即返回。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("Invalid CAST type: {0}")]
    InvalidCastType(String),
    #[error("Invalid TRIM specifier: {0}")]
    InvalidTrimSpecifier(String),
    /// 别名映射必须恰好一个 key；字段记录实际 key 数量。
    #[error("Aliased column must have only 1 key")]
    AliasKeys(usize),
}

/// 渲染期错误：整条语句渲染失败，不返回任何部分 SQL。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid comparison operator: {0}")]
    InvalidOperator(String),
    #[error("Operator {operator} must have {expected} value(s), {actual} given")]
    OperandCount {
        operator: String,
        expected: &'static str,
        actual: usize,
    },
    #[error("LIMIT must be greater than 0")]
    LimitOutOfRange(i64),
    #[error("LIMIT OFFSET must be greater than 0")]
    OffsetOutOfRange(i64),
    #[error("References must be set")]
    MissingReferences,
    #[error("SELECT must be set")]
    MissingTerminal,
    #[error("Invalid option: {0}")]
    InvalidOption(String),
    /// 日期时间字面量无法按 flavor 的格式输出。
    #[error("Invalid datetime literal: {0}")]
    InvalidDateTime(String),
    /// 延迟 producer 自己报告的失败。
    #[error("subquery producer failed: {0}")]
    Producer(String),
}

impl RenderError {
    /// 把任意错误信息包装成 producer 失败，方便在闭包里用 `map_err`。
    pub fn producer(msg: impl std::fmt::Display) -> Self {
        Self::Producer(msg.to_string())
    }
}

pub type RenderResult<T> = Result<T, RenderError>;

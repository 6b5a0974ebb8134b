//! ConditionClause：WHERE / HAVING 条件引擎。
//!
//! 追加时不做任何校验；运算符白名单与操作数个数都在渲染时检查，
//! 所以链式调用的顺序可以随意，只有真正被渲染的那条语句会报错。

use crate::error::{RenderError, RenderResult};
use crate::escaper::Escaper;
use crate::operand::{Column, Operand, render_operands};

/// 连接相邻谓词的关键字。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glue {
    And,
    Or,
}

impl Glue {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// 运算符白名单。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NullSafeEqual,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
    NotBetween,
    IsNull,
    IsNotNull,
}

/// 运算符需要的操作数个数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    fn accepts(self, n: usize) -> bool {
        match self {
            Self::Exactly(want) => n == want,
            Self::AtLeast(min) => n >= min,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::Exactly(0) => "exactly 0",
            Self::Exactly(1) => "exactly 1",
            Self::Exactly(2) => "exactly 2",
            Self::Exactly(_) => "a fixed number of",
            Self::AtLeast(_) => "1 or more",
        }
    }
}

impl Operator {
    /// 解析运算符 token：大小写不敏感，多个空白视为一个。
    pub fn parse(token: &str) -> Option<Self> {
        let normalized = token
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();
        let op = match normalized.as_str() {
            "=" => Self::Equal,
            "<=>" => Self::NullSafeEqual,
            "!=" => Self::NotEqual,
            "<" => Self::LessThan,
            "<=" => Self::LessThanOrEqual,
            ">" => Self::GreaterThan,
            ">=" => Self::GreaterThanOrEqual,
            "LIKE" => Self::Like,
            "NOT LIKE" => Self::NotLike,
            "IN" => Self::In,
            "NOT IN" => Self::NotIn,
            "BETWEEN" => Self::Between,
            "NOT BETWEEN" => Self::NotBetween,
            "IS NULL" => Self::IsNull,
            "IS NOT NULL" => Self::IsNotNull,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NullSafeEqual => "<=>",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Between => "BETWEEN",
            Self::NotBetween => "NOT BETWEEN",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Self::In | Self::NotIn => Arity::AtLeast(1),
            Self::Between | Self::NotBetween => Arity::Exactly(2),
            Self::IsNull | Self::IsNotNull => Arity::Exactly(0),
            _ => Arity::Exactly(1),
        }
    }

    /// 按运算符形状拼出操作数后缀（含前导空格）。
    fn render_operands(self, operands: &[Operand], escaper: &dyn Escaper) -> RenderResult<String> {
        let out = match self {
            Self::In | Self::NotIn => format!(" ({})", render_operands(operands, escaper)?),
            Self::Between | Self::NotBetween => format!(
                " {} AND {}",
                operands[0].render(escaper)?,
                operands[1].render(escaper)?
            ),
            Self::IsNull | Self::IsNotNull => String::new(),
            _ => format!(" {}", operands[0].render(escaper)?),
        };
        Ok(out)
    }
}

/// 一个布尔测试。`operator` 保留调用方给的原始 token，渲染时才解析。
#[derive(Debug, Clone)]
pub struct Predicate {
    pub glue: Glue,
    pub column: Column,
    pub operator: String,
    pub operands: Vec<Operand>,
}

impl Predicate {
    fn render(&self, escaper: &dyn Escaper) -> RenderResult<String> {
        let op = Operator::parse(&self.operator)
            .ok_or_else(|| RenderError::InvalidOperator(self.operator.clone()))?;
        let arity = op.arity();
        if !arity.accepts(self.operands.len()) {
            return Err(RenderError::OperandCount {
                operator: op.as_str().to_string(),
                expected: arity.describe(),
                actual: self.operands.len(),
            });
        }
        let column = self.column.render(escaper)?;
        let values = op.render_operands(&self.operands, escaper)?;
        Ok(format!("{column} {}{values}", op.as_str()))
    }
}

/// 子句关键字。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    Where,
    Having,
}

impl ClauseKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Where => "WHERE",
            Self::Having => "HAVING",
        }
    }
}

/// 有序谓词列表，只能追加。
#[derive(Debug, Clone)]
pub struct ConditionClause {
    kind: ClauseKind,
    predicates: Vec<Predicate>,
}

impl ConditionClause {
    pub fn new(kind: ClauseKind) -> Self {
        Self {
            kind,
            predicates: Vec::new(),
        }
    }

    pub fn kind(&self) -> ClauseKind {
        self.kind
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// 追加一个谓词；所有便捷方法最终都走这里。
    pub fn add_predicate<V>(
        &mut self,
        glue: Glue,
        column: impl Into<Column>,
        operator: impl Into<String>,
        operands: impl IntoIterator<Item = V>,
    ) -> &mut Self
    where
        V: Into<Operand>,
    {
        self.predicates.push(Predicate {
            glue,
            column: column.into(),
            operator: operator.into(),
            operands: operands.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// 只渲染谓词部分（不带关键字）；没有谓词时返回 `None`。
    pub fn render_conditions(&self, escaper: &dyn Escaper) -> RenderResult<Option<String>> {
        if self.predicates.is_empty() {
            return Ok(None);
        }
        let mut out = String::new();
        for (i, p) in self.predicates.iter().enumerate() {
            if i > 0 {
                out.push(' ');
                out.push_str(p.glue.as_str());
                out.push(' ');
            }
            out.push_str(&p.render(escaper)?);
        }
        Ok(Some(out))
    }

    /// 渲染完整子句：` WHERE ...` / ` HAVING ...`；没有谓词时整个子句省略。
    pub fn render(&self, escaper: &dyn Escaper) -> RenderResult<Option<String>> {
        Ok(self
            .render_conditions(escaper)?
            .map(|body| format!(" {} {body}", self.kind.keyword())))
    }
}

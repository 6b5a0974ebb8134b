//! halo-sql-composer：延迟渲染、防注入的 SQL 语句组合库。
//!
//! 所有 builder 调用只追加内部状态；`sql()` 时才自底向上渲染：
//! 值 → 条件 → 子句 → 语句。渲染过程不做任何 I/O。

pub mod condition;
pub mod cte;
pub mod error;
pub mod escaper;
pub mod flavor;
pub mod functions;
#[cfg(test)]
mod functions_tests;
pub mod limit;
pub mod macros;
pub mod operand;
pub mod select;
pub mod statement;
#[cfg(test)]
mod statement_tests;
pub mod subquery;
pub mod value;

pub use crate::condition::{Arity, ClauseKind, ConditionClause, Glue, Operator, Predicate};
pub use crate::cte::{With, WithOption};
pub use crate::error::{ArgumentError, RenderError, RenderResult};
pub use crate::escaper::{Escaper, EscaperRef};
pub use crate::flavor::{DefaultFlavorGuard, Flavor, default_flavor, set_default_flavor, set_default_flavor_scoped};
pub use crate::functions::{CastType, TrimSpecifier};
pub use crate::limit::LimitClause;
pub use crate::operand::{Column, Operand};
pub use crate::select::{Order, Select};
pub use crate::statement::{Aliased, Statement, aliased};
pub use crate::subquery::{Producer, Subquery};
pub use crate::value::SqlValue;

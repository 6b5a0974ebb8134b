//! 操作数与列：ValueRenderer 的两种输入。

use crate::error::RenderResult;
use crate::escaper::Escaper;
use crate::subquery::Subquery;
use crate::value::SqlValue;

/// 条件或函数的一个参数：字面量，或延迟子查询。
#[derive(Debug, Clone)]
pub enum Operand {
    Value(SqlValue),
    Subquery(Subquery),
}

impl Operand {
    /// 字面量交给 escaper 的 quote；子查询求值后无条件加括号。
    pub fn render(&self, escaper: &dyn Escaper) -> RenderResult<String> {
        match self {
            Self::Value(v) => escaper.quote(v),
            Self::Subquery(sq) => sq.render(escaper),
        }
    }
}

/// 依次渲染并用 `, ` 连接。
pub(crate) fn render_operands(operands: &[Operand], escaper: &dyn Escaper) -> RenderResult<String> {
    let rendered = operands
        .iter()
        .map(|o| o.render(escaper))
        .collect::<RenderResult<Vec<_>>>()?;
    Ok(rendered.join(", "))
}

impl From<SqlValue> for Operand {
    fn from(v: SqlValue) -> Self {
        Self::Value(v)
    }
}

impl From<Subquery> for Operand {
    fn from(v: Subquery) -> Self {
        Self::Subquery(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        Self::Value(SqlValue::from_option(v))
    }
}

macro_rules! impl_operand_from_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Operand {
                fn from(v: $t) -> Self {
                    Self::Value(v.into())
                }
            }
        )*
    };
}

impl_operand_from_value!(
    (),
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &'static str,
    Vec<u8>,
    time::OffsetDateTime,
);

/// 条件左侧：列名，或者一个派生列子查询。
#[derive(Debug, Clone)]
pub enum Column {
    Name(String),
    Subquery(Subquery),
}

impl Column {
    /// 列名走 `protect_identifier`；子查询与操作数一样加括号。
    pub fn render(&self, escaper: &dyn Escaper) -> RenderResult<String> {
        match self {
            Self::Name(name) => Ok(escaper.protect_identifier(name)),
            Self::Subquery(sq) => sq.render(escaper),
        }
    }
}

impl From<&str> for Column {
    fn from(v: &str) -> Self {
        Self::Name(v.to_string())
    }
}

impl From<String> for Column {
    fn from(v: String) -> Self {
        Self::Name(v)
    }
}

impl From<Subquery> for Column {
    fn from(v: Subquery) -> Self {
        Self::Subquery(v)
    }
}

#[cfg(test)]
mod tests {
    use super::{Column, Operand, render_operands};
    use crate::escaper::Escaper;
    use crate::flavor::Flavor;
    use crate::subquery::Subquery;
    use pretty_assertions::assert_eq;

    #[test]
    fn literals_render_type_correct() {
        let e = Flavor::MySQL;
        let values: Vec<Operand> = vec![
            Subquery::try_new(|e: &dyn Escaper| Ok(format!("Select {}", e.quote(&"';hahah".into())?)))
                .into(),
            1.into(),
            1.618.into(),
            "boo".into(),
            ().into(),
            true.into(),
        ];
        assert_eq!(
            render_operands(&values, &e).unwrap(),
            "(Select '\\';hahah'), 1, 1.618, 'boo', NULL, TRUE"
        );
    }

    #[test]
    fn option_operand() {
        let e = Flavor::MySQL;
        assert_eq!(Operand::from(None::<i64>).render(&e).unwrap(), "NULL");
        assert_eq!(Operand::from(Some(3_i64)).render(&e).unwrap(), "3");
    }

    #[test]
    fn column_name_and_subquery() {
        let e = Flavor::MySQL;
        assert_eq!(Column::from("name`").render(&e).unwrap(), "`name```");
        assert_eq!(Column::from("t.id").render(&e).unwrap(), "`t`.`id`");
        let sq = Subquery::new(|e: &dyn Escaper| format!("SELECT * from {}", e.escape_identifier("foo")));
        assert_eq!(
            Column::from(sq).render(&e).unwrap(),
            "(SELECT * from `foo`)"
        );
    }
}

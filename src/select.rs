//! Select：组合 SELECT 语句，WHERE / HAVING / LIMIT 由条件引擎与 LimitClause 渲染。

use crate::condition::{ClauseKind, ConditionClause};
use crate::error::RenderResult;
use crate::escaper::{Escaper, EscaperRef};
use crate::flavor::default_flavor;
use crate::limit::LimitClause;
use crate::macros::impl_condition_methods;
use crate::operand::{Column, Operand};
use crate::statement::{Aliased, Statement, traced};
use crate::subquery::{Producer, Subquery};

/// ORDER BY 方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Select {
    escaper: EscaperRef,
    distinct: bool,
    columns: Vec<Aliased>,
    tables: Vec<Aliased>,
    where_clause: ConditionClause,
    group_by_cols: Vec<Column>,
    having_clause: ConditionClause,
    order_by_cols: Vec<(Column, Option<Order>)>,
    limit: LimitClause,
}

impl Default for Select {
    fn default() -> Self {
        Self::new()
    }
}

impl Select {
    /// 使用当前默认 flavor 作为 escaper。
    pub fn new() -> Self {
        Self::with_escaper(default_flavor().escaper())
    }

    pub fn with_escaper(escaper: EscaperRef) -> Self {
        Self {
            escaper,
            distinct: false,
            columns: Vec::new(),
            tables: Vec::new(),
            where_clause: ConditionClause::new(ClauseKind::Where),
            group_by_cols: Vec::new(),
            having_clause: ConditionClause::new(ClauseKind::Having),
            order_by_cols: Vec::new(),
            limit: LimitClause::new(),
        }
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    /// 追加选择列；不调用时渲染为 `*`。
    pub fn columns<T>(&mut self, cols: impl IntoIterator<Item = T>) -> &mut Self
    where
        T: Into<Aliased>,
    {
        self.columns.extend(cols.into_iter().map(Into::into));
        self
    }

    pub fn from<T>(&mut self, tables: impl IntoIterator<Item = T>) -> &mut Self
    where
        T: Into<Aliased>,
    {
        self.tables.extend(tables.into_iter().map(Into::into));
        self
    }

    pub fn group_by<T>(&mut self, cols: impl IntoIterator<Item = T>) -> &mut Self
    where
        T: Into<Column>,
    {
        self.group_by_cols.extend(cols.into_iter().map(Into::into));
        self
    }

    pub fn order_by(&mut self, col: impl Into<Column>) -> &mut Self {
        self.order_by_cols.push((col.into(), None));
        self
    }

    pub fn order_by_asc(&mut self, col: impl Into<Column>) -> &mut Self {
        self.order_by_cols.push((col.into(), Some(Order::Asc)));
        self
    }

    pub fn order_by_desc(&mut self, col: impl Into<Column>) -> &mut Self {
        self.order_by_cols.push((col.into(), Some(Order::Desc)));
        self
    }

    /// 设置 LIMIT（可带 OFFSET）；再次调用会覆盖，边界在渲染时检查。
    pub fn limit(&mut self, count: i64, offset: impl Into<Option<i64>>) -> &mut Self {
        self.limit.set(count, offset.into());
        self
    }

    pub fn where_clause(&self) -> &ConditionClause {
        &self.where_clause
    }

    pub fn having_clause(&self) -> &ConditionClause {
        &self.having_clause
    }

    fn render_columns(&self) -> RenderResult<String> {
        if self.columns.is_empty() {
            return Ok("*".to_string());
        }
        let cols = self
            .columns
            .iter()
            .map(|c| c.render(self.escaper.as_ref()))
            .collect::<RenderResult<Vec<_>>>()?;
        Ok(cols.join(", "))
    }

    fn render_from(&self) -> RenderResult<Option<String>> {
        if self.tables.is_empty() {
            return Ok(None);
        }
        let tables = self
            .tables
            .iter()
            .map(|t| t.render(self.escaper.as_ref()))
            .collect::<RenderResult<Vec<_>>>()?;
        Ok(Some(format!(" FROM {}", tables.join(", "))))
    }

    fn render_group_by(&self) -> RenderResult<Option<String>> {
        if self.group_by_cols.is_empty() {
            return Ok(None);
        }
        let cols = self
            .group_by_cols
            .iter()
            .map(|c| c.render(self.escaper.as_ref()))
            .collect::<RenderResult<Vec<_>>>()?;
        Ok(Some(format!(" GROUP BY {}", cols.join(", "))))
    }

    fn render_order_by(&self) -> RenderResult<Option<String>> {
        if self.order_by_cols.is_empty() {
            return Ok(None);
        }
        let mut cols = Vec::with_capacity(self.order_by_cols.len());
        for (col, order) in &self.order_by_cols {
            let mut s = col.render(self.escaper.as_ref())?;
            if let Some(order) = order {
                s.push(' ');
                s.push_str(order.as_str());
            }
            cols.push(s);
        }
        Ok(Some(format!(" ORDER BY {}", cols.join(", "))))
    }

    fn build(&self) -> RenderResult<String> {
        let escaper = self.escaper.as_ref();
        let mut sql = String::from("SELECT");
        if self.distinct {
            sql.push_str(" DISTINCT");
        }
        sql.push('\n');
        sql.push_str(&self.render_columns()?);
        sql.push('\n');

        let parts = [
            self.render_from()?,
            self.where_clause.render(escaper)?,
            self.render_group_by()?,
            self.having_clause.render(escaper)?,
            self.render_order_by()?,
            self.limit.render()?,
        ];
        for part in parts.into_iter().flatten() {
            sql.push_str(&part);
            sql.push('\n');
        }
        Ok(sql)
    }
}

impl Statement for Select {
    fn escaper(&self) -> &dyn Escaper {
        self.escaper.as_ref()
    }

    fn sql(&self) -> RenderResult<String> {
        traced("SELECT", self.build())
    }
}

/// 作为子查询嵌入时使用自身的 escaper。
impl Producer for Select {
    fn produce(&self, _escaper: &dyn Escaper) -> RenderResult<String> {
        self.sql()
    }
}

impl From<Select> for Subquery {
    fn from(v: Select) -> Self {
        Subquery::from_producer(v)
    }
}

impl From<Select> for Operand {
    fn from(v: Select) -> Self {
        Operand::Subquery(v.into())
    }
}

impl From<Select> for Column {
    fn from(v: Select) -> Self {
        Column::Subquery(v.into())
    }
}

impl_condition_methods! {
    Select, where_clause;
    general { where_ / or_where }
    unary {
        where_equal / or_where_equal => "=",
        where_not_equal / or_where_not_equal => "!=",
        where_null_safe_equal / or_where_null_safe_equal => "<=>",
        where_less_than / or_where_less_than => "<",
        where_less_than_or_equal / or_where_less_than_or_equal => "<=",
        where_greater_than / or_where_greater_than => ">",
        where_greater_than_or_equal / or_where_greater_than_or_equal => ">=",
        where_like / or_where_like => "LIKE",
        where_not_like / or_where_not_like => "NOT LIKE",
    }
    list {
        where_in / or_where_in => "IN",
        where_not_in / or_where_not_in => "NOT IN",
    }
    range {
        where_between / or_where_between => "BETWEEN",
        where_not_between / or_where_not_between => "NOT BETWEEN",
    }
    nullary {
        where_is_null / or_where_is_null => "IS NULL",
        where_is_not_null / or_where_is_not_null => "IS NOT NULL",
    }
}

impl_condition_methods! {
    Select, having_clause;
    general { having / or_having }
    unary {
        having_equal / or_having_equal => "=",
        having_not_equal / or_having_not_equal => "!=",
        having_null_safe_equal / or_having_null_safe_equal => "<=>",
        having_less_than / or_having_less_than => "<",
        having_less_than_or_equal / or_having_less_than_or_equal => "<=",
        having_greater_than / or_having_greater_than => ">",
        having_greater_than_or_equal / or_having_greater_than_or_equal => ">=",
        having_like / or_having_like => "LIKE",
        having_not_like / or_having_not_like => "NOT LIKE",
    }
    list {
        having_in / or_having_in => "IN",
        having_not_in / or_having_not_in => "NOT IN",
    }
    range {
        having_between / or_having_between => "BETWEEN",
        having_not_between / or_having_not_between => "NOT BETWEEN",
    }
    nullary {
        having_is_null / or_having_is_null => "IS NULL",
        having_is_not_null / or_having_is_not_null => "IS NOT NULL",
    }
}

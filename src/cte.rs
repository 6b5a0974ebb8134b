//! With：组合 `WITH [RECURSIVE] name AS (...), ... <terminal>`。
//!
//! 引用名在集合内唯一并保持插入顺序；至少一个引用加一个终结查询才能渲染，
//! 缺任何一个都只在渲染时报错。

use crate::error::{RenderError, RenderResult};
use crate::escaper::{Escaper, EscaperRef};
use crate::flavor::default_flavor;
use crate::operand::{Column, Operand};
use crate::statement::{Statement, traced};
use crate::subquery::{Producer, Subquery};

/// WITH 选项。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithOption {
    Recursive,
}

impl WithOption {
    pub const RECURSIVE: &'static str = "RECURSIVE";

    pub fn parse(token: &str) -> Option<Self> {
        if token.trim().eq_ignore_ascii_case(Self::RECURSIVE) {
            Some(Self::Recursive)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recursive => Self::RECURSIVE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct With {
    escaper: EscaperRef,
    options: Vec<String>,
    references: Vec<(String, Subquery)>,
    terminal: Option<Subquery>,
}

impl Default for With {
    fn default() -> Self {
        Self::new()
    }
}

impl With {
    pub fn new() -> Self {
        Self::with_escaper(default_flavor().escaper())
    }

    pub fn with_escaper(escaper: EscaperRef) -> Self {
        Self {
            escaper,
            options: Vec::new(),
            references: Vec::new(),
            terminal: None,
        }
    }

    /// 记录选项；未知选项在渲染时报 `Invalid option`。再次调用会覆盖。
    pub fn options<T>(&mut self, options: impl IntoIterator<Item = T>) -> &mut Self
    where
        T: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn recursive(&mut self) -> &mut Self {
        self.options([WithOption::RECURSIVE])
    }

    /// 追加一个命名引用；同名引用会原位替换。
    pub fn reference(&mut self, name: impl Into<String>, query: impl Into<Subquery>) -> &mut Self {
        let name = name.into();
        let query = query.into();
        match self.references.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = query,
            None => self.references.push((name, query)),
        }
        self
    }

    /// 设置终结查询（最终的 SELECT）。
    pub fn select(&mut self, query: impl Into<Subquery>) -> &mut Self {
        self.terminal = Some(query.into());
        self
    }

    pub fn reference_names(&self) -> impl Iterator<Item = &str> {
        self.references.iter().map(|(n, _)| n.as_str())
    }

    fn render_options(&self) -> RenderResult<Option<String>> {
        if self.options.is_empty() {
            return Ok(None);
        }
        let mut opts: Vec<WithOption> = Vec::with_capacity(self.options.len());
        for raw in &self.options {
            let opt = WithOption::parse(raw).ok_or_else(|| RenderError::InvalidOption(raw.clone()))?;
            if !opts.contains(&opt) {
                opts.push(opt);
            }
        }
        Ok(Some(
            opts.iter().map(|o| o.as_str()).collect::<Vec<_>>().join(" "),
        ))
    }

    fn render_references(&self) -> RenderResult<String> {
        if self.references.is_empty() {
            return Err(RenderError::MissingReferences);
        }
        let escaper = self.escaper.as_ref();
        let refs = self
            .references
            .iter()
            .map(|(name, query)| {
                Ok(format!(
                    "{} AS {}",
                    escaper.escape_identifier(name),
                    query.render(escaper)?
                ))
            })
            .collect::<RenderResult<Vec<_>>>()?;
        Ok(refs.join(", "))
    }

    fn render_terminal(&self) -> RenderResult<String> {
        let terminal = self.terminal.as_ref().ok_or(RenderError::MissingTerminal)?;
        terminal.evaluate(self.escaper.as_ref())
    }

    fn build(&self) -> RenderResult<String> {
        let mut sql = String::from("WITH\n");
        if let Some(options) = self.render_options()? {
            sql.push_str(&options);
            sql.push('\n');
        }
        sql.push_str(&self.render_references()?);
        sql.push('\n');
        sql.push_str(&self.render_terminal()?);
        if !sql.ends_with('\n') {
            sql.push('\n');
        }
        Ok(sql)
    }
}

impl Statement for With {
    fn escaper(&self) -> &dyn Escaper {
        self.escaper.as_ref()
    }

    fn sql(&self) -> RenderResult<String> {
        traced("WITH", self.build())
    }
}

impl Producer for With {
    fn produce(&self, _escaper: &dyn Escaper) -> RenderResult<String> {
        self.sql()
    }
}

impl From<With> for Subquery {
    fn from(v: With) -> Self {
        Subquery::from_producer(v)
    }
}

impl From<With> for Operand {
    fn from(v: With) -> Self {
        Operand::Subquery(v.into())
    }
}

impl From<With> for Column {
    fn from(v: With) -> Self {
        Column::Subquery(v.into())
    }
}

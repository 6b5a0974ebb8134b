//! 延迟 producer：渲染时才求值的 SQL 片段（子查询、数据库端函数）。
//!
//! producer 每次渲染都会被重新调用一次，不做缓存；像 `NOW()` 这样带外部副作用的
//! producer 在两次渲染之间可以返回不同文本。

use crate::error::RenderResult;
use crate::escaper::Escaper;
use dyn_clone::DynClone;
use std::fmt;
use std::rc::Rc;

/// 拿到 escaper 上下文后产出原始 SQL 文本。
pub trait Producer: DynClone {
    fn produce(&self, escaper: &dyn Escaper) -> RenderResult<String>;
}

dyn_clone::clone_trait_object!(Producer);

type ProduceFn = dyn Fn(&dyn Escaper) -> RenderResult<String>;

/// 闭包叶子。
#[derive(Clone)]
struct FnProducer {
    f: Rc<ProduceFn>,
}

impl Producer for FnProducer {
    fn produce(&self, escaper: &dyn Escaper) -> RenderResult<String> {
        (self.f)(escaper)
    }
}

/// 一个延迟 producer；作为操作数或列使用时总是被包进括号。
#[derive(Clone)]
pub struct Subquery {
    inner: Box<dyn Producer>,
}

impl fmt::Debug for Subquery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subquery(..)")
    }
}

impl Subquery {
    /// 用一个不会失败的闭包构造子查询。
    pub fn new(f: impl Fn(&dyn Escaper) -> String + 'static) -> Self {
        Self::try_new(move |escaper| Ok(f(escaper)))
    }

    /// 用一个可能失败的闭包构造子查询（例如内部再渲染一条语句）。
    pub fn try_new(f: impl Fn(&dyn Escaper) -> RenderResult<String> + 'static) -> Self {
        Self::from_producer(FnProducer { f: Rc::new(f) })
    }

    pub fn from_producer(producer: impl Producer + 'static) -> Self {
        Self {
            inner: Box::new(producer),
        }
    }

    /// 求值，返回 producer 的原始文本（不加括号）。
    pub fn evaluate(&self, escaper: &dyn Escaper) -> RenderResult<String> {
        self.inner.produce(escaper)
    }

    /// 求值并包上括号：`(` + text + `)`。
    pub fn render(&self, escaper: &dyn Escaper) -> RenderResult<String> {
        let text = self.evaluate(escaper)?;
        Ok(format!("({text})"))
    }
}

impl Producer for Subquery {
    fn produce(&self, escaper: &dyn Escaper) -> RenderResult<String> {
        self.evaluate(escaper)
    }
}

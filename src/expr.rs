//! 表达式片段：原生 SQL 模板、标识符引用、别名与排序项。

use crate::buffer::Buffer;
use crate::builder::{Arg, BuildError, Builder};
use crate::dialect::Dialect;

/// 原生 SQL 片段：模板原样写入，`?` 占位符按顺序对应 `values`。
/// 模板语法不做校验，占位符与参数的数量一致性在插值阶段检查。
#[derive(Clone)]
pub struct Expr {
    template: String,
    values: Vec<Arg>,
}

impl Expr {
    pub fn new(template: impl Into<String>, values: impl IntoIterator<Item = Arg>) -> Self {
        Self {
            template: template.into(),
            values: values.into_iter().collect(),
        }
    }

    /// 纯文本片段，不携带参数。
    pub fn raw(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            values: Vec::new(),
        }
    }
}

/// 便捷构造：`expr("a > ?", [1.into()])`。
pub fn expr(template: impl Into<String>, values: impl IntoIterator<Item = Arg>) -> Expr {
    Expr::new(template, values)
}

impl Builder for Expr {
    fn render(&self, _dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        buf.write_str(&self.template);
        for v in &self.values {
            buf.push_value(v.clone());
        }
        Ok(())
    }
}

/// 带引号的标识符引用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    name: String,
}

pub fn ident(name: impl Into<String>) -> Ident {
    Ident { name: name.into() }
}

impl Builder for Ident {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        buf.write_str(&dialect.quote(&self.name));
        Ok(())
    }
}

/// 别名包装：`<inner> AS <quoted>`；inner 需要括号时（语句类节点）自动补上。
#[derive(Clone)]
pub struct Alias {
    inner: Box<dyn Builder>,
    alias: String,
}

pub fn alias(inner: impl Builder + 'static, alias_name: impl Into<String>) -> Alias {
    Alias {
        inner: Box::new(inner),
        alias: alias_name.into(),
    }
}

impl Builder for Alias {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        let wrap = self.inner.parenthesized();
        if wrap {
            buf.write_char('(');
        }
        self.inner.render(dialect, buf)?;
        if wrap {
            buf.write_char(')');
        }
        buf.write_str(" AS ");
        buf.write_str(&dialect.quote(&self.alias));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// 排序项：`<quoted col> ASC|DESC`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    column: String,
    dir: Direction,
}

pub fn order_asc(column: impl Into<String>) -> Order {
    Order {
        column: column.into(),
        dir: Direction::Asc,
    }
}

pub fn order_desc(column: impl Into<String>) -> Order {
    Order {
        column: column.into(),
        dir: Direction::Desc,
    }
}

impl Builder for Order {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        buf.write_str(&dialect.quote(&self.column));
        buf.write_str(match self.dir {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        });
        Ok(())
    }
}

//! 条件节点：比较谓词与 AND/OR 组合器。

use crate::buffer::Buffer;
use crate::builder::{Arg, BuildError, Builder};
use crate::dialect::Dialect;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cmp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    NotLike,
    In,
    NotIn,
}

impl Cmp {
    fn op_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Neq => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        }
    }
}

/// 比较谓词：列名 + 操作符 + 值/空值/集合/子查询。
#[derive(Clone)]
pub struct Comparison {
    column: String,
    op: Cmp,
    value: Arg,
}

fn cmp(column: impl Into<String>, op: Cmp, value: impl Into<Arg>) -> Comparison {
    Comparison {
        column: column.into(),
        op,
        value: value.into(),
    }
}

/// `col = ?`；空值渲染 `IS NULL`，非空集合渲染 `IN ?`（整个集合作为一个延迟参数），
/// 空集合渲染方言的恒假字面量（不产生非法的空 IN）。
pub fn eq(column: impl Into<String>, value: impl Into<Arg>) -> Comparison {
    cmp(column, Cmp::Eq, value)
}

/// `eq` 的结构镜像：`IS NOT NULL` / `NOT IN` / 恒真字面量 / `!=`。
pub fn neq(column: impl Into<String>, value: impl Into<Arg>) -> Comparison {
    cmp(column, Cmp::Neq, value)
}

pub fn gt(column: impl Into<String>, value: impl Into<Arg>) -> Comparison {
    cmp(column, Cmp::Gt, value)
}

pub fn gte(column: impl Into<String>, value: impl Into<Arg>) -> Comparison {
    cmp(column, Cmp::Gte, value)
}

pub fn lt(column: impl Into<String>, value: impl Into<Arg>) -> Comparison {
    cmp(column, Cmp::Lt, value)
}

pub fn lte(column: impl Into<String>, value: impl Into<Arg>) -> Comparison {
    cmp(column, Cmp::Lte, value)
}

pub fn like(column: impl Into<String>, value: impl Into<Arg>) -> Comparison {
    cmp(column, Cmp::Like, value)
}

pub fn not_like(column: impl Into<String>, value: impl Into<Arg>) -> Comparison {
    cmp(column, Cmp::NotLike, value)
}

/// 显式 `IN`：集合走 `eq` 同款的空集合特判，子查询 builder 延迟展开。
pub fn in_(column: impl Into<String>, value: impl Into<Arg>) -> Comparison {
    cmp(column, Cmp::In, value)
}

pub fn not_in(column: impl Into<String>, value: impl Into<Arg>) -> Comparison {
    cmp(column, Cmp::NotIn, value)
}

impl Builder for Comparison {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        let col = dialect.quote(&self.column);

        // eq/neq 对空值与集合有专门形态；显式 In/NotIn 只特判空集合。
        match (&self.op, &self.value) {
            (Cmp::Eq, Arg::Value(Value::Null)) => {
                buf.write_str(&col);
                buf.write_str(" IS NULL");
            }
            (Cmp::Neq, Arg::Value(Value::Null)) => {
                buf.write_str(&col);
                buf.write_str(" IS NOT NULL");
            }
            (Cmp::Eq | Cmp::In, Arg::Value(Value::List(vs))) if vs.is_empty() => {
                buf.write_str(dialect.encode_bool(false));
            }
            (Cmp::Neq | Cmp::NotIn, Arg::Value(Value::List(vs))) if vs.is_empty() => {
                buf.write_str(dialect.encode_bool(true));
            }
            (Cmp::Eq, v @ Arg::Value(Value::List(_))) => {
                buf.write_str(&col);
                buf.write_str(" IN ");
                buf.write_value(v.clone());
            }
            (Cmp::Neq, v @ Arg::Value(Value::List(_))) => {
                buf.write_str(&col);
                buf.write_str(" NOT IN ");
                buf.write_value(v.clone());
            }
            (op, v) => {
                buf.write_str(&col);
                buf.write_char(' ');
                buf.write_str(op.op_str());
                buf.write_char(' ');
                buf.write_value(v.clone());
            }
        }
        Ok(())
    }
}

/// AND/OR 组合器：每个子节点加括号后用操作符连接。
/// 零个子节点不渲染任何内容，单个子节点退化为只有括号。
#[derive(Clone)]
pub struct LogicalCond {
    op: &'static str,
    conds: Vec<Box<dyn Builder>>,
}

pub fn and(conds: impl IntoIterator<Item = Box<dyn Builder>>) -> LogicalCond {
    LogicalCond {
        op: " AND ",
        conds: conds.into_iter().collect(),
    }
}

pub fn or(conds: impl IntoIterator<Item = Box<dyn Builder>>) -> LogicalCond {
    LogicalCond {
        op: " OR ",
        conds: conds.into_iter().collect(),
    }
}

impl Builder for LogicalCond {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        for (i, c) in self.conds.iter().enumerate() {
            if i > 0 {
                buf.write_str(self.op);
            }
            buf.write_char('(');
            c.render(dialect, buf)?;
            buf.write_char(')');
        }
        Ok(())
    }
}

/// 把具体节点装箱成 `Box<dyn Builder>`，便于混合类型传给 `and`/`or`。
pub trait BuilderExt: Builder + Sized + 'static {
    fn boxed(self) -> Box<dyn Builder> {
        Box::new(self)
    }
}

impl<T: Builder + Sized + 'static> BuilderExt for T {}

//! JOIN 子句：连接类型、表或子查询目标、ON/USING 条件与 index hint。

use crate::buffer::Buffer;
use crate::builder::{BuildError, Builder};
use crate::dialect::Dialect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    AnyLeft,
    AllFull,
}

impl JoinKind {
    fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::AnyLeft => "ANY LEFT JOIN",
            Self::AllFull => "ALL FULL JOIN",
        }
    }
}

/// 连接目标：已引号的表名，或带别名的子查询。
#[derive(Clone)]
enum JoinTarget {
    Table(String),
    Subquery(Box<dyn Builder>, String),
}

#[derive(Clone)]
pub struct Join {
    kind: JoinKind,
    target: JoinTarget,
    cond: Box<dyn Builder>,
}

pub fn join(kind: JoinKind, table: impl Into<String>, cond: impl Builder + 'static) -> Join {
    Join {
        kind,
        target: JoinTarget::Table(table.into()),
        cond: Box::new(cond),
    }
}

pub fn join_subquery(
    kind: JoinKind,
    sub: impl Builder + 'static,
    alias: impl Into<String>,
    cond: impl Builder + 'static,
) -> Join {
    Join {
        kind,
        target: JoinTarget::Subquery(Box::new(sub), alias.into()),
        cond: Box::new(cond),
    }
}

impl Builder for Join {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        buf.write_str(self.kind.keyword());
        buf.write_char(' ');
        match &self.target {
            JoinTarget::Table(t) => buf.write_str(&dialect.quote(t)),
            JoinTarget::Subquery(sub, alias) => {
                buf.write_char('(');
                sub.render(dialect, buf)?;
                buf.write_str(") AS ");
                buf.write_str(&dialect.quote(alias));
            }
        }
        // 条件关键字由方言决定，条件本身同一棵子树。
        if dialect.join_with_using() {
            buf.write_str(" USING ");
        } else {
            buf.write_str(" ON ");
        }
        self.cond.render(dialect, buf)?;
        Ok(())
    }
}

/// MySQL 家族的 index hint，其余方言渲染为空。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexHintKind {
    Use,
    Force,
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHint {
    kind: IndexHintKind,
    indexes: Vec<String>,
}

pub fn index_hint(
    kind: IndexHintKind,
    indexes: impl IntoIterator<Item = impl Into<String>>,
) -> IndexHint {
    IndexHint {
        kind,
        indexes: indexes.into_iter().map(Into::into).collect(),
    }
}

impl Builder for IndexHint {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        if !dialect.supports_index_hints() || self.indexes.is_empty() {
            return Ok(());
        }
        buf.write_str(match self.kind {
            IndexHintKind::Use => "USE INDEX (",
            IndexHintKind::Force => "FORCE INDEX (",
            IndexHintKind::Ignore => "IGNORE INDEX (",
        });
        for (i, idx) in self.indexes.iter().enumerate() {
            if i > 0 {
                buf.write_str(", ");
            }
            buf.write_str(&dialect.quote(idx));
        }
        buf.write_char(')');
        Ok(())
    }
}

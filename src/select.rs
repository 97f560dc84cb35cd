//! SelectBuilder：构建 SELECT 语句。

use crate::buffer::Buffer;
use crate::builder::{BuildError, Builder};
use crate::comment::{Comments, QuerySettings};
use crate::dialect::Dialect;
use crate::expr::{Expr, order_asc, order_desc};
use crate::join::{IndexHint, IndexHintKind, Join, JoinKind, index_hint, join, join_subquery};

/// FROM 目标：表名或带别名的子查询。
#[derive(Clone)]
enum FromTarget {
    Table(String),
    Subquery(Box<dyn Builder>, String),
}

/// 列投影：原生片段或任意表达式节点（别名、CASE 等）。
#[derive(Clone)]
enum SelectCol {
    Raw(String),
    Node(Box<dyn Builder>),
}

#[derive(Clone, Default)]
pub struct SelectBuilder {
    comments: Comments,
    settings: QuerySettings,
    distinct: bool,
    columns: Vec<SelectCol>,
    from: Option<FromTarget>,
    hint: Option<IndexHint>,
    joins: Vec<Join>,
    conds: Vec<Box<dyn Builder>>,
    group_bys: Vec<String>,
    havings: Vec<Box<dyn Builder>>,
    order_bys: Vec<Box<dyn Builder>>,
    limit: Option<u64>,
    offset: Option<u64>,
    suffixes: Vec<String>,
}

/// `select(["id", "name"])` 的便捷入口。
pub fn select(columns: impl IntoIterator<Item = impl Into<String>>) -> SelectBuilder {
    let mut b = SelectBuilder::new();
    for c in columns {
        b.column(c);
    }
    b
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comment(&mut self, text: &str) -> &mut Self {
        self.comments.append(text);
        self
    }

    pub fn setting(&mut self, setting: &str) -> &mut Self {
        self.settings.append(setting);
        self
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    /// 原生列片段，不加引号。
    pub fn column(&mut self, col: impl Into<String>) -> &mut Self {
        self.columns.push(SelectCol::Raw(col.into()));
        self
    }

    /// 表达式列（别名、CASE、子查询等）。
    pub fn column_expr(&mut self, col: impl Builder + 'static) -> &mut Self {
        self.columns.push(SelectCol::Node(Box::new(col)));
        self
    }

    pub fn from(&mut self, table: impl Into<String>) -> &mut Self {
        self.from = Some(FromTarget::Table(table.into()));
        self
    }

    pub fn from_subquery(
        &mut self,
        sub: impl Builder + 'static,
        alias: impl Into<String>,
    ) -> &mut Self {
        self.from = Some(FromTarget::Subquery(Box::new(sub), alias.into()));
        self
    }

    pub fn index_hint(
        &mut self,
        kind: IndexHintKind,
        indexes: impl IntoIterator<Item = impl Into<String>>,
    ) -> &mut Self {
        self.hint = Some(index_hint(kind, indexes));
        self
    }

    pub fn join(&mut self, table: impl Into<String>, cond: impl Builder + 'static) -> &mut Self {
        self.joins.push(join(JoinKind::Inner, table, cond));
        self
    }

    pub fn join_kind(
        &mut self,
        kind: JoinKind,
        table: impl Into<String>,
        cond: impl Builder + 'static,
    ) -> &mut Self {
        self.joins.push(join(kind, table, cond));
        self
    }

    pub fn join_subquery(
        &mut self,
        kind: JoinKind,
        sub: impl Builder + 'static,
        alias: impl Into<String>,
        cond: impl Builder + 'static,
    ) -> &mut Self {
        self.joins.push(join_subquery(kind, sub, alias, cond));
        self
    }

    /// 追加 WHERE 条件；多个条件各自加括号后用 AND 连接。
    pub fn where_(&mut self, cond: impl Builder + 'static) -> &mut Self {
        self.conds.push(Box::new(cond));
        self
    }

    pub fn group_by(&mut self, col: impl Into<String>) -> &mut Self {
        self.group_bys.push(col.into());
        self
    }

    pub fn having(&mut self, cond: impl Builder + 'static) -> &mut Self {
        self.havings.push(Box::new(cond));
        self
    }

    pub fn order_asc(&mut self, col: impl Into<String>) -> &mut Self {
        self.order_bys.push(Box::new(order_asc(col)));
        self
    }

    pub fn order_desc(&mut self, col: impl Into<String>) -> &mut Self {
        self.order_bys.push(Box::new(order_desc(col)));
        self
    }

    /// 原生排序片段。
    pub fn order_by(&mut self, fragment: impl Into<String>) -> &mut Self {
        self.order_bys.push(Box::new(Expr::raw(fragment)));
        self
    }

    pub fn limit(&mut self, n: u64) -> &mut Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(&mut self, n: u64) -> &mut Self {
        self.offset = Some(n);
        self
    }

    /// 追加在语句末尾的原生后缀（如 `FOR UPDATE`）。
    pub fn suffix(&mut self, fragment: impl Into<String>) -> &mut Self {
        self.suffixes.push(fragment.into());
        self
    }
}

impl Builder for SelectBuilder {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        if self.columns.is_empty() {
            return Err(BuildError::MissingColumns);
        }

        self.comments.render(buf);
        self.settings.render(dialect, buf);

        buf.write_leading("SELECT");
        if self.distinct {
            buf.write_str(" DISTINCT");
        }
        for (i, col) in self.columns.iter().enumerate() {
            buf.write_str(if i == 0 { " " } else { ", " });
            match col {
                SelectCol::Raw(s) => buf.write_str(s),
                SelectCol::Node(b) => b.render(dialect, buf)?,
            }
        }

        match &self.from {
            None => {}
            Some(FromTarget::Table(t)) => {
                buf.write_leading("FROM");
                buf.write_char(' ');
                buf.write_str(&dialect.quote(t));
            }
            Some(FromTarget::Subquery(sub, alias)) => {
                buf.write_leading("FROM");
                buf.write_str(" (");
                sub.render(dialect, buf)?;
                buf.write_str(") AS ");
                buf.write_str(&dialect.quote(alias));
            }
        }
        if let Some(hint) = &self.hint {
            let mark = buf.sql().len();
            buf.write_char(' ');
            hint.render(dialect, buf)?;
            // 非 MySQL 家族 hint 渲染为空，回收占位的空格。
            if buf.sql().len() == mark + 1 {
                buf.truncate(mark);
            }
        }

        for j in &self.joins {
            buf.write_char(' ');
            j.render(dialect, buf)?;
        }

        render_cond_list(&self.conds, "WHERE", dialect, buf)?;

        if !self.group_bys.is_empty() {
            buf.write_leading("GROUP BY");
            buf.write_char(' ');
            buf.write_str(&self.group_bys.join(", "));
        }

        render_cond_list(&self.havings, "HAVING", dialect, buf)?;

        if !self.order_bys.is_empty() {
            buf.write_leading("ORDER BY");
            for (i, o) in self.order_bys.iter().enumerate() {
                buf.write_str(if i == 0 { " " } else { ", " });
                o.render(dialect, buf)?;
            }
        }

        render_limit_offset(dialect, self.limit, self.offset, self.order_bys.is_empty(), buf);

        for s in &self.suffixes {
            buf.write_leading(s);
        }
        Ok(())
    }

    fn parenthesized(&self) -> bool {
        true
    }
}

/// WHERE/HAVING 共用：每个条件加括号后用 AND 连接。
pub(crate) fn render_cond_list(
    conds: &[Box<dyn Builder>],
    keyword: &str,
    dialect: Dialect,
    buf: &mut Buffer,
) -> Result<(), BuildError> {
    if conds.is_empty() {
        return Ok(());
    }
    buf.write_leading(keyword);
    for (i, c) in conds.iter().enumerate() {
        buf.write_str(if i == 0 { " (" } else { " AND (" });
        c.render(dialect, buf)?;
        buf.write_char(')');
    }
    Ok(())
}

/// LIMIT/OFFSET 的方言差异集中在这里，UNION 的尾部子句复用同一套渲染。
pub(crate) fn render_limit_offset(
    dialect: Dialect,
    limit: Option<u64>,
    offset: Option<u64>,
    order_by_missing: bool,
    buf: &mut Buffer,
) {
    match dialect {
        Dialect::SQLServer => {
            if limit.is_none() && offset.is_none() {
                return;
            }
            // OFFSET/FETCH 语法要求 ORDER BY，缺失时补一个确定性的序号排序。
            if order_by_missing {
                buf.write_leading("ORDER BY 1");
            }
            buf.write_leading("OFFSET");
            buf.write_char(' ');
            buf.write_str(&offset.unwrap_or(0).to_string());
            buf.write_str(" ROWS");
            if let Some(lim) = limit {
                buf.write_leading("FETCH NEXT");
                buf.write_char(' ');
                buf.write_str(&lim.to_string());
                buf.write_str(" ROWS ONLY");
            }
        }
        _ => {
            if let Some(lim) = limit {
                buf.write_leading("LIMIT");
                buf.write_char(' ');
                buf.write_str(&lim.to_string());
            }
            if let Some(off) = offset {
                buf.write_leading("OFFSET");
                buf.write_char(' ');
                buf.write_str(&off.to_string());
            }
        }
    }
}

//! UpdateBuilder：构建 UPDATE 语句。

use crate::buffer::Buffer;
use crate::builder::{Arg, BuildError, Builder};
use crate::comment::Comments;
use crate::dialect::Dialect;
use crate::expr::{order_asc, order_desc};
use crate::select::render_cond_list;

#[derive(Clone)]
pub struct UpdateBuilder {
    comments: Comments,
    table: String,
    // SET 按插入顺序渲染。
    sets: Vec<(String, Arg)>,
    conds: Vec<Box<dyn Builder>>,
    order_bys: Vec<Box<dyn Builder>>,
    limit: Option<u64>,
}

pub fn update(table: impl Into<String>) -> UpdateBuilder {
    UpdateBuilder {
        comments: Comments::default(),
        table: table.into(),
        sets: Vec::new(),
        conds: Vec::new(),
        order_bys: Vec::new(),
        limit: None,
    }
}

impl UpdateBuilder {
    pub fn comment(&mut self, text: &str) -> &mut Self {
        self.comments.append(text);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Arg>) -> &mut Self {
        self.sets.push((column.into(), value.into()));
        self
    }

    pub fn where_(&mut self, cond: impl Builder + 'static) -> &mut Self {
        self.conds.push(Box::new(cond));
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

    pub fn limit(&mut self, n: u64) -> &mut Self {
        self.limit = Some(n);
        self
    }
}

impl Builder for UpdateBuilder {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        if self.table.is_empty() {
            return Err(BuildError::MissingTable);
        }
        if self.sets.is_empty() {
            return Err(BuildError::MissingSet);
        }

        self.comments.render(buf);

        buf.write_leading("UPDATE");
        buf.write_char(' ');
        buf.write_str(&dialect.quote(&self.table));

        buf.write_leading("SET");
        for (i, (col, v)) in self.sets.iter().enumerate() {
            buf.write_str(if i == 0 { " " } else { ", " });
            buf.write_str(&dialect.quote(col));
            buf.write_str(" = ");
            buf.write_value(v.clone());
        }

        render_cond_list(&self.conds, "WHERE", dialect, buf)?;

        if !self.order_bys.is_empty() {
            buf.write_leading("ORDER BY");
            for (i, o) in self.order_bys.iter().enumerate() {
                buf.write_str(if i == 0 { " " } else { ", " });
                o.render(dialect, buf)?;
            }
        }

        // UPDATE 的 LIMIT 是 MySQL 家族扩展，各方言统一按 `LIMIT n` 输出。
        if let Some(lim) = self.limit {
            buf.write_leading("LIMIT");
            buf.write_char(' ');
            buf.write_str(&lim.to_string());
        }
        Ok(())
    }

    fn parenthesized(&self) -> bool {
        true
    }
}

//! DeleteBuilder：构建 DELETE 语句。

use crate::buffer::Buffer;
use crate::builder::{BuildError, Builder};
use crate::comment::Comments;
use crate::dialect::Dialect;
use crate::expr::{order_asc, order_desc};
use crate::select::render_cond_list;

#[derive(Clone)]
pub struct DeleteBuilder {
    comments: Comments,
    table: String,
    conds: Vec<Box<dyn Builder>>,
    order_bys: Vec<Box<dyn Builder>>,
    limit: Option<u64>,
}

pub fn delete_from(table: impl Into<String>) -> DeleteBuilder {
    DeleteBuilder {
        comments: Comments::default(),
        table: table.into(),
        conds: Vec::new(),
        order_bys: Vec::new(),
        limit: None,
    }
}

impl DeleteBuilder {
    pub fn comment(&mut self, text: &str) -> &mut Self {
        self.comments.append(text);
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

impl Builder for DeleteBuilder {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        if self.table.is_empty() {
            return Err(BuildError::MissingTable);
        }

        self.comments.render(buf);

        buf.write_leading("DELETE FROM");
        buf.write_char(' ');
        buf.write_str(&dialect.quote(&self.table));

        render_cond_list(&self.conds, "WHERE", dialect, buf)?;

        if !self.order_bys.is_empty() {
            buf.write_leading("ORDER BY");
            for (i, o) in self.order_bys.iter().enumerate() {
                buf.write_str(if i == 0 { " " } else { ", " });
                o.render(dialect, buf)?;
            }
        }

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

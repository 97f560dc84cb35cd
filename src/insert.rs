//! InsertBuilder：构建 INSERT / INSERT IGNORE / REPLACE 语句。

use crate::buffer::Buffer;
use crate::builder::{Arg, BuildError, Builder};
use crate::comment::Comments;
use crate::dialect::Dialect;
use crate::record::{Record, resolve_values};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertVerb {
    Insert,
    InsertIgnore,
    Replace,
}

#[derive(Clone)]
pub struct InsertBuilder {
    comments: Comments,
    verb: InsertVerb,
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Arg>>,
    returning: Vec<String>,
    // record 绑定失败延迟到 render 报告，保持“链式调用不失败”的约定。
    pending: Option<BuildError>,
}

pub fn insert_into(table: impl Into<String>) -> InsertBuilder {
    InsertBuilder::new(InsertVerb::Insert, table)
}

pub fn insert_ignore_into(table: impl Into<String>) -> InsertBuilder {
    InsertBuilder::new(InsertVerb::InsertIgnore, table)
}

pub fn replace_into(table: impl Into<String>) -> InsertBuilder {
    InsertBuilder::new(InsertVerb::Replace, table)
}

impl InsertBuilder {
    fn new(verb: InsertVerb, table: impl Into<String>) -> Self {
        Self {
            comments: Comments::default(),
            verb,
            table: table.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            returning: Vec::new(),
            pending: None,
        }
    }

    pub fn comment(&mut self, text: &str) -> &mut Self {
        self.comments.append(text);
        self
    }

    pub fn columns(&mut self, cols: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.columns = cols.into_iter().map(Into::into).collect();
        self
    }

    /// 追加一行 VALUES；行内值个数与列数的一致性由调用方保证。
    pub fn values(&mut self, row: impl IntoIterator<Item = impl Into<Arg>>) -> &mut Self {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// 按已声明的列从记录中取值追加一行；任何列解析不到都是错误（严格模式）。
    pub fn record<T: Record>(&mut self, r: &T) -> &mut Self {
        match resolve_values(r, &self.columns) {
            Ok(vals) => {
                self.rows.push(vals.into_iter().map(Arg::Value).collect());
            }
            Err(e) => {
                if self.pending.is_none() {
                    self.pending = Some(BuildError::Bind(e));
                }
            }
        }
        self
    }

    pub fn returning(&mut self, cols: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.returning = cols.into_iter().map(Into::into).collect();
        self
    }
}

impl Builder for InsertBuilder {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        if let Some(e) = &self.pending {
            return Err(e.clone());
        }
        if self.table.is_empty() {
            return Err(BuildError::MissingTable);
        }
        if self.columns.is_empty() {
            return Err(BuildError::MissingColumns);
        }
        if self.rows.is_empty() {
            return Err(BuildError::MissingValues);
        }

        self.comments.render(buf);

        let verb = match (self.verb, dialect) {
            (InsertVerb::Insert, _) => "INSERT INTO",
            (InsertVerb::InsertIgnore, Dialect::MySQL | Dialect::ClickHouse) => {
                "INSERT IGNORE INTO"
            }
            (InsertVerb::InsertIgnore, Dialect::SQLite) => "INSERT OR IGNORE INTO",
            // PostgreSQL 的 ignore 语义走语句尾部的 ON CONFLICT，SQLServer 无对应语法。
            (InsertVerb::InsertIgnore, Dialect::PostgreSQL | Dialect::SQLServer) => "INSERT INTO",
            (InsertVerb::Replace, _) => "REPLACE INTO",
        };
        buf.write_leading(verb);
        buf.write_char(' ');
        buf.write_str(&dialect.quote(&self.table));

        buf.write_str(" (");
        for (i, c) in self.columns.iter().enumerate() {
            if i > 0 {
                buf.write_str(", ");
            }
            buf.write_str(&dialect.quote(c));
        }
        buf.write_char(')');

        if dialect == Dialect::SQLServer && !self.returning.is_empty() {
            buf.write_str(" OUTPUT ");
            for (i, c) in self.returning.iter().enumerate() {
                if i > 0 {
                    buf.write_str(", ");
                }
                buf.write_str("INSERTED.");
                buf.write_str(&dialect.quote(c));
            }
        }

        buf.write_leading("VALUES");
        for (ri, row) in self.rows.iter().enumerate() {
            buf.write_str(if ri == 0 { " (" } else { ", (" });
            for (i, v) in row.iter().enumerate() {
                if i > 0 {
                    buf.write_str(", ");
                }
                buf.write_value(v.clone());
            }
            buf.write_char(')');
        }

        if self.verb == InsertVerb::InsertIgnore && dialect == Dialect::PostgreSQL {
            buf.write_leading("ON CONFLICT DO NOTHING");
        }

        if matches!(dialect, Dialect::PostgreSQL | Dialect::SQLite) && !self.returning.is_empty() {
            buf.write_leading("RETURNING");
            for (i, c) in self.returning.iter().enumerate() {
                buf.write_str(if i == 0 { " " } else { ", " });
                buf.write_str(&dialect.quote(c));
            }
        }
        Ok(())
    }

    fn parenthesized(&self) -> bool {
        true
    }
}

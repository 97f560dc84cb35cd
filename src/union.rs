//! UNION / UNION ALL：成员语句作为延迟值渲染，括号由 UNION 统一控制。

use crate::buffer::Buffer;
use crate::builder::{Arg, BuildError, Builder, Plain};
use crate::comment::Comments;
use crate::dialect::Dialect;
use crate::expr::{Expr, order_asc, order_desc};
use crate::select::render_limit_offset;

#[derive(Clone)]
pub struct UnionBuilder {
    comments: Comments,
    keyword: &'static str,
    members: Vec<Box<dyn Builder>>,
    order_bys: Vec<Box<dyn Builder>>,
    limit: Option<u64>,
    offset: Option<u64>,
}

pub fn union(members: impl IntoIterator<Item = Box<dyn Builder>>) -> UnionBuilder {
    UnionBuilder::new(" UNION ", members)
}

pub fn union_all(members: impl IntoIterator<Item = Box<dyn Builder>>) -> UnionBuilder {
    UnionBuilder::new(" UNION ALL ", members)
}

impl UnionBuilder {
    fn new(keyword: &'static str, members: impl IntoIterator<Item = Box<dyn Builder>>) -> Self {
        Self {
            comments: Comments::default(),
            keyword,
            members: members.into_iter().collect(),
            order_bys: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    pub fn comment(&mut self, text: &str) -> &mut Self {
        self.comments.append(text);
        self
    }

    pub fn add(&mut self, member: impl Builder + 'static) -> &mut Self {
        self.members.push(Box::new(member));
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
}

impl Builder for UnionBuilder {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        if self.members.is_empty() {
            return Err(BuildError::MissingStatements);
        }

        self.comments.render(buf);

        for (i, m) in self.members.iter().enumerate() {
            if i > 0 {
                buf.write_str(self.keyword);
            }
            // 成员语句自身的括号被 Plain 抑制，这里只加一层。
            buf.write_char('(');
            buf.write_value(Arg::Builder(Box::new(Plain(m.clone()))));
            buf.write_char(')');
        }

        if !self.order_bys.is_empty() {
            buf.write_leading("ORDER BY");
            for (i, o) in self.order_bys.iter().enumerate() {
                buf.write_str(if i == 0 { " " } else { ", " });
                o.render(dialect, buf)?;
            }
        }

        render_limit_offset(dialect, self.limit, self.offset, self.order_bys.is_empty(), buf);
        Ok(())
    }

    fn parenthesized(&self) -> bool {
        true
    }
}

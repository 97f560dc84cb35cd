//! CASE 表达式：有序 WHEN 链 + 可选 ELSE。

use crate::buffer::Buffer;
use crate::builder::{Arg, BuildError, Builder};
use crate::dialect::Dialect;

/// `CASE WHEN (<cond>) THEN <value> ... ELSE <value> END`。
/// 没有任何 WHEN 分支时 render 报 [`BuildError::MissingWhen`]。
#[derive(Clone, Default)]
pub struct CaseWhen {
    whens: Vec<(Box<dyn Builder>, Arg)>,
    else_value: Option<Arg>,
}

pub fn case() -> CaseWhen {
    CaseWhen::default()
}

impl CaseWhen {
    pub fn when(mut self, cond: impl Builder + 'static, then: impl Into<Arg>) -> Self {
        self.whens.push((Box::new(cond), then.into()));
        self
    }

    pub fn else_(mut self, value: impl Into<Arg>) -> Self {
        self.else_value = Some(value.into());
        self
    }
}

impl Builder for CaseWhen {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        if self.whens.is_empty() {
            return Err(BuildError::MissingWhen);
        }

        buf.write_str("CASE");
        for (cond, then) in &self.whens {
            buf.write_str(" WHEN (");
            cond.render(dialect, buf)?;
            buf.write_str(") THEN ");
            buf.write_value(then.clone());
        }
        if let Some(v) = &self.else_value {
            buf.write_str(" ELSE ");
            buf.write_value(v.clone());
        }
        buf.write_str(" END");
        Ok(())
    }
}

//! 语句前置指令：`/* ... */` 注释与 ClickHouse 查询设置。

use crate::buffer::Buffer;
use crate::dialect::Dialect;

/// 插入时剥离注释定界符与换行，渲染阶段不再二次校验。
fn sanitize(s: &str) -> String {
    s.replace("/*", "").replace("*/", "").replace(['\r', '\n'], " ")
}

/// 有序注释列表，逐条渲染为 `/* text */` 加换行。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments(Vec<String>);

impl Comments {
    pub fn append(&mut self, text: &str) {
        self.0.push(sanitize(text));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn render(&self, buf: &mut Buffer) {
        for c in &self.0 {
            buf.write_str("/* ");
            buf.write_str(c);
            buf.write_str(" */\n");
        }
    }
}

/// 查询级设置，仅 ClickHouse 渲染，其余方言为 no-op。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySettings(Vec<String>);

impl QuerySettings {
    pub fn append(&mut self, setting: &str) {
        self.0.push(sanitize(setting));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn render(&self, dialect: Dialect, buf: &mut Buffer) {
        if dialect != Dialect::ClickHouse {
            return;
        }
        for s in &self.0 {
            buf.write_str("SET ");
            buf.write_str(s);
            buf.write_str("\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Comments, QuerySettings};
    use crate::buffer::Buffer;
    use crate::dialect::Dialect;
    use pretty_assertions::assert_eq;

    #[test]
    fn comment_delimiters_are_stripped() {
        let mut c = Comments::default();
        c.append("trace */ injected /* id=1\nline2");
        let mut buf = Buffer::new();
        c.render(&mut buf);
        assert_eq!(buf.sql(), "/* trace  injected  id=1 line2 */\n");
    }

    #[test]
    fn settings_render_only_for_clickhouse() {
        let mut s = QuerySettings::default();
        s.append("join_use_nulls = 1");

        let mut buf = Buffer::new();
        s.render(Dialect::MySQL, &mut buf);
        assert_eq!(buf.sql(), "");

        let mut buf = Buffer::new();
        s.render(Dialect::ClickHouse, &mut buf);
        assert_eq!(buf.sql(), "SET join_use_nulls = 1\n");
    }
}

//! Buffer：一次渲染专用的 SQL 文本累加器，并排记录延迟参数列表。

use crate::builder::Arg;

/// 渲染输出的占位符字符。所有节点统一写 `?`，
/// 参数化执行前可用 [`crate::interpolate::rewrite_placeholders`] 改写为方言占位符。
pub(crate) const PLACEHOLDER: char = '?';

#[derive(Debug, Default, Clone)]
pub struct Buffer {
    sql: String,
    values: Vec<Arg>,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_str(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    pub fn write_char(&mut self, c: char) {
        self.sql.push(c);
    }

    /// 写入 `s`；如果前面已有内容且不以空白或 `(` 结尾，先补一个空格。
    /// 开括号之后紧跟子查询语句，不需要分隔。
    pub fn write_leading(&mut self, s: &str) {
        match self.sql.chars().last() {
            None | Some(' ') | Some('\n') | Some('(') => {}
            _ => self.sql.push(' '),
        }
        self.sql.push_str(s);
    }

    /// 写入一个占位符并把 `v` 追加到延迟参数列表。
    pub fn write_value(&mut self, v: impl Into<Arg>) {
        self.sql.push(PLACEHOLDER);
        self.values.push(v.into());
    }

    /// 只追加参数不写占位符（模板自带 `?` 的场景，如 [`crate::expr::Expr`]）。
    pub fn push_value(&mut self, v: impl Into<Arg>) {
        self.values.push(v.into());
    }

    /// 回退 SQL 文本到指定长度（参数列表不受影响）。
    pub(crate) fn truncate(&mut self, len: usize) {
        self.sql.truncate(len);
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[Arg] {
        &self.values
    }

    pub fn into_parts(self) -> (String, Vec<Arg>) {
        (self.sql, self.values)
    }
}

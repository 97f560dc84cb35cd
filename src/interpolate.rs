//! 插值引擎：把占位符模板 + 参数列表编码为单条字面量 SQL。

use crate::buffer::{Buffer, PLACEHOLDER};
use crate::builder::{Arg, BuildError, Builder};
use crate::dialect::Dialect;
use crate::value::Value;
use crate::valuer::ValuerError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterpolateError {
    /// 占位符与参数数量不一致（两个方向都报错，绝不静默截断或补齐）。
    #[error("interpolate placeholder count {placeholders} does not match value count {values}")]
    ArgCountMismatch { placeholders: usize, values: usize },
    /// 空集合没有合法的字面量形式；builder 层的空 IN 特判是另一回事。
    #[error("interpolate cannot encode an empty list")]
    EmptyList,
    #[error("interpolate unsupported value kind {0}")]
    Unsupported(&'static str),
    /// 时间字面量格式化失败（time::error::Format 不可比较，保留消息文本）。
    #[error("interpolate cannot format datetime literal: {0}")]
    Time(String),
    #[error("{0}")]
    Valuer(#[from] ValuerError),
    #[error("{0}")]
    Build(#[from] BuildError),
}

/// 模板逐字符拷贝，每个占位符按序消费一个参数并编码为字面量。
/// 字符串/标识符字面量内部的 `?` 不算占位符。
pub fn interpolate(
    dialect: Dialect,
    sql: &str,
    values: &[Arg],
) -> Result<String, InterpolateError> {
    let placeholders = count_placeholders(sql);
    if placeholders != values.len() {
        return Err(InterpolateError::ArgCountMismatch {
            placeholders,
            values: values.len(),
        });
    }

    let mut out = String::with_capacity(sql.len() + values.len() * 8);
    let mut pending = values.iter();
    let mut walker = QuoteWalker::default();

    for c in sql.chars() {
        if walker.step(c) && c == PLACEHOLDER {
            // 数量已预先校验，这里必有值。
            let v = pending.next().ok_or(InterpolateError::ArgCountMismatch {
                placeholders,
                values: values.len(),
            })?;
            encode_arg(dialect, v, &mut out)?;
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// 渲染并插值一个 builder，得到完整字面量 SQL。
pub fn literal(dialect: Dialect, b: &dyn Builder) -> Result<String, InterpolateError> {
    let mut buf = Buffer::new();
    b.render(dialect, &mut buf)?;
    interpolate(dialect, buf.sql(), buf.values())
}

/// 把统一的 `?` 占位符改写为方言占位符（`$n` / `@pn`），参数列表不变。
/// 参数化执行路径使用；MySQL 家族与 SQLite 原样返回。
pub fn rewrite_placeholders(dialect: Dialect, sql: &str) -> String {
    if matches!(
        dialect,
        Dialect::MySQL | Dialect::SQLite | Dialect::ClickHouse
    ) {
        return sql.to_string();
    }

    let mut out = String::with_capacity(sql.len() + 8);
    let mut walker = QuoteWalker::default();
    let mut n = 0_usize;
    for c in sql.chars() {
        if walker.step(c) && c == PLACEHOLDER {
            n += 1;
            dialect.write_placeholder(n, &mut out);
        } else {
            out.push(c);
        }
    }
    out
}

fn count_placeholders(sql: &str) -> usize {
    let mut walker = QuoteWalker::default();
    sql.chars()
        .filter(|&c| walker.step(c) && c == PLACEHOLDER)
        .count()
}

/// 跟踪是否处于 `'...'` / `"..."` / `` `...` `` 字面量内部。
/// `step` 返回 true 表示当前字符在字面量之外。
/// 反斜杠转义与双写定界符都保持在字面量内。
#[derive(Default)]
struct QuoteWalker {
    delim: Option<char>,
    escaped: bool,
}

impl QuoteWalker {
    fn step(&mut self, c: char) -> bool {
        match self.delim {
            None => {
                if matches!(c, '\'' | '"' | '`') {
                    self.delim = Some(c);
                    return false;
                }
                true
            }
            Some(d) => {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == d {
                    // 双写定界符由下一个字符重新开启字面量，效果等价于未离开。
                    self.delim = None;
                }
                false
            }
        }
    }
}

fn encode_arg(dialect: Dialect, arg: &Arg, out: &mut String) -> Result<(), InterpolateError> {
    match arg {
        Arg::Value(v) => encode_value(dialect, v, out),
        // 自定义转换能力：转换结果重新走同一张编码表。
        Arg::Valuer(vl) => {
            let v = vl.sql_value()?;
            encode_value(dialect, &v, out)
        }
        Arg::Builder(b) => {
            let mut buf = Buffer::new();
            b.render(dialect, &mut buf)?;
            let inner = interpolate(dialect, buf.sql(), buf.values())?;
            if b.parenthesized() {
                out.push('(');
                out.push_str(&inner);
                out.push(')');
            } else {
                out.push_str(&inner);
            }
            Ok(())
        }
    }
}

fn encode_value(dialect: Dialect, v: &Value, out: &mut String) -> Result<(), InterpolateError> {
    match v {
        Value::Null => out.push_str("NULL"),
        Value::Bool(b) => out.push_str(dialect.encode_bool(*b)),
        Value::I64(n) => out.push_str(&n.to_string()),
        Value::U64(n) => out.push_str(&n.to_string()),
        // Display 输出最短可往返十进制；NaN/无穷没有合法的 SQL 字面量。
        Value::F64(f) => {
            if !f.is_finite() {
                return Err(InterpolateError::Unsupported("non-finite f64"));
            }
            out.push_str(&f.to_string());
        }
        Value::Text(s) => dialect.encode_string(s, out),
        Value::Bytes(b) => dialect.encode_bytes(b, out),
        Value::DateTime(t) => dialect
            .encode_time(t, out)
            .map_err(|e| InterpolateError::Time(e.to_string()))?,
        Value::List(vs) => {
            if vs.is_empty() {
                return Err(InterpolateError::EmptyList);
            }
            out.push('(');
            for (i, e) in vs.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                if let Value::List(_) = e {
                    return Err(InterpolateError::Unsupported(e.kind_name()));
                }
                encode_value(dialect, e, out)?;
            }
            out.push(')');
        }
    }
    Ok(())
}

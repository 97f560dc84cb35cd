//! Dialect：目标数据库家族的标识符引用、字面量编码与占位符策略。
//!
//! Dialect 是纯值，渲染/插值/装载的每次调用都显式传入，不存在进程级默认值。

use std::fmt;
use time::format_description::FormatItem;
use time::macros::format_description;

const DT_MICROS: &[FormatItem<'static>] = format_description!(
    "'[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]'"
);
const DT_MILLIS: &[FormatItem<'static>] = format_description!(
    "'[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]'"
);

/// 支持的数据库方言。ClickHouse 走 MySQL 兼容入口，标识符与布尔字面量同 MySQL。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    #[default]
    MySQL,
    PostgreSQL,
    SQLite,
    SQLServer,
    ClickHouse,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MySQL => "MySQL",
            Self::PostgreSQL => "PostgreSQL",
            Self::SQLite => "SQLite",
            Self::SQLServer => "SQLServer",
            Self::ClickHouse => "ClickHouse",
        };
        f.write_str(s)
    }
}

impl Dialect {
    /// 为标识符加引号；`a.b` 形式按 `.` 分段逐段引用，`*` 原样透传。
    pub fn quote(self, ident: &str) -> String {
        let (open, close) = match self {
            Self::MySQL | Self::ClickHouse => ('`', '`'),
            Self::PostgreSQL | Self::SQLite | Self::SQLServer => ('"', '"'),
        };

        let mut out = String::with_capacity(ident.len() + 4);
        for (i, part) in ident.split('.').enumerate() {
            if i > 0 {
                out.push('.');
            }
            if part == "*" {
                out.push('*');
            } else {
                out.push(open);
                out.push_str(part);
                out.push(close);
            }
        }
        out
    }

    /// 布尔字面量；PostgreSQL 用关键字，其余家族用 `1`/`0`。
    pub fn encode_bool(self, b: bool) -> &'static str {
        match self {
            Self::PostgreSQL => {
                if b {
                    "TRUE"
                } else {
                    "FALSE"
                }
            }
            _ => {
                if b {
                    "1"
                } else {
                    "0"
                }
            }
        }
    }

    /// 字符串字面量：单引号包裹，按方言转义。
    pub fn encode_string(self, s: &str, out: &mut String) {
        match self {
            Self::MySQL | Self::ClickHouse => {
                out.push('\'');
                for ch in s.chars() {
                    match ch {
                        '\u{0000}' => out.push_str("\\0"),
                        '\u{0008}' => out.push_str("\\b"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\t' => out.push_str("\\t"),
                        '\u{001a}' => out.push_str("\\Z"),
                        '\'' => out.push_str("\\'"),
                        '\\' => out.push_str("\\\\"),
                        _ => out.push(ch),
                    }
                }
                out.push('\'');
            }
            Self::PostgreSQL | Self::SQLite | Self::SQLServer => {
                if self == Self::SQLServer {
                    out.push('N');
                }
                out.push('\'');
                for ch in s.chars() {
                    if ch == '\'' {
                        out.push_str("''");
                    } else {
                        out.push(ch);
                    }
                }
                out.push('\'');
            }
        }
    }

    /// 字节序列字面量。
    pub fn encode_bytes(self, data: &[u8], out: &mut String) {
        match self {
            Self::MySQL | Self::SQLServer => {
                out.push_str("0x");
                push_hex(out, data);
            }
            Self::PostgreSQL => {
                out.push_str("E'\\\\x");
                push_hex(out, data);
                out.push('\'');
            }
            Self::SQLite => {
                out.push_str("X'");
                push_hex(out, data);
                out.push('\'');
            }
            Self::ClickHouse => {
                out.push_str("unhex('");
                push_hex(out, data);
                out.push_str("')");
            }
        }
    }

    /// 时间字面量：统一转为 UTC，微秒精度。
    pub fn encode_time(
        self,
        t: &time::OffsetDateTime,
        out: &mut String,
    ) -> Result<(), time::error::Format> {
        let utc = t.to_offset(time::UtcOffset::UTC);
        let items = match self {
            Self::SQLite => DT_MILLIS,
            _ => DT_MICROS,
        };
        out.push_str(&utc.format(items)?);
        Ok(())
    }

    /// 写入第 `index_1_based` 个参数占位符。
    pub fn write_placeholder(self, index_1_based: usize, out: &mut String) {
        match self {
            Self::MySQL | Self::SQLite | Self::ClickHouse => out.push('?'),
            Self::PostgreSQL => {
                out.push('$');
                out.push_str(&index_1_based.to_string());
            }
            Self::SQLServer => {
                out.push_str("@p");
                out.push_str(&index_1_based.to_string());
            }
        }
    }

    /// index hint（USE/FORCE INDEX）仅 MySQL 家族有效。
    pub fn supports_index_hints(self) -> bool {
        matches!(self, Self::MySQL | Self::ClickHouse)
    }

    /// JOIN 条件关键字：ClickHouse 走 `USING`，其余方言走 `ON`。
    pub fn join_with_using(self) -> bool {
        self == Self::ClickHouse
    }
}

fn push_hex(out: &mut String, data: &[u8]) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for &b in data {
        out.push(HEX[((b >> 4) & 0xF) as usize] as char);
        out.push(HEX[(b & 0xF) as usize] as char);
    }
}

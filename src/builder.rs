//! Builder：所有可渲染节点共享的单一能力——把自身写入 Buffer。

use crate::buffer::Buffer;
use crate::dialect::Dialect;
use crate::record::BindError;
use crate::value::Value;
use crate::valuer::Valuer;
use dyn_clone::DynClone;

/// 渲染期的结构性错误：缺失的强制子句在 render 时报告，而不是在链式调用时。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("builder statement has no table")]
    MissingTable,
    #[error("builder statement has no columns")]
    MissingColumns,
    #[error("builder insert has no value rows")]
    MissingValues,
    #[error("builder update has no assignments")]
    MissingSet,
    #[error("builder case expression has no when clauses")]
    MissingWhen,
    #[error("builder union has no statements")]
    MissingStatements,
    #[error("{0}")]
    Bind(#[from] BindError),
}

/// 可渲染节点。渲染只读取节点自身与 Dialect，除追加 Buffer 外无副作用；
/// 子节点渲染失败时立即原样上抛，调用方必须丢弃半成品 Buffer。
pub trait Builder: DynClone {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError>;

    /// 作为延迟值被插值展开时是否需要外层括号。
    /// 语句类节点（SELECT/UNION 等）返回 true；表达式片段返回 false。
    fn parenthesized(&self) -> bool {
        false
    }
}

dyn_clone::clone_trait_object!(Builder);

impl Builder for Box<dyn Builder> {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        (**self).render(dialect, buf)
    }

    fn parenthesized(&self) -> bool {
        (**self).parenthesized()
    }
}

/// 渲染适配器：转发渲染但抑制外层括号。
/// UNION 用它包住成员语句，使括号只由 UNION 控制一次。
#[derive(Clone)]
pub struct Plain(pub(crate) Box<dyn Builder>);

impl Builder for Plain {
    fn render(&self, dialect: Dialect, buf: &mut Buffer) -> Result<(), BuildError> {
        self.0.render(dialect, buf)
    }

    fn parenthesized(&self) -> bool {
        false
    }
}

/// 抑制 `b` 的外层括号。
pub fn plain(b: impl Builder + 'static) -> Plain {
    Plain(Box::new(b))
}

/// 延迟参数：普通值、自定义 Valuer，或嵌套子 builder（子查询等）。
#[derive(Clone)]
pub enum Arg {
    Value(Value),
    Valuer(Box<dyn Valuer>),
    Builder(Box<dyn Builder>),
}

impl std::fmt::Debug for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Valuer(_) => f.write_str("Valuer(..)"),
            Self::Builder(_) => f.write_str("Builder(..)"),
        }
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

// 不能对 `T: Into<Value>` 写 blanket From（与自反 From 冲突），逐类型展开。
macro_rules! arg_from_value {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for Arg {
            fn from(v: $t) -> Self {
                Self::Value(v.into())
            }
        })+
    };
}

arg_from_value!(
    (),
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &'static str,
    Vec<u8>,
    Vec<i64>,
    Vec<String>,
    Vec<&'static str>,
    time::OffsetDateTime,
);

impl<T> From<Option<T>> for Arg
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        Self::Value(Value::from_option(v))
    }
}

impl From<Box<dyn Builder>> for Arg {
    fn from(v: Box<dyn Builder>) -> Self {
        Self::Builder(v)
    }
}

impl From<Box<dyn Valuer>> for Arg {
    fn from(v: Box<dyn Valuer>) -> Self {
        Self::Valuer(v)
    }
}

/// 把任意 builder 包装为延迟参数（子查询场景的便捷入口）。
pub fn subquery(b: impl Builder + 'static) -> Arg {
    Arg::Builder(Box::new(b))
}

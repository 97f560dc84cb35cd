//! SQL 参数值类型：封闭的值集合，构造期即拒绝不可编码的内容。

use std::borrow::Cow;

/// SQL 参数值。
///
/// `List` 表示有序集合（非字节序列），插值时展开为 `(a, b, c)`；
/// 空 `List` 在插值阶段报错（builder 层的空 IN 特判发生在更早的渲染阶段）。
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Text(Cow<'static, str>),
    Bytes(Vec<u8>),
    DateTime(time::OffsetDateTime),
    List(Vec<Value>),
}

impl Value {
    /// 将 `Option<T>` 映射为 `Value`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<Value>>(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }

    /// 从字节序列构造文本值；非法 UTF-8 在构造期直接失败，
    /// 后续插值因此不会遇到无法编码的字符串。
    pub fn text_from_utf8(bytes: Vec<u8>) -> Result<Self, std::string::FromUtf8Error> {
        Ok(Self::Text(Cow::Owned(String::from_utf8(bytes)?)))
    }

    /// 值种类名（用于错误信息）。
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::I64(_) => "i64",
            Self::U64(_) => "u64",
            Self::F64(_) => "f64",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::DateTime(_) => "datetime",
            Self::List(_) => "list",
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Self::U64(v as u64)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Self::U64(v as u64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::U64(v as u64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::F64(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(Cow::Owned(v))
    }
}

impl From<&'static str> for Value {
    fn from(v: &'static str) -> Self {
        Self::Text(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        Self::from_option(v)
    }
}

impl From<time::OffsetDateTime> for Value {
    fn from(v: time::OffsetDateTime) -> Self {
        Self::DateTime(v)
    }
}

// Vec<u8> 已被 Bytes 占用，列表转换按元素类型逐一实现。
macro_rules! list_from_vec {
    ($($t:ty),+ $(,)?) => {
        $(impl From<Vec<$t>> for Value {
            fn from(v: Vec<$t>) -> Self {
                Self::List(v.into_iter().map(Into::into).collect())
            }
        })+
    };
}

list_from_vec!(i16, i32, i64, u16, u32, u64, f64, bool, String, &'static str);

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::Value;

    #[test]
    fn from_option_some() {
        assert_eq!(Value::from_option(Some(123_i64)), Value::I64(123));
    }

    #[test]
    fn from_option_none() {
        assert_eq!(Value::from_option::<i64>(None), Value::Null);
    }

    #[test]
    fn from_unit_is_null() {
        let v: Value = ().into();
        assert_eq!(v, Value::Null);
    }

    #[test]
    fn from_vec_is_list() {
        let v: Value = vec![1_i64, 2].into();
        assert_eq!(v, Value::List(vec![Value::I64(1), Value::I64(2)]));
    }

    #[test]
    fn text_from_utf8_rejects_invalid() {
        assert!(Value::text_from_utf8(vec![0xff, 0xfe]).is_err());
        assert_eq!(
            Value::text_from_utf8(b"abc".to_vec()).unwrap(),
            Value::Text("abc".into())
        );
    }
}

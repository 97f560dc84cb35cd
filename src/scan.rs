//! Scan：结果列的可写入目标。装载引擎按“生成 cell → 扫描 → 释放”的
//! 节奏逐行处理，列解析结果在行之间复用。

use crate::load::LoadError;
use crate::value::Value;
use std::marker::PhantomData;

/// 从驱动侧的一个列值写入自身。
pub trait ScanFromValue: Sized {
    fn scan_from(v: Value) -> Result<Self, LoadError>;
}

fn mismatch<T>(v: &Value, want: &'static str) -> Result<T, LoadError> {
    Err(LoadError::TypeMismatch {
        want,
        got: v.kind_name(),
    })
}

impl ScanFromValue for Value {
    fn scan_from(v: Value) -> Result<Self, LoadError> {
        Ok(v)
    }
}

macro_rules! scan_int {
    ($($t:ty),+ $(,)?) => {
        $(impl ScanFromValue for $t {
            fn scan_from(v: Value) -> Result<Self, LoadError> {
                match &v {
                    Value::I64(n) => <$t>::try_from(*n)
                        .or_else(|_| mismatch(&v, stringify!($t))),
                    Value::U64(n) => <$t>::try_from(*n)
                        .or_else(|_| mismatch(&v, stringify!($t))),
                    _ => mismatch(&v, stringify!($t)),
                }
            }
        })+
    };
}

scan_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl ScanFromValue for f64 {
    fn scan_from(v: Value) -> Result<Self, LoadError> {
        match &v {
            Value::F64(f) => Ok(*f),
            Value::I64(n) => Ok(*n as f64),
            Value::U64(n) => Ok(*n as f64),
            _ => mismatch(&v, "f64"),
        }
    }
}

impl ScanFromValue for bool {
    fn scan_from(v: Value) -> Result<Self, LoadError> {
        match &v {
            Value::Bool(b) => Ok(*b),
            Value::I64(0) | Value::U64(0) => Ok(false),
            Value::I64(1) | Value::U64(1) => Ok(true),
            _ => mismatch(&v, "bool"),
        }
    }
}

impl ScanFromValue for String {
    fn scan_from(v: Value) -> Result<Self, LoadError> {
        match v {
            Value::Text(s) => Ok(s.into_owned()),
            other => mismatch(&other, "String"),
        }
    }
}

impl ScanFromValue for Vec<u8> {
    fn scan_from(v: Value) -> Result<Self, LoadError> {
        match v {
            Value::Bytes(b) => Ok(b),
            Value::Text(s) => Ok(s.into_owned().into_bytes()),
            other => mismatch(&other, "Vec<u8>"),
        }
    }
}

impl ScanFromValue for time::OffsetDateTime {
    fn scan_from(v: Value) -> Result<Self, LoadError> {
        match v {
            Value::DateTime(t) => Ok(t),
            other => mismatch(&other, "OffsetDateTime"),
        }
    }
}

impl<T: ScanFromValue> ScanFromValue for Option<T> {
    fn scan_from(v: Value) -> Result<Self, LoadError> {
        match v {
            Value::Null => Ok(None),
            other => Ok(Some(T::scan_from(other)?)),
        }
    }
}

type Setter = fn(*mut (), Value) -> Result<(), LoadError>;

fn set_impl<T: ScanFromValue>(ptr: *mut (), v: Value) -> Result<(), LoadError> {
    // SAFETY: ptr 由宏/装载引擎从真实字段地址构造，lifetime 由 ScanCell 约束。
    let slot = unsafe { &mut *(ptr as *mut T) };
    *slot = T::scan_from(v)?;
    Ok(())
}

fn discard_impl(_ptr: *mut (), _v: Value) -> Result<(), LoadError> {
    Ok(())
}

/// 一个可写入的扫描目标；`discard` 是无副作用的黑洞（未解析列用）。
#[derive(Debug)]
pub struct ScanCell<'a> {
    ptr: *mut (),
    set: Setter,
    _pd: PhantomData<&'a mut ()>,
}

impl<'a> ScanCell<'a> {
    pub fn from_ptr<T: ScanFromValue>(ptr: *mut T) -> Self {
        Self {
            ptr: ptr as *mut (),
            set: set_impl::<T>,
            _pd: PhantomData,
        }
    }

    pub fn discard() -> Self {
        Self {
            ptr: std::ptr::null_mut(),
            set: discard_impl,
            _pd: PhantomData,
        }
    }

    pub fn set_value(&mut self, v: Value) -> Result<(), LoadError> {
        (self.set)(self.ptr, v)
    }
}

#[cfg(test)]
mod tests {
    use super::{ScanCell, ScanFromValue};
    use crate::load::LoadError;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn cell_writes_through_pointer() {
        let mut n = 0_i64;
        let mut cell = ScanCell::from_ptr(&mut n as *mut i64);
        cell.set_value(Value::I64(42)).unwrap();
        assert_eq!(n, 42);
    }

    #[test]
    fn discard_swallows_anything() {
        let mut cell = ScanCell::discard();
        cell.set_value(Value::Text("x".into())).unwrap();
    }

    #[test]
    fn option_scans_null_to_none() {
        assert_eq!(Option::<String>::scan_from(Value::Null).unwrap(), None);
        assert_eq!(
            Option::<String>::scan_from(Value::Text("a".into())).unwrap(),
            Some("a".to_string())
        );
    }

    #[test]
    fn type_mismatch_is_reported() {
        let err = i64::scan_from(Value::Text("7".into())).unwrap_err();
        assert_eq!(
            err,
            LoadError::TypeMismatch {
                want: "i64",
                got: "text"
            }
        );
    }

    #[test]
    fn narrowing_out_of_range_fails() {
        assert!(i8::scan_from(Value::I64(300)).is_err());
        assert_eq!(i8::scan_from(Value::I64(3)).unwrap(), 3);
    }
}

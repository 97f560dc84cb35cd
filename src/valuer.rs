//! Valuer：自定义“值转换”能力，转换结果会重新进入插值编码表。

use crate::value::Value;
use dyn_clone::DynClone;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValuerError {
    #[error("valuer conversion failed: {0}")]
    Conversion(String),
}

/// 实现该 trait 的类型可以作为参数传入 builder，
/// 插值时先调用 `sql_value` 再按普通 `Value` 编码。
pub trait Valuer: DynClone {
    fn sql_value(&self) -> Result<Value, ValuerError>;
}

dyn_clone::clone_trait_object!(Valuer);

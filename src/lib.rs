//! sqlbind：可组合的 SQL 构建、字面量插值与结果行装载库。

pub mod buffer;
pub mod builder;
pub mod case_when;
#[cfg(test)]
mod case_when_tests;
pub mod comment;
pub mod cond;
#[cfg(test)]
mod cond_tests;
pub mod delete;
pub mod dialect;
pub mod expr;
pub mod insert;
#[cfg(test)]
mod insert_tests;
pub mod interpolate;
pub mod join;
pub mod load;
pub mod record;
pub mod scan;
pub mod select;
pub mod union;
#[cfg(test)]
mod union_tests;
pub mod update;
#[cfg(test)]
mod update_delete_tests;
pub mod value;
pub mod valuer;

pub use crate::buffer::Buffer;
pub use crate::builder::{Arg, BuildError, Builder, Plain, plain, subquery};
pub use crate::case_when::{CaseWhen, case};
pub use crate::comment::{Comments, QuerySettings};
pub use crate::cond::{
    BuilderExt, Comparison, LogicalCond, and, eq, gt, gte, in_, like, lt, lte, neq, not_in,
    not_like, or,
};
pub use crate::delete::{DeleteBuilder, delete_from};
pub use crate::dialect::Dialect;
pub use crate::expr::{Alias, Expr, Ident, Order, alias, expr, ident, order_asc, order_desc};
pub use crate::insert::{InsertBuilder, insert_ignore_into, insert_into, replace_into};
pub use crate::interpolate::{InterpolateError, interpolate, literal, rewrite_placeholders};
pub use crate::join::{IndexHint, IndexHintKind, Join, JoinKind, index_hint, join, join_subquery};
pub use crate::load::{
    GroupMap, LoadError, LoadTarget, MemoryRows, RowTarget, Rows, load, load_one,
};
pub use crate::record::{
    BindError, FieldInfo, FieldKind, FieldPath, Record, RecordShape, resolve, resolve_values,
    snake_case,
};
pub use crate::scan::{ScanCell, ScanFromValue};
pub use crate::select::{SelectBuilder, select};
pub use crate::union::{UnionBuilder, union, union_all};
pub use crate::update::{UpdateBuilder, update};
pub use crate::value::Value;
pub use crate::valuer::{Valuer, ValuerError};

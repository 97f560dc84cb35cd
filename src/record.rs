//! Record：记录形状的静态描述表与列名解析。
//!
//! Rust 没有运行时反射；`sql_record!` 宏为业务 struct 生成字段描述表与
//! 按路径取值/取地址的代码。列名到字段路径的解析结果按
//! （类型，列集合）缓存，进程内只计算一次。

use crate::scan::ScanCell;
use crate::value::Value;
use std::any::TypeId;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, OnceLock, RwLock};

/// 列解析失败（严格模式：从记录绑定出参时每个列都必须命中）。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("bind column {0} does not resolve to any record field")]
    UnresolvedColumn(String),
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Scalar,
    Nested(&'static RecordShape),
}

/// 宏生成的单字段描述。
/// `db` 为空表示按 snake_case 约定推导列名，`"-"` 表示该字段不参与绑定。
#[derive(Debug, Clone, Copy)]
pub struct FieldInfo {
    pub name: &'static str,
    pub db: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug)]
pub struct RecordShape {
    pub name: &'static str,
    pub fields: &'static [FieldInfo],
}

/// 字段路径：从根记录到叶子字段的字段名序列。
pub type FieldPath = Vec<&'static str>;

/// 由 `sql_record!` 实现：静态形状 + 按路径取 cell / 取值。
pub trait Record: Default + 'static {
    const SHAPE: &'static RecordShape;

    /// 按字段路径取可写入的扫描目标；路径不存在返回 None。
    fn cell_from_raw<'a>(this: *mut Self, path: &[&'static str]) -> Option<ScanCell<'a>>;

    /// 按字段路径取当前值（用于从记录绑定语句参数）。
    fn value_of(&self, path: &[&'static str]) -> Option<Value>;
}

/// CamelCase 转 snake_case（`aB`/`a1B`/`ABc` 边界各插入一个下划线）。
pub fn snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    let mut prev: Option<char> = None;
    let chars: Vec<char> = s.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        let next = chars.get(i + 1).copied();
        if c.is_ascii_uppercase() {
            if let Some(p) = prev {
                let prev_is_lower_or_digit = p.is_ascii_lowercase() || p.is_ascii_digit();
                let prev_is_upper = p.is_ascii_uppercase();
                let next_is_lower = next.map(|n| n.is_ascii_lowercase()).unwrap_or(false);
                if prev_is_lower_or_digit || (prev_is_upper && next_is_lower) {
                    out.push('_');
                }
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

type PathTable = Arc<Vec<Option<FieldPath>>>;
type ResolveKey = (TypeId, Vec<String>);

static RESOLVE_CACHE: OnceLock<RwLock<HashMap<ResolveKey, PathTable>>> = OnceLock::new();

fn cache() -> &'static RwLock<HashMap<ResolveKey, PathTable>> {
    RESOLVE_CACHE.get_or_init(Default::default)
}

/// 非严格解析：每个列名对应一个字段路径，未命中的列为 None。
/// 结果按（类型，列集合）缓存。
pub fn resolve<T: Record>(columns: &[String]) -> PathTable {
    let key = (TypeId::of::<T>(), columns.to_vec());
    {
        let g = cache().read().unwrap_or_else(|e| e.into_inner());
        if let Some(hit) = g.get(&key) {
            return hit.clone();
        }
    }
    let table: PathTable = Arc::new(build_paths(T::SHAPE, columns));
    let mut g = cache().write().unwrap_or_else(|e| e.into_inner());
    g.entry(key).or_insert_with(|| table.clone());
    table
}

/// 严格解析并取值：任一列未命中即报错，顺序与 `columns` 一致。
pub fn resolve_values<T: Record>(r: &T, columns: &[String]) -> Result<Vec<Value>, BindError> {
    let paths = resolve::<T>(columns);
    columns
        .iter()
        .zip(paths.iter())
        .map(|(c, p)| {
            let path = p
                .as_ref()
                .ok_or_else(|| BindError::UnresolvedColumn(c.clone()))?;
            r.value_of(path)
                .ok_or_else(|| BindError::UnresolvedColumn(c.clone()))
        })
        .collect()
}

/// 广度优先建表：浅层字段永远遮蔽同名的嵌套字段；
/// 同一层内显式改名优先于 snake_case 约定。
fn build_paths(shape: &'static RecordShape, columns: &[String]) -> Vec<Option<FieldPath>> {
    let mut map: HashMap<String, FieldPath> = HashMap::new();
    let mut level: VecDeque<(FieldPath, &'static RecordShape)> = VecDeque::new();
    level.push_back((Vec::new(), shape));

    while !level.is_empty() {
        let mut next: VecDeque<(FieldPath, &'static RecordShape)> = VecDeque::new();

        for (prefix, s) in &level {
            for f in s.fields {
                if f.db == "-" || f.db.is_empty() {
                    continue;
                }
                if let FieldKind::Scalar = f.kind {
                    let mut p = prefix.clone();
                    p.push(f.name);
                    map.entry(f.db.to_string()).or_insert(p);
                }
            }
        }

        for (prefix, s) in &level {
            for f in s.fields {
                if !f.db.is_empty() {
                    continue;
                }
                if let FieldKind::Scalar = f.kind {
                    let mut p = prefix.clone();
                    p.push(f.name);
                    map.entry(snake_case(f.name)).or_insert(p);
                }
            }
        }

        for (prefix, s) in &level {
            for f in s.fields {
                if f.db == "-" {
                    continue;
                }
                if let FieldKind::Nested(ns) = f.kind {
                    let mut p = prefix.clone();
                    p.push(f.name);
                    next.push_back((p, ns));
                }
            }
        }

        level = next;
    }

    columns.iter().map(|c| map.get(c).cloned()).collect()
}

/// 为业务 struct 生成 [`Record`]、[`crate::load::RowTarget`] 与
/// [`crate::load::LoadTarget`] 实现。
///
/// ```ignore
/// #[derive(Default)]
/// struct User { id: i64, name: String, address: Address }
///
/// sqlbind::sql_record! {
///     impl User {
///         id:      { db: "" },
///         name:    { db: "full_name" },
///         address: { db: "", nested: Address },
///     }
/// }
/// ```
#[macro_export]
macro_rules! sql_record {
    (
        impl $ty:ty {
            $(
                $field:ident : { db: $db:literal $(, nested: $nt:ty)? }
            ),* $(,)?
        }
    ) => {
        impl $crate::record::Record for $ty {
            const SHAPE: &'static $crate::record::RecordShape = &$crate::record::RecordShape {
                name: stringify!($ty),
                fields: &[
                    $(
                        $crate::record::FieldInfo {
                            name: stringify!($field),
                            db: $db,
                            kind: $crate::__sql_record_kind!($($nt)?),
                        }
                    ),*
                ],
            };

            fn cell_from_raw<'a>(
                this: *mut Self,
                path: &[&'static str],
            ) -> Option<$crate::scan::ScanCell<'a>> {
                let (head, rest) = path.split_first()?;
                match *head {
                    $(
                        stringify!($field) => $crate::__sql_record_cell!(this, $field, rest $(, $nt)?),
                    )*
                    _ => None,
                }
            }

            fn value_of(&self, path: &[&'static str]) -> Option<$crate::value::Value> {
                let (head, rest) = path.split_first()?;
                match *head {
                    $(
                        stringify!($field) => $crate::__sql_record_value!(self, $field, rest $(, $nt)?),
                    )*
                    _ => None,
                }
            }
        }

        impl $crate::load::RowTarget for $ty {
            fn bind_row<'a>(
                &'a mut self,
                columns: &[String],
            ) -> Result<Vec<$crate::scan::ScanCell<'a>>, $crate::load::LoadError> {
                let paths = $crate::record::resolve::<Self>(columns);
                let this: *mut Self = self;
                let mut cells = Vec::with_capacity(columns.len());
                for p in paths.iter() {
                    let cell = match p {
                        Some(path) => <Self as $crate::record::Record>::cell_from_raw(this, path)
                            .unwrap_or_else($crate::scan::ScanCell::discard),
                        None => $crate::scan::ScanCell::discard(),
                    };
                    cells.push(cell);
                }
                Ok(cells)
            }
        }

        impl $crate::load::LoadTarget for $ty {
            fn load_from(
                &mut self,
                rows: &mut dyn $crate::load::Rows,
            ) -> Result<usize, $crate::load::LoadError> {
                $crate::load::load_single_row(self, rows)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __sql_record_kind {
    () => {
        $crate::record::FieldKind::Scalar
    };
    ($nt:ty) => {
        $crate::record::FieldKind::Nested(<$nt as $crate::record::Record>::SHAPE)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __sql_record_cell {
    ($this:expr, $field:ident, $rest:expr) => {{
        if $rest.is_empty() {
            // SAFETY: this 指向一个有效的记录，字段地址在 cell 的 lifetime 内有效。
            Some($crate::scan::ScanCell::from_ptr(unsafe {
                std::ptr::addr_of_mut!((*$this).$field)
            }))
        } else {
            None
        }
    }};
    ($this:expr, $field:ident, $rest:expr, $nt:ty) => {
        <$nt as $crate::record::Record>::cell_from_raw(
            // SAFETY: 同上，嵌套字段的地址从父记录推导。
            unsafe { std::ptr::addr_of_mut!((*$this).$field) },
            $rest,
        )
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __sql_record_value {
    ($self_:expr, $field:ident, $rest:expr) => {{
        if $rest.is_empty() {
            Some($crate::value::Value::from($self_.$field.clone()))
        } else {
            None
        }
    }};
    ($self_:expr, $field:ident, $rest:expr, $nt:ty) => {
        <$nt as $crate::record::Record>::value_of(&$self_.$field, $rest)
    };
}

//! 装载引擎：把驱动结果行写入标量、记录、集合或键值映射目标。

use crate::record::BindError;
use crate::scan::{ScanCell, ScanFromValue};
use crate::value::Value;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// 要求恰好一行时结果为空。
    #[error("load found no rows")]
    NotFound,
    #[error("load needs at least {want} columns, result has {got}")]
    NotEnoughColumns { want: usize, got: usize },
    #[error("load row has {got} values for {want} scan targets")]
    ColumnCountMismatch { want: usize, got: usize },
    #[error("load cannot scan {got} into {want}")]
    TypeMismatch {
        want: &'static str,
        got: &'static str,
    },
    #[error("{0}")]
    Bind(#[from] BindError),
    #[error("driver error: {0}")]
    Driver(String),
}

/// 驱动侧的行枚举原语：列名 + 逐行推进 + 按 cell 写入一行。
pub trait Rows {
    fn columns(&self) -> &[String];

    /// 推进到下一行；返回 false 表示没有更多行。
    fn advance(&mut self) -> Result<bool, LoadError>;

    /// 把当前行写入 cells；cells 数量必须等于列数。
    fn scan(&mut self, cells: &mut [ScanCell<'_>]) -> Result<(), LoadError>;
}

/// 内存结果集，测试与离线数据的 Rows 实现。
#[derive(Debug, Clone, Default)]
pub struct MemoryRows {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    cursor: Option<usize>,
}

impl MemoryRows {
    pub fn new(
        columns: impl IntoIterator<Item = impl Into<String>>,
        rows: Vec<Vec<Value>>,
    ) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows,
            cursor: None,
        }
    }
}

impl Rows for MemoryRows {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn advance(&mut self) -> Result<bool, LoadError> {
        let next = self.cursor.map_or(0, |c| c + 1);
        self.cursor = Some(next);
        Ok(next < self.rows.len())
    }

    fn scan(&mut self, cells: &mut [ScanCell<'_>]) -> Result<(), LoadError> {
        let row = self
            .cursor
            .and_then(|c| self.rows.get(c))
            .ok_or(LoadError::NotFound)?;
        if cells.len() != row.len() {
            return Err(LoadError::ColumnCountMismatch {
                want: cells.len(),
                got: row.len(),
            });
        }
        for (cell, v) in cells.iter_mut().zip(row.clone()) {
            cell.set_value(v)?;
        }
        Ok(())
    }
}

/// 消费一行的目标：为当前列集合生成扫描 cell。
/// 直接实现本 trait 的自定义类型永远按单一目标处理，
/// 即使其内部形状像集合（自聚合类型以此退出逐行展开）。
pub trait RowTarget: Default + Sized + 'static {
    fn bind_row<'a>(&'a mut self, columns: &[String]) -> Result<Vec<ScanCell<'a>>, LoadError>;
}

/// 装载目标：从 Rows 消费零到多行，返回消费的行数。
pub trait LoadTarget {
    fn load_from(&mut self, rows: &mut dyn Rows) -> Result<usize, LoadError>;
}

/// 把结果行装入目标，返回消费的行数。
pub fn load<T: LoadTarget + ?Sized>(rows: &mut dyn Rows, dest: &mut T) -> Result<usize, LoadError> {
    dest.load_from(rows)
}

/// 恰好一行：零行报 [`LoadError::NotFound`]，多余的行不消费。
pub fn load_one<T: LoadTarget + ?Sized>(rows: &mut dyn Rows, dest: &mut T) -> Result<(), LoadError> {
    if dest.load_from(rows)? == 0 {
        return Err(LoadError::NotFound);
    }
    Ok(())
}

/// 单一目标的通用装载：只消费第一行，零行返回 0。
pub fn load_single_row<T: RowTarget>(dest: &mut T, rows: &mut dyn Rows) -> Result<usize, LoadError> {
    if !rows.advance()? {
        return Ok(0);
    }
    let columns = rows.columns().to_vec();
    let mut cells = dest.bind_row(&columns)?;
    rows.scan(&mut cells)?;
    Ok(1)
}

// 标量目标：第一列写入自身，其余列丢弃。
macro_rules! scalar_row_target {
    ($($t:ty),+ $(,)?) => {
        $(
            impl RowTarget for $t {
                fn bind_row<'a>(
                    &'a mut self,
                    columns: &[String],
                ) -> Result<Vec<ScanCell<'a>>, LoadError> {
                    if columns.is_empty() {
                        return Err(LoadError::NotEnoughColumns { want: 1, got: 0 });
                    }
                    let mut cells = vec![ScanCell::from_ptr(self as *mut $t)];
                    cells.extend((1..columns.len()).map(|_| ScanCell::discard()));
                    Ok(cells)
                }
            }

            impl LoadTarget for $t {
                fn load_from(&mut self, rows: &mut dyn Rows) -> Result<usize, LoadError> {
                    load_single_row(self, rows)
                }
            }
        )+
    };
}

scalar_row_target!(
    i16,
    i32,
    i64,
    u32,
    u64,
    f64,
    bool,
    String,
    Value,
    Option<i64>,
    Option<String>,
);

/// 有序集合：每行分配一个新元素。
impl<T: RowTarget> LoadTarget for Vec<T> {
    fn load_from(&mut self, rows: &mut dyn Rows) -> Result<usize, LoadError> {
        let columns = rows.columns().to_vec();
        let mut n = 0;
        while rows.advance()? {
            let mut elem = T::default();
            {
                let mut cells = elem.bind_row(&columns)?;
                rows.scan(&mut cells)?;
            }
            self.push(elem);
            n += 1;
        }
        Ok(n)
    }
}

fn split_key_columns(columns: &[String]) -> Result<Vec<String>, LoadError> {
    if columns.len() < 2 {
        return Err(LoadError::NotEnoughColumns {
            want: 2,
            got: columns.len(),
        });
    }
    Ok(columns[1..].to_vec())
}

fn scan_keyed_row<K, V>(rows: &mut dyn Rows, value_cols: &[String]) -> Result<(K, V), LoadError>
where
    K: ScanFromValue,
    V: RowTarget,
{
    let mut key_raw = Value::Null;
    let mut value = V::default();
    {
        let mut cells = Vec::with_capacity(value_cols.len() + 1);
        cells.push(ScanCell::from_ptr(&mut key_raw as *mut Value));
        cells.extend(value.bind_row(value_cols)?);
        rows.scan(&mut cells)?;
    }
    Ok((K::scan_from(key_raw)?, value))
}

/// 键值映射：第一列是键，其余列装入新分配的值；键重复时后到覆盖先到。
impl<K, V> LoadTarget for HashMap<K, V>
where
    K: ScanFromValue + Eq + Hash + 'static,
    V: RowTarget,
{
    fn load_from(&mut self, rows: &mut dyn Rows) -> Result<usize, LoadError> {
        let value_cols = split_key_columns(rows.columns())?;
        let mut n = 0;
        while rows.advance()? {
            let (key, value) = scan_keyed_row::<K, V>(rows, &value_cols)?;
            self.insert(key, value);
            n += 1;
        }
        Ok(n)
    }
}

/// 键到有序集合的映射：重复键按行到达顺序追加，不覆盖。
#[derive(Debug, Clone, Default)]
pub struct GroupMap<K, V>(pub HashMap<K, Vec<V>>);

impl<K, V> std::ops::Deref for GroupMap<K, V> {
    type Target = HashMap<K, Vec<V>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K, V> std::ops::DerefMut for GroupMap<K, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<K, V> LoadTarget for GroupMap<K, V>
where
    K: ScanFromValue + Eq + Hash + 'static,
    V: RowTarget,
{
    fn load_from(&mut self, rows: &mut dyn Rows) -> Result<usize, LoadError> {
        let value_cols = split_key_columns(rows.columns())?;
        let mut n = 0;
        while rows.advance()? {
            let (key, value) = scan_keyed_row::<K, V>(rows, &value_cols)?;
            self.0.entry(key).or_default().push(value);
            n += 1;
        }
        Ok(n)
    }
}

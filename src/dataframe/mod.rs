//! データフレームモジュール
//!
//! 名前付き・同一長の列の順序付き集合を提供します。変換は常に新しい
//! DataFrameを返し、入力をその場で書き換えることはありません。

use crate::error::{Error, Result};
use crate::series::Column;

/// データフレーム構造体
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    // 列の順序を保持するため、(名前, 列) のベクトルで保持する
    columns: Vec<(String, Column)>,
}

impl DataFrame {
    /// 新しい空のDataFrameを作成
    pub fn new() -> Self {
        DataFrame {
            columns: Vec::new(),
        }
    }

    /// 行数を取得
    pub fn row_count(&self) -> usize {
        self.columns.first().map(|(_, col)| col.len()).unwrap_or(0)
    }

    /// 列数を取得
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// 列名の一覧を取得（追加順）
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// 列が存在するかどうか
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// 名前で列を取得
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, col)| col)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// 列を追加
    ///
    /// 列名の重複と行数の不一致はエラーになります。
    pub fn add_column(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(Error::DuplicateColumnName(name));
        }
        if !self.columns.is_empty() && column.len() != self.row_count() {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count(),
                found: column.len(),
            });
        }
        self.columns.push((name, column));
        Ok(())
    }

    /// 既存の列を置き換える
    pub fn replace_column(&mut self, name: &str, column: Column) -> Result<()> {
        if column.len() != self.row_count() {
            return Err(Error::InconsistentRowCount {
                expected: self.row_count(),
                found: column.len(),
            });
        }
        let slot = self
            .columns
            .iter_mut()
            .find(|(n, _)| n == name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        slot.1 = column;
        Ok(())
    }

    /// 指定した列を取り除いた新しいDataFrameを返す
    ///
    /// 存在しない列名を指定した場合はエラーになります。
    pub fn drop_columns(&self, names: &[&str]) -> Result<DataFrame> {
        for name in names {
            if !self.has_column(name) {
                return Err(Error::ColumnNotFound(name.to_string()));
            }
        }
        let columns = self
            .columns
            .iter()
            .filter(|(n, _)| !names.contains(&n.as_str()))
            .cloned()
            .collect();
        Ok(DataFrame { columns })
    }

    /// 数値列のみを残した新しいDataFrameを返す
    pub fn select_numeric(&self) -> DataFrame {
        let columns = self
            .columns
            .iter()
            .filter(|(_, col)| col.is_numeric())
            .cloned()
            .collect();
        DataFrame { columns }
    }

    /// 指定した位置の行を集めた新しいDataFrameを返す
    pub fn take_rows(&self, indices: &[usize]) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(self.columns.len());
        for (name, col) in &self.columns {
            columns.push((name.clone(), col.take(indices)?));
        }
        Ok(DataFrame { columns })
    }

    /// 全ての列をf64の列優先行列として取得する
    ///
    /// 数値列以外やNAが含まれる場合はエラーになります。
    pub fn to_f64_matrix(&self) -> Result<Vec<Vec<f64>>> {
        let mut matrix = Vec::with_capacity(self.columns.len());
        for (name, col) in &self.columns {
            let values = col.to_vec_f64().map_err(|e| match e {
                Error::MissingValue(_) => Error::MissingValue(name.clone()),
                _ => Error::Cast(format!("列 {} を数値行列に変換できません", name)),
            })?;
            matrix.push(values);
        }
        Ok(matrix)
    }
}

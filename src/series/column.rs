use crate::error::{Error, Result};
use crate::na::NA;
use crate::series::NASeries;

/// 列の型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int64,
    Float64,
    Utf8,
}

/// 型付きの列
///
/// CSVの型推論が生成する3種類の列を表します。
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int64(NASeries<i64>),
    Float64(NASeries<f64>),
    Utf8(NASeries<String>),
}

impl Column {
    /// 列の型を取得
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Int64(_) => ColumnType::Int64,
            Column::Float64(_) => ColumnType::Float64,
            Column::Utf8(_) => ColumnType::Utf8,
        }
    }

    /// 列の長さを取得
    pub fn len(&self) -> usize {
        match self {
            Column::Int64(s) => s.len(),
            Column::Float64(s) => s.len(),
            Column::Utf8(s) => s.len(),
        }
    }

    /// 列が空かどうか
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// NAの数をカウント
    pub fn null_count(&self) -> usize {
        match self {
            Column::Int64(s) => s.null_count(),
            Column::Float64(s) => s.null_count(),
            Column::Utf8(s) => s.null_count(),
        }
    }

    /// 数値列かどうか
    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Int64(_) | Column::Float64(_))
    }

    /// 全ての値をf64として取得する（数値列のみ、NAはエラー）
    pub fn to_vec_f64(&self) -> Result<Vec<f64>> {
        match self {
            Column::Int64(s) => s.to_vec_f64(),
            Column::Float64(s) => s.to_vec_f64(),
            Column::Utf8(_) => Err(Error::Cast(
                "文字列列を数値に変換することはできません".to_string(),
            )),
        }
    }

    /// NAを除いた値の中央値を計算（数値列のみ）
    pub fn median(&self) -> Result<f64> {
        match self {
            Column::Int64(s) => s.median(),
            Column::Float64(s) => s.median(),
            Column::Utf8(_) => Err(Error::InvalidOperation(
                "文字列列の中央値は計算できません".to_string(),
            )),
        }
    }

    /// NAを列の中央値で埋めた新しい列を返す（数値列のみ）
    ///
    /// 中央値は整数になるとは限らないため、NAを含むInt64列はFloat64列に
    /// 昇格します。NAを含まない列はそのまま返します。
    pub fn fill_na_with_median(&self) -> Result<Column> {
        if self.null_count() == 0 {
            return Ok(self.clone());
        }
        match self {
            Column::Int64(s) => {
                let median = s.median()?;
                let values = s
                    .values()
                    .iter()
                    .map(|v| match v {
                        NA::Value(x) => NA::Value(*x as f64),
                        NA::NA => NA::Value(median),
                    })
                    .collect();
                Ok(Column::Float64(NASeries::new(values, s.name().cloned())))
            }
            Column::Float64(s) => {
                let median = s.median()?;
                Ok(Column::Float64(s.fill_na(median)))
            }
            Column::Utf8(_) => Err(Error::InvalidOperation(
                "文字列列の中央値は計算できません".to_string(),
            )),
        }
    }

    /// NAを指定した文字列で埋めた新しい列を返す（文字列列のみ）
    pub fn fill_na_utf8(&self, placeholder: &str) -> Result<Column> {
        match self {
            Column::Utf8(s) => Ok(Column::Utf8(s.fill_na(placeholder.to_string()))),
            _ => Err(Error::InvalidOperation(
                "文字列列ではありません".to_string(),
            )),
        }
    }

    /// 指定した位置の値を集めた新しい列を返す
    pub fn take(&self, indices: &[usize]) -> Result<Column> {
        match self {
            Column::Int64(s) => Ok(Column::Int64(s.take(indices)?)),
            Column::Float64(s) => Ok(Column::Float64(s.take(indices)?)),
            Column::Utf8(s) => Ok(Column::Utf8(s.take(indices)?)),
        }
    }

    /// 指定した位置の値を表示用の文字列として取得（NAは空文字列）
    pub fn value_to_string(&self, pos: usize) -> String {
        match self {
            Column::Int64(s) => match s.get(pos) {
                Some(NA::Value(v)) => v.to_string(),
                _ => String::new(),
            },
            Column::Float64(s) => match s.get(pos) {
                Some(NA::Value(v)) => v.to_string(),
                _ => String::new(),
            },
            Column::Utf8(s) => match s.get(pos) {
                Some(NA::Value(v)) => v.clone(),
                _ => String::new(),
            },
        }
    }
}

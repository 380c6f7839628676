mod column;

use num_traits::NumCast;
use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::na::NA;

pub use self::column::{Column, ColumnType};

/// 欠損値をサポートするSeries構造体
#[derive(Debug, Clone, PartialEq)]
pub struct NASeries<T>
where
    T: Debug + Clone,
{
    /// Seriesのデータ値（NA型でラップ）
    values: Vec<NA<T>>,

    /// 名前（オプション）
    name: Option<String>,
}

impl<T> NASeries<T>
where
    T: Debug + Clone,
{
    /// 新しいNASeriesをベクトルから作成
    pub fn new(values: Vec<NA<T>>, name: Option<String>) -> Self {
        NASeries { values, name }
    }

    /// 通常のベクトルから作成（NAを含まない）
    pub fn from_vec(values: Vec<T>, name: Option<String>) -> Self {
        let na_values = values.into_iter().map(NA::Value).collect();
        Self::new(na_values, name)
    }

    /// Optionベクトルから作成（Noneを含む可能性あり）
    pub fn from_options(values: Vec<Option<T>>, name: Option<String>) -> Self {
        let na_values = values.into_iter().map(NA::from).collect();
        Self::new(na_values, name)
    }

    /// Seriesの長さを取得
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Seriesが空かどうか
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 位置から値を取得
    pub fn get(&self, pos: usize) -> Option<&NA<T>> {
        self.values.get(pos)
    }

    /// 値の配列を取得
    pub fn values(&self) -> &[NA<T>] {
        &self.values
    }

    /// 名前を取得
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// 名前を設定
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// NAの数をカウント
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_na()).count()
    }

    /// NAが含まれるかどうか
    pub fn has_na(&self) -> bool {
        self.values.iter().any(|v| v.is_na())
    }

    /// NAを指定した値で埋めた新しいSeriesを返す
    pub fn fill_na(&self, fill_value: T) -> NASeries<T> {
        let values = self
            .values
            .iter()
            .map(|v| match v {
                NA::Value(x) => NA::Value(x.clone()),
                NA::NA => NA::Value(fill_value.clone()),
            })
            .collect();
        NASeries::new(values, self.name.clone())
    }

    /// 指定した位置の値を集めた新しいSeriesを返す
    pub fn take(&self, indices: &[usize]) -> Result<NASeries<T>> {
        let mut values = Vec::with_capacity(indices.len());
        for &idx in indices {
            let value = self.values.get(idx).ok_or(Error::IndexOutOfBounds {
                index: idx,
                size: self.values.len(),
            })?;
            values.push(value.clone());
        }
        Ok(NASeries::new(values, self.name.clone()))
    }
}

// 数値型のSeriesに対する特化実装
impl<T> NASeries<T>
where
    T: Debug + Clone + Copy + NumCast + PartialOrd,
{
    /// 全ての値をf64として取得する
    ///
    /// NAが含まれる場合はエラーになります。
    pub fn to_vec_f64(&self) -> Result<Vec<f64>> {
        let mut result = Vec::with_capacity(self.values.len());
        for value in &self.values {
            match value {
                NA::Value(v) => {
                    let casted = num_traits::cast::<T, f64>(*v).ok_or_else(|| {
                        Error::Cast(format!("数値に変換できません: {:?}", v))
                    })?;
                    result.push(casted);
                }
                NA::NA => {
                    return Err(Error::MissingValue(
                        self.name.clone().unwrap_or_else(|| "<unnamed>".to_string()),
                    ));
                }
            }
        }
        Ok(result)
    }

    /// NAを除いた値の平均を計算
    pub fn mean(&self) -> Result<f64> {
        let values = self.non_na_f64()?;
        if values.is_empty() {
            return Err(Error::EmptyData("平均を計算する値がありません".to_string()));
        }
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// NAを除いた値の中央値を計算
    pub fn median(&self) -> Result<f64> {
        let mut values = self.non_na_f64()?;
        if values.is_empty() {
            return Err(Error::EmptyData(
                "中央値を計算する値がありません".to_string(),
            ));
        }
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let mid = values.len() / 2;
        if values.len() % 2 == 0 {
            Ok((values[mid - 1] + values[mid]) / 2.0)
        } else {
            Ok(values[mid])
        }
    }

    /// NA以外の値をf64ベクトルとして集める
    fn non_na_f64(&self) -> Result<Vec<f64>> {
        let mut result = Vec::with_capacity(self.values.len());
        for value in &self.values {
            if let NA::Value(v) = value {
                let casted = num_traits::cast::<T, f64>(*v)
                    .ok_or_else(|| Error::Cast(format!("数値に変換できません: {:?}", v)))?;
                result.push(casted);
            }
        }
        Ok(result)
    }
}

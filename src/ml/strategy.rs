//! データ処理戦略モジュール
//!
//! 前処理と学習・テスト分割を、共通の契約の背後で入れ替え可能な
//! 戦略として提供します。

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::series::NASeries;

/// データ処理戦略のトレイト
///
/// 前処理はDataFrameを、分割はTrainTestSplitを生成するため、
/// 出力の型は関連型で表します。
pub trait DataStrategy {
    /// 戦略が生成する出力の型
    type Output;

    /// データを変換する
    fn handle_data(&self, df: &DataFrame) -> Result<Self::Output>;
}

/// 前処理戦略
///
/// タイムスタンプ列と識別子列を削除し、数値列の欠損値を中央値で、
/// レビュータイトルの欠損値をプレースホルダで補完したうえで、
/// 数値列のみを残します。
pub struct DataPreprocessStrategy {
    /// 削除するタイムスタンプ列
    timestamp_columns: Vec<String>,
    /// 中央値で補完する数値列
    median_fill_columns: Vec<String>,
    /// プレースホルダで補完する文字列列
    title_column: String,
    /// 補完に使うプレースホルダ
    title_placeholder: String,
    /// 数値フィルタ後に削除する識別子列
    id_columns: Vec<String>,
}

impl Default for DataPreprocessStrategy {
    fn default() -> Self {
        DataPreprocessStrategy {
            timestamp_columns: vec![
                "order_approved_at".to_string(),
                "order_delivered_carrier_date".to_string(),
                "order_delivered_customer_date".to_string(),
                "order_estimated_delivery_date".to_string(),
                "order_purchase_timestamp".to_string(),
            ],
            median_fill_columns: vec![
                "product_weight_g".to_string(),
                "product_length_cm".to_string(),
                "product_height_cm".to_string(),
                "product_width_cm".to_string(),
            ],
            title_column: "review_comment_title".to_string(),
            title_placeholder: "No Title".to_string(),
            id_columns: vec![
                "customer_zip_code_prefix".to_string(),
                "order_item_id".to_string(),
            ],
        }
    }
}

impl DataPreprocessStrategy {
    /// 新しい前処理戦略を作成
    pub fn new() -> Self {
        Default::default()
    }
}

impl DataStrategy for DataPreprocessStrategy {
    type Output = DataFrame;

    fn handle_data(&self, df: &DataFrame) -> Result<DataFrame> {
        // タイムスタンプ列の削除
        let names: Vec<&str> = self.timestamp_columns.iter().map(String::as_str).collect();
        let mut data = df.drop_columns(&names)?;

        // 数値列の欠損値を中央値で補完
        for name in &self.median_fill_columns {
            let filled = data.column(name)?.fill_na_with_median()?;
            data.replace_column(name, filled)?;
        }

        // レビュータイトルの欠損値をプレースホルダで補完
        let filled = data
            .column(&self.title_column)?
            .fill_na_utf8(&self.title_placeholder)?;
        data.replace_column(&self.title_column, filled)?;

        // 数値列のみを残す（文字列列はここで落ちる）
        let data = data.select_numeric();

        // 識別子列の削除
        let names: Vec<&str> = self.id_columns.iter().map(String::as_str).collect();
        data.drop_columns(&names)
    }
}

/// 学習・テスト分割の結果
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    /// 学習用の特徴量
    pub x_train: DataFrame,
    /// テスト用の特徴量
    pub x_test: DataFrame,
    /// 学習用のラベル
    pub y_train: NASeries<f64>,
    /// テスト用のラベル
    pub y_test: NASeries<f64>,
}

/// 学習・テスト分割戦略
///
/// 目的変数の列を特徴量から切り離し、シード付きシャッフルで
/// 行を学習用とテスト用に分割します。同じデータとシードに対して
/// 分割は決定的です。
pub struct DataSplitStrategy {
    target_column: String,
    test_size: f64,
    seed: u64,
}

impl Default for DataSplitStrategy {
    fn default() -> Self {
        DataSplitStrategy {
            target_column: "review_score".to_string(),
            test_size: 0.2,
            seed: 42,
        }
    }
}

impl DataSplitStrategy {
    /// 新しい分割戦略を作成
    pub fn new(target_column: impl Into<String>, test_size: f64, seed: u64) -> Self {
        DataSplitStrategy {
            target_column: target_column.into(),
            test_size,
            seed,
        }
    }
}

impl DataStrategy for DataSplitStrategy {
    type Output = TrainTestSplit;

    fn handle_data(&self, df: &DataFrame) -> Result<TrainTestSplit> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(Error::InvalidOperation(format!(
                "テストデータの割合は0と1の間である必要があります: {}",
                self.test_size
            )));
        }

        let n = df.row_count();
        if n == 0 {
            return Err(Error::EmptyData("分割対象のデータが空です".to_string()));
        }

        // 目的変数を特徴量から切り離す
        let y_values = df.column(&self.target_column)?.to_vec_f64()?;
        let x = df.drop_columns(&[self.target_column.as_str()])?;

        // シード付きシャッフルによる行の分割
        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(self.seed);
        indices.shuffle(&mut rng);

        let n_test = ((n as f64) * self.test_size).ceil() as usize;
        if n_test == 0 || n_test >= n {
            return Err(Error::InsufficientData(format!(
                "行数 {} は学習用とテスト用に分割できません",
                n
            )));
        }
        let (test_indices, train_indices) = indices.split_at(n_test);

        let gather = |idx: &[usize]| -> NASeries<f64> {
            NASeries::from_vec(
                idx.iter().map(|&i| y_values[i]).collect(),
                Some(self.target_column.clone()),
            )
        };

        Ok(TrainTestSplit {
            x_train: x.take_rows(train_indices)?,
            x_test: x.take_rows(test_indices)?,
            y_train: gather(train_indices),
            y_test: gather(test_indices),
        })
    }
}

/// データの前処理と分割を戦略に委譲するクラス
pub struct DataCleaner<S: DataStrategy> {
    data: DataFrame,
    strategy: S,
}

impl<S: DataStrategy> DataCleaner<S> {
    /// データと戦略からDataCleanerを作成
    pub fn new(data: DataFrame, strategy: S) -> Self {
        DataCleaner { data, strategy }
    }

    /// 保持しているデータに戦略を適用する
    pub fn handle_data(&self) -> Result<S::Output> {
        self.strategy.handle_data(&self.data)
    }
}

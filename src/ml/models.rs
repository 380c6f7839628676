//! 機械学習モデルモジュール
//!
//! モデルの学習と学習済みモデルによる予測を提供します。

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::series::NASeries;
use crate::stats;

/// 線形回帰の学習設定
///
/// 下層のソルバーにそのまま渡されます。
#[derive(Debug, Clone, Copy)]
pub struct LinearRegressionConfig {
    /// 切片をフィットするかどうか
    pub fit_intercept: bool,
}

impl Default for LinearRegressionConfig {
    fn default() -> Self {
        LinearRegressionConfig {
            fit_intercept: true,
        }
    }
}

/// 教師あり学習モデルに共通するトレイト
pub trait Model {
    /// 学習済みモデルの型
    type Fitted;

    /// モデルを訓練データでフィットさせ、学習済みモデルを返す
    fn train(&self, x_train: &DataFrame, y_train: &NASeries<f64>) -> Result<Self::Fitted>;
}

/// 線形回帰モデル
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    config: LinearRegressionConfig,
}

impl LinearRegression {
    /// 新しい線形回帰モデルを作成
    pub fn new() -> Self {
        Self::with_config(LinearRegressionConfig::default())
    }

    /// 学習設定を指定して線形回帰モデルを作成
    pub fn with_config(config: LinearRegressionConfig) -> Self {
        LinearRegression { config }
    }
}

impl Model for LinearRegression {
    type Fitted = FittedLinearRegression;

    fn train(&self, x_train: &DataFrame, y_train: &NASeries<f64>) -> Result<FittedLinearRegression> {
        if x_train.column_count() == 0 {
            return Err(Error::InvalidOperation(
                "特徴量が1つもありません".to_string(),
            ));
        }

        if y_train.len() != x_train.row_count() {
            return Err(Error::LengthMismatch {
                expected: x_train.row_count(),
                actual: y_train.len(),
            });
        }

        let feature_names: Vec<String> = x_train
            .column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let x_matrix = x_train.to_f64_matrix()?;
        let y = y_train.to_vec_f64()?;

        let fit = stats::regression::ols_fit(&x_matrix, &y, self.config.fit_intercept)?;
        log::info!("モデルの学習が完了しました: R^2 = {}", fit.r_squared);

        Ok(FittedLinearRegression {
            intercept: fit.intercept,
            coefficients: fit.coefficients,
            feature_names,
        })
    }
}

/// 学習済みの線形回帰モデル
///
/// 学習後は変更されません。
#[derive(Debug, Clone)]
pub struct FittedLinearRegression {
    intercept: f64,
    coefficients: Vec<f64>,
    feature_names: Vec<String>,
}

impl FittedLinearRegression {
    /// 切片を取得
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// 回帰係数を取得（特徴量の順）
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// 特徴量の名前を取得
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// 新しいデータに対して予測を行う
    ///
    /// 学習時の特徴量列が全て存在している必要があります。
    pub fn predict(&self, df: &DataFrame) -> Result<Vec<f64>> {
        let mut columns = Vec::with_capacity(self.feature_names.len());
        for name in &self.feature_names {
            let values = df.column(name)?.to_vec_f64()?;
            columns.push(values);
        }

        let n = df.row_count();
        let mut predictions = Vec::with_capacity(n);
        for i in 0..n {
            let mut pred = self.intercept;
            for (j, col) in columns.iter().enumerate() {
                pred += self.coefficients[j] * col[i];
            }
            predictions.push(pred);
        }

        Ok(predictions)
    }
}

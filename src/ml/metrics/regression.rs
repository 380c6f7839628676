//! 回帰モデル評価のためのメトリクス

use crate::error::{Error, Result};

/// 平均二乗誤差（Mean Squared Error）を計算
///
/// # Arguments
/// * `y_true` - 真の値
/// * `y_pred` - 予測値
///
/// # Returns
/// * `Result<f64>` - 平均二乗誤差
pub fn mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    validate_lengths(y_true, y_pred)?;

    let sum_squared_error = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&true_val, &pred_val)| {
            let error = true_val - pred_val;
            error * error
        })
        .sum::<f64>();

    Ok(sum_squared_error / y_true.len() as f64)
}

/// 平均二乗誤差の平方根（Root Mean Squared Error）を計算
///
/// # Arguments
/// * `y_true` - 真の値
/// * `y_pred` - 予測値
///
/// # Returns
/// * `Result<f64>` - 平均二乗誤差の平方根
pub fn root_mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    let mse = mean_squared_error(y_true, y_pred)?;
    Ok(mse.sqrt())
}

/// 決定係数（R^2 score）を計算
///
/// # Arguments
/// * `y_true` - 真の値
/// * `y_pred` - 予測値
///
/// # Returns
/// * `Result<f64>` - 決定係数（1が最高、悪化すると負の値になり得る）
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    validate_lengths(y_true, y_pred)?;

    // 真の値の平均を計算
    let y_mean = y_true.iter().sum::<f64>() / y_true.len() as f64;

    // 全変動（total sum of squares）を計算
    let ss_tot = y_true
        .iter()
        .map(|&true_val| {
            let diff = true_val - y_mean;
            diff * diff
        })
        .sum::<f64>();

    // 残差平方和（residual sum of squares）を計算
    let ss_res = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&true_val, &pred_val)| {
            let error = true_val - pred_val;
            error * error
        })
        .sum::<f64>();

    // ss_totが0の場合（全てのy_trueが同じ値）
    if ss_tot == 0.0 {
        if ss_res == 0.0 {
            // 完全な予測（y_true = y_predのとき）
            Ok(1.0)
        } else {
            // 定数予測で誤差がある場合
            Ok(0.0)
        }
    } else {
        Ok(1.0 - (ss_res / ss_tot))
    }
}

/// 両系列が空でなく、長さが一致していることを検証する
fn validate_lengths(y_true: &[f64], y_pred: &[f64]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(Error::DimensionMismatch(format!(
            "真の値と予測値の長さが一致しません: {} vs {}",
            y_true.len(),
            y_pred.len()
        )));
    }

    if y_true.is_empty() {
        return Err(Error::EmptyData(
            "空のデータで計算することはできません".to_string(),
        ));
    }

    Ok(())
}

/// モデル評価戦略のトレイト
pub trait Evaluation {
    /// メトリクスの名前
    fn name(&self) -> &'static str;

    /// スコアを計算する
    ///
    /// # Arguments
    /// * `y_true` - 真の値
    /// * `y_pred` - 予測値
    fn calculate_scores(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64>;
}

/// 平均二乗誤差による評価戦略
pub struct Mse;

impl Evaluation for Mse {
    fn name(&self) -> &'static str {
        "MSE"
    }

    fn calculate_scores(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        log::info!("MSEを計算中");
        let mse = mean_squared_error(y_true, y_pred)?;
        log::info!("MSE: {}", mse);
        Ok(mse)
    }
}

/// 決定係数による評価戦略
pub struct R2;

impl Evaluation for R2 {
    fn name(&self) -> &'static str {
        "R2"
    }

    fn calculate_scores(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        log::info!("R2を計算中");
        let r2 = r2_score(y_true, y_pred)?;
        log::info!("R2: {}", r2);
        Ok(r2)
    }
}

/// 平均二乗誤差の平方根による評価戦略
pub struct Rmse;

impl Evaluation for Rmse {
    fn name(&self) -> &'static str {
        "RMSE"
    }

    fn calculate_scores(&self, y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
        log::info!("RMSEを計算中");
        let rmse = root_mean_squared_error(y_true, y_pred)?;
        log::info!("RMSE: {}", rmse);
        Ok(rmse)
    }
}

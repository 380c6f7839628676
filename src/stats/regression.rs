// 回帰分析モジュール

use crate::error::{Error, Result};

/// 最小二乗法によるフィット結果
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// 切片
    pub intercept: f64,
    /// 回帰係数（説明変数ごと）
    pub coefficients: Vec<f64>,
    /// 学習データに対する予測値
    pub fitted_values: Vec<f64>,
    /// 決定係数（R²）
    pub r_squared: f64,
}

/// 列優先の計画行列に対して最小二乗法でフィットする
///
/// `x_columns` は説明変数ごとの値ベクトル、`y` は目的変数です。
/// `fit_intercept` がtrueの場合は切片項を追加します。
pub fn ols_fit(x_columns: &[Vec<f64>], y: &[f64], fit_intercept: bool) -> Result<OlsFit> {
    if x_columns.is_empty() {
        return Err(Error::InvalidOperation(
            "回帰には少なくとも1つの説明変数が必要です".to_string(),
        ));
    }

    let n = y.len();
    if n == 0 {
        return Err(Error::EmptyData("目的変数が空です".to_string()));
    }

    for col in x_columns {
        if col.len() != n {
            return Err(Error::DimensionMismatch(format!(
                "列の長さが一致しません: y={}, x={}",
                n,
                col.len()
            )));
        }
    }

    let num_params = x_columns.len() + usize::from(fit_intercept);
    if n < num_params {
        return Err(Error::InsufficientData(format!(
            "パラメータ数 {} に対して行数 {} が不足しています",
            num_params, n
        )));
    }

    // 計画行列（列優先）。切片用の列は全て1.0
    let mut design: Vec<Vec<f64>> = Vec::with_capacity(num_params);
    if fit_intercept {
        design.push(vec![1.0; n]);
    }
    for col in x_columns {
        design.push(col.clone());
    }

    // β = (X^T * X)^(-1) * X^T * y
    let xt_x = matrix_multiply_transpose(&design, &design);
    let xt_x_inv = matrix_inverse(&xt_x)?;
    let xt_y = vec_multiply_transpose(&design, y);

    let k = design.len();
    let mut params = vec![0.0; k];
    for i in 0..k {
        let mut sum = 0.0;
        for j in 0..k {
            sum += xt_x_inv[i][j] * xt_y[j];
        }
        params[i] = sum;
    }

    // 切片と係数の分離
    let (intercept, coefficients) = if fit_intercept {
        (params[0], params[1..].to_vec())
    } else {
        (0.0, params)
    };

    // 予測値の計算
    let mut fitted_values = vec![0.0; n];
    for i in 0..n {
        let mut value = intercept;
        for (j, col) in x_columns.iter().enumerate() {
            value += coefficients[j] * col[i];
        }
        fitted_values[i] = value;
    }

    // 決定係数（R²）の計算
    let y_mean = y.iter().sum::<f64>() / n as f64;
    let ss_total = y.iter().map(|&v| (v - y_mean).powi(2)).sum::<f64>();
    let ss_residual = y
        .iter()
        .zip(fitted_values.iter())
        .map(|(&v, &f)| (v - f).powi(2))
        .sum::<f64>();

    // ss_totalが0の場合（全てのyが同じ値）
    let r_squared = if ss_total == 0.0 {
        if ss_residual == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - ss_residual / ss_total
    };

    Ok(OlsFit {
        intercept,
        coefficients,
        fitted_values,
        r_squared,
    })
}

/// 行列の転置積（A^T * B）を計算
fn matrix_multiply_transpose(a: &[Vec<f64>], b: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = a.len();
    let m = b.len();

    let mut result = vec![vec![0.0; m]; n];

    for i in 0..n {
        for j in 0..m {
            let mut sum = 0.0;
            for k in 0..a[i].len() {
                sum += a[i][k] * b[j][k];
            }
            result[i][j] = sum;
        }
    }

    result
}

/// ベクトルの転置積（A^T * y）を計算
fn vec_multiply_transpose(a: &[Vec<f64>], y: &[f64]) -> Vec<f64> {
    let n = a.len();
    let mut result = vec![0.0; n];

    for i in 0..n {
        let mut sum = 0.0;
        for k in 0..y.len() {
            sum += a[i][k] * y[k];
        }
        result[i] = sum;
    }

    result
}

/// 行列の逆行列を計算（ガウス・ジョルダン法）
fn matrix_inverse(matrix: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
    let n = matrix.len();

    if n == 0 {
        return Err(Error::InvalidOperation("行列が空です".to_string()));
    }

    for row in matrix {
        if row.len() != n {
            return Err(Error::DimensionMismatch(
                "正方行列である必要があります".to_string(),
            ));
        }
    }

    // 拡張行列を作成 [A|I]
    let mut augmented = Vec::with_capacity(n);
    for i in 0..n {
        let mut row = Vec::with_capacity(2 * n);
        row.extend_from_slice(&matrix[i]);

        // 単位行列部分
        for j in 0..n {
            row.push(if i == j { 1.0 } else { 0.0 });
        }

        augmented.push(row);
    }

    // ガウス・ジョルダン消去法
    for i in 0..n {
        // ピボット選択
        let mut max_row = i;
        let mut max_val = augmented[i][i].abs();

        for j in i + 1..n {
            let abs_val = augmented[j][i].abs();
            if abs_val > max_val {
                max_row = j;
                max_val = abs_val;
            }
        }

        if max_val < 1e-10 {
            return Err(Error::ComputationError(
                "行列が特異です（逆行列が存在しません）".to_string(),
            ));
        }

        // 行の交換
        if max_row != i {
            augmented.swap(i, max_row);
        }

        // ピボット要素を1にする
        let pivot = augmented[i][i];
        for j in 0..2 * n {
            augmented[i][j] /= pivot;
        }

        // 他の行の消去
        for j in 0..n {
            if j != i {
                let factor = augmented[j][i];
                for k in 0..2 * n {
                    augmented[j][k] -= factor * augmented[i][k];
                }
            }
        }
    }

    // 結果の抽出（右半分が逆行列）
    let mut inverse = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..n {
            inverse[i][j] = augmented[i][j + n];
        }
    }

    Ok(inverse)
}

//! 線形回帰モデルのテスト

use predrs::error::Error;
use predrs::ml::models::{LinearRegression, LinearRegressionConfig, Model};
use predrs::series::{Column, NASeries};
use predrs::DataFrame;

// 1列の特徴量を持つDataFrameを準備するヘルパー関数
fn single_feature_df(name: &str, values: Vec<f64>) -> Result<DataFrame, Error> {
    let mut df = DataFrame::new();
    df.add_column(name, Column::Float64(NASeries::from_vec(values, None)))?;
    Ok(df)
}

#[test]
fn test_train_and_predict_exact_line() -> Result<(), Error> {
    // y = 2x + 1 を完全に復元できるはず
    let x_train = single_feature_df("x", vec![1.0, 2.0, 3.0, 4.0, 5.0])?;
    let y_train = NASeries::from_vec(vec![3.0, 5.0, 7.0, 9.0, 11.0], None);

    let model = LinearRegression::new();
    let fitted = model.train(&x_train, &y_train)?;

    assert!((fitted.intercept() - 1.0).abs() < 1e-10);
    assert!((fitted.coefficients()[0] - 2.0).abs() < 1e-10);
    assert_eq!(fitted.feature_names().to_vec(), vec!["x".to_string()]);

    let x_new = single_feature_df("x", vec![10.0, 20.0])?;
    let predictions = fitted.predict(&x_new)?;
    assert!((predictions[0] - 21.0).abs() < 1e-10);
    assert!((predictions[1] - 41.0).abs() < 1e-10);
    Ok(())
}

#[test]
fn test_train_without_intercept() -> Result<(), Error> {
    // 原点を通る直線 y = 3x
    let x_train = single_feature_df("x", vec![1.0, 2.0, 3.0, 4.0])?;
    let y_train = NASeries::from_vec(vec![3.0, 6.0, 9.0, 12.0], None);

    let model = LinearRegression::with_config(LinearRegressionConfig {
        fit_intercept: false,
    });
    let fitted = model.train(&x_train, &y_train)?;

    assert_eq!(fitted.intercept(), 0.0);
    assert!((fitted.coefficients()[0] - 3.0).abs() < 1e-10);
    Ok(())
}

#[test]
fn test_train_length_mismatch_is_error() -> Result<(), Error> {
    let x_train = single_feature_df("x", vec![1.0, 2.0, 3.0])?;
    let y_train = NASeries::from_vec(vec![1.0, 2.0], None);

    let result = LinearRegression::new().train(&x_train, &y_train);
    assert!(matches!(result, Err(Error::LengthMismatch { .. })));
    Ok(())
}

#[test]
fn test_train_without_features_is_error() {
    let x_train = DataFrame::new();
    let y_train: NASeries<f64> = NASeries::from_vec(vec![], None);

    let result = LinearRegression::new().train(&x_train, &y_train);
    assert!(matches!(result, Err(Error::InvalidOperation(_))));
}

#[test]
fn test_train_collinear_features_is_error() -> Result<(), Error> {
    // 同一の2列は特異な正規方程式になる
    let mut x_train = single_feature_df("x1", vec![1.0, 2.0, 3.0, 4.0])?;
    x_train.add_column(
        "x2",
        Column::Float64(NASeries::from_vec(vec![1.0, 2.0, 3.0, 4.0], None)),
    )?;
    let y_train = NASeries::from_vec(vec![1.0, 2.0, 3.0, 4.0], None);

    let result = LinearRegression::new().train(&x_train, &y_train);
    assert!(matches!(result, Err(Error::ComputationError(_))));
    Ok(())
}

#[test]
fn test_predict_missing_feature_is_error() -> Result<(), Error> {
    let x_train = single_feature_df("x", vec![1.0, 2.0, 3.0])?;
    let y_train = NASeries::from_vec(vec![2.0, 4.0, 6.0], None);
    let fitted = LinearRegression::new().train(&x_train, &y_train)?;

    // 学習時の特徴量列がないDataFrameに対する予測はエラー
    let other = single_feature_df("z", vec![1.0])?;
    let result = fitted.predict(&other);
    assert!(matches!(result, Err(Error::ColumnNotFound(_))));
    Ok(())
}

#[test]
fn test_train_with_na_labels_is_error() -> Result<(), Error> {
    let x_train = single_feature_df("x", vec![1.0, 2.0, 3.0])?;
    let y_train = NASeries::from_options(vec![Some(1.0), None, Some(3.0)], None);

    let result = LinearRegression::new().train(&x_train, &y_train);
    assert!(matches!(result, Err(Error::MissingValue(_))));
    Ok(())
}

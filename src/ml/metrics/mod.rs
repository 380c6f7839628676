//! モデル評価メトリクスモジュール

pub mod regression;

pub use regression::{
    mean_squared_error, r2_score, root_mean_squared_error, Evaluation, Mse, Rmse, R2,
};

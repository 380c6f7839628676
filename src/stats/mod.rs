// 統計計算モジュール

pub mod regression;

pub use regression::{ols_fit, OlsFit};

//! 機械学習機能を提供するモジュール
//!
//! データ処理戦略・評価戦略・モデルを提供します。

pub mod metrics;
pub mod models;
pub mod strategy;

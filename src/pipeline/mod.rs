//! 学習パイプラインモジュール
//!
//! 取り込み → クリーニング → 学習 → 評価 を固定順序で実行します。
//! 分岐・リトライ・並列実行はなく、最初に失敗したステージで停止します。

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::io::csv::read_csv;
use crate::ml::metrics::{Evaluation, Mse, Rmse, R2};
use crate::ml::models::{FittedLinearRegression, LinearRegression, LinearRegressionConfig, Model};
use crate::ml::strategy::{
    DataCleaner, DataPreprocessStrategy, DataSplitStrategy, TrainTestSplit,
};

/// パイプラインの設定
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// 学習するモデルの名前
    pub model_name: String,
    /// 目的変数の列名
    pub target_column: String,
    /// テストデータの割合
    pub test_size: f64,
    /// 分割シャッフルのシード
    pub seed: u64,
    /// 切片をフィットするかどうか
    pub fit_intercept: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            model_name: "LinearRegression".to_string(),
            target_column: "review_score".to_string(),
            test_size: 0.2,
            seed: 42,
            fit_intercept: true,
        }
    }
}

impl PipelineConfig {
    /// JSONファイルから設定を読み込む
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(Error::Io)?;
        let config = serde_json::from_reader(BufReader::new(file)).map_err(Error::Json)?;
        Ok(config)
    }

    /// 設定されたモデル名からモデル種別を解決する
    pub fn model_kind(&self) -> Result<ModelKind> {
        ModelKind::from_name(&self.model_name)
    }
}

/// サポートされるモデルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    LinearRegression,
}

impl ModelKind {
    /// モデル名からモデル種別を解決する
    ///
    /// 未知の名前は設定エラーになります。
    pub fn from_name(name: &str) -> Result<ModelKind> {
        match name {
            "LinearRegression" => Ok(ModelKind::LinearRegression),
            other => Err(Error::UnsupportedModel(other.to_string())),
        }
    }
}

/// メトリクスの記録先
///
/// 実験トラッカーなどの外部コラボレータを表します。パイプラインは
/// スコアを通知するだけで、記録方法には関与しません。
pub trait MetricSink {
    /// 名前付きメトリクスを記録する
    fn log_metric(&mut self, name: &str, value: f64);
}

/// logクレート経由でメトリクスを出力する記録先
pub struct LogMetricSink;

impl MetricSink for LogMetricSink {
    fn log_metric(&mut self, name: &str, value: f64) {
        log::info!("メトリクス {}: {}", name, value);
    }
}

/// メトリクスをメモリに蓄積する記録先
#[derive(Debug, Default)]
pub struct RecordingMetricSink {
    /// 記録された (名前, 値) の一覧
    pub records: Vec<(String, f64)>,
}

impl MetricSink for RecordingMetricSink {
    fn log_metric(&mut self, name: &str, value: f64) {
        self.records.push((name.to_string(), value));
    }
}

/// 評価結果
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub mse: f64,
    pub r2: f64,
    pub rmse: f64,
}

/// データを取り込むステージ
pub fn ingest_data<P: AsRef<Path>>(data_path: P) -> Result<DataFrame> {
    log::info!("データを取り込み中: {}", data_path.as_ref().display());
    read_csv(data_path)
}

/// データをクリーニングして学習・テストに分割するステージ
pub fn clean_data(df: &DataFrame, config: &PipelineConfig) -> Result<TrainTestSplit> {
    let cleaner = DataCleaner::new(df.clone(), DataPreprocessStrategy::new());
    let processed = cleaner.handle_data()?;

    let split_strategy =
        DataSplitStrategy::new(config.target_column.clone(), config.test_size, config.seed);
    let cleaner = DataCleaner::new(processed, split_strategy);
    let split = cleaner.handle_data()?;

    log::info!(
        "データのクリーニングと分割が完了しました: 学習 {} 行, テスト {} 行",
        split.x_train.row_count(),
        split.x_test.row_count()
    );
    Ok(split)
}

/// モデルを学習するステージ
pub fn train_model(
    split: &TrainTestSplit,
    config: &PipelineConfig,
) -> Result<FittedLinearRegression> {
    match config.model_kind()? {
        ModelKind::LinearRegression => {
            let model = LinearRegression::with_config(LinearRegressionConfig {
                fit_intercept: config.fit_intercept,
            });
            model.train(&split.x_train, &split.y_train)
        }
    }
}

/// モデルを評価するステージ
///
/// テストデータに対する MSE・R2・RMSE を計算し、それぞれを記録先に
/// 通知します。
pub fn evaluate_model(
    model: &FittedLinearRegression,
    split: &TrainTestSplit,
    sink: &mut dyn MetricSink,
) -> Result<EvaluationReport> {
    let predictions = model.predict(&split.x_test)?;
    let y_test = split.y_test.to_vec_f64()?;

    let mse = Mse.calculate_scores(&y_test, &predictions)?;
    sink.log_metric(Mse.name(), mse);

    let r2 = R2.calculate_scores(&y_test, &predictions)?;
    sink.log_metric(R2.name(), r2);

    let rmse = Rmse.calculate_scores(&y_test, &predictions)?;
    sink.log_metric(Rmse.name(), rmse);

    Ok(EvaluationReport { mse, r2, rmse })
}

/// 学習パイプライン
pub struct TrainingPipeline {
    config: PipelineConfig,
}

impl TrainingPipeline {
    /// 設定からパイプラインを作成
    pub fn new(config: PipelineConfig) -> Self {
        TrainingPipeline { config }
    }

    /// デフォルト設定のパイプラインを作成
    pub fn with_defaults() -> Self {
        Self::new(PipelineConfig::default())
    }

    /// 設定を取得
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// パイプラインを実行する
    ///
    /// 各ステージのエラーは、どのステージで失敗したかを示す
    /// `Error::PipelineStage` でラップされます。
    pub fn run<P: AsRef<Path>>(
        &self,
        data_path: P,
        sink: &mut dyn MetricSink,
    ) -> Result<EvaluationReport> {
        // モデル設定はステージを実行する前に検証する
        self.config
            .model_kind()
            .map_err(|e| stage_error("configure", e))?;

        let df = ingest_data(data_path).map_err(|e| stage_error("ingest", e))?;
        let split = clean_data(&df, &self.config).map_err(|e| stage_error("clean", e))?;
        let model = train_model(&split, &self.config).map_err(|e| stage_error("train", e))?;
        let report =
            evaluate_model(&model, &split, sink).map_err(|e| stage_error("evaluate", e))?;

        Ok(report)
    }
}

fn stage_error(stage: &'static str, source: Error) -> Error {
    Error::PipelineStage {
        stage,
        source: Box::new(source),
    }
}

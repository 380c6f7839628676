//! 学習パイプラインのエンドツーエンドテスト

use std::io::Write;

use predrs::error::Error;
use predrs::pipeline::{
    ModelKind, PipelineConfig, RecordingMetricSink, TrainingPipeline,
};

// レビューデータを模したCSVファイルを準備するヘルパー関数
fn prepare_review_csv() -> Result<tempfile::NamedTempFile, Error> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(
        file,
        "order_purchase_timestamp,order_approved_at,order_delivered_carrier_date,\
         order_delivered_customer_date,order_estimated_delivery_date,\
         product_weight_g,product_length_cm,product_height_cm,product_width_cm,\
         review_comment_title,customer_zip_code_prefix,order_item_id,price,review_score"
    )?;

    for i in 0..20u64 {
        let ts = format!("2018-01-{:02} 10:00:00", i + 1);
        // 一部の行で数値・文字列フィールドを欠損させる
        let weight = if i == 3 || i == 11 {
            String::new()
        } else {
            format!("{}", 100 + 13 * i)
        };
        let length = if i == 5 {
            String::new()
        } else {
            format!("{}", 10 + (7 * i) % 23)
        };
        let height = format!("{}", 5 + (3 * i) % 11);
        let width = if i == 14 {
            String::new()
        } else {
            format!("{}", 8 + (5 * i) % 17)
        };
        let title = if i % 3 == 0 { "" } else { "ok" };
        let zip = 10000 + i;
        let item_id = i % 3 + 1;
        let price = 20.0 + 7.5 * i as f64 + ((i * i) % 13) as f64;
        let score = (2 * i + i * i) % 5 + 1;

        writeln!(
            file,
            "{ts},{ts},{ts},{ts},{ts},{weight},{length},{height},{width},{title},{zip},{item_id},{price},{score}"
        )?;
    }

    Ok(file)
}

#[test]
fn test_end_to_end_run() -> Result<(), Error> {
    let file = prepare_review_csv()?;

    let pipeline = TrainingPipeline::with_defaults();
    let mut sink = RecordingMetricSink::default();
    let report = pipeline.run(file.path(), &mut sink)?;

    // 3つのスコアは全て有限
    assert!(report.mse.is_finite());
    assert!(report.r2.is_finite());
    assert!(report.rmse.is_finite());
    assert!(report.mse >= 0.0);
    assert!((report.rmse - report.mse.sqrt()).abs() < 1e-10);

    // メトリクスは名前付きで記録先に通知される
    let names: Vec<&str> = sink.records.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["MSE", "R2", "RMSE"]);
    assert_eq!(sink.records[0].1, report.mse);
    assert_eq!(sink.records[1].1, report.r2);
    assert_eq!(sink.records[2].1, report.rmse);
    Ok(())
}

#[test]
fn test_run_is_deterministic() -> Result<(), Error> {
    let file = prepare_review_csv()?;
    let pipeline = TrainingPipeline::with_defaults();

    let mut sink = RecordingMetricSink::default();
    let first = pipeline.run(file.path(), &mut sink)?;
    let second = pipeline.run(file.path(), &mut sink)?;

    // 同じデータとシードに対して結果は決定的
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_unsupported_model_is_config_error() -> Result<(), Error> {
    let file = prepare_review_csv()?;

    let config = PipelineConfig {
        model_name: "RandomForest".to_string(),
        ..PipelineConfig::default()
    };
    let pipeline = TrainingPipeline::new(config);
    let mut sink = RecordingMetricSink::default();

    let err = pipeline.run(file.path(), &mut sink).unwrap_err();
    let (stage, source) = err.stage_source().expect("ステージエラーのはず");
    assert_eq!(stage, "configure");
    assert!(matches!(source, Error::UnsupportedModel(_)));

    // 失敗時にはメトリクスは記録されない
    assert!(sink.records.is_empty());
    Ok(())
}

#[test]
fn test_missing_file_fails_in_ingest_stage() {
    let pipeline = TrainingPipeline::with_defaults();
    let mut sink = RecordingMetricSink::default();

    let err = pipeline
        .run("/nonexistent/path/data.csv", &mut sink)
        .unwrap_err();
    let (stage, source) = err.stage_source().expect("ステージエラーのはず");
    assert_eq!(stage, "ingest");
    assert!(matches!(source, Error::Io(_)));
}

#[test]
fn test_missing_target_fails_in_clean_stage() -> Result<(), Error> {
    let file = prepare_review_csv()?;

    let config = PipelineConfig {
        target_column: "nonexistent".to_string(),
        ..PipelineConfig::default()
    };
    let pipeline = TrainingPipeline::new(config);
    let mut sink = RecordingMetricSink::default();

    let err = pipeline.run(file.path(), &mut sink).unwrap_err();
    let (stage, source) = err.stage_source().expect("ステージエラーのはず");
    assert_eq!(stage, "clean");
    assert!(matches!(source, Error::ColumnNotFound(_)));
    Ok(())
}

#[test]
fn test_model_kind_from_name() {
    assert_eq!(
        ModelKind::from_name("LinearRegression").unwrap(),
        ModelKind::LinearRegression
    );
    assert!(matches!(
        ModelKind::from_name("SupportVectorMachine"),
        Err(Error::UnsupportedModel(_))
    ));
}

#[test]
fn test_config_from_json_file() -> Result<(), Error> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, r#"{{"model_name": "LinearRegression", "seed": 7}}"#)?;

    let config = PipelineConfig::from_json_file(file.path())?;
    assert_eq!(config.model_name, "LinearRegression");
    assert_eq!(config.seed, 7);
    // 指定しなかったフィールドにはデフォルト値が入る
    assert_eq!(config.target_column, "review_score");
    assert_eq!(config.test_size, 0.2);
    assert!(config.fit_intercept);
    Ok(())
}

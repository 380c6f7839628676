use std::env;
use std::process;

use predrs::pipeline::{LogMetricSink, PipelineConfig, TrainingPipeline};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("使い方: {} <data.csv>", args[0]);
        process::exit(1);
    }

    let pipeline = TrainingPipeline::new(PipelineConfig::default());
    let mut sink = LogMetricSink;

    match pipeline.run(&args[1], &mut sink) {
        Ok(report) => {
            println!("MSE:  {:.6}", report.mse);
            println!("R2:   {:.6}", report.r2);
            println!("RMSE: {:.6}", report.rmse);
        }
        Err(e) => {
            eprintln!("パイプラインの実行に失敗しました: {}", e);
            process::exit(1);
        }
    }
}

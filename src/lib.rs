// 特定の警告を無効化
#![allow(clippy::all)]
#![allow(clippy::needless_return)]
#![allow(clippy::redundant_closure)]

pub mod dataframe;
pub mod error;
pub mod io;
pub mod ml;
pub mod na;
pub mod pipeline;
pub mod series;
pub mod stats;

// Re-export commonly used types
pub use dataframe::DataFrame;
pub use error::{Error, Result};
pub use na::NA;
pub use pipeline::{EvaluationReport, PipelineConfig, TrainingPipeline};
pub use series::{Column, ColumnType, NASeries};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

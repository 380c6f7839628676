use thiserror::Error;

/// エラー型の定義
#[derive(Error, Debug)]
pub enum Error {
    #[error("入出力エラー")]
    Io(#[source] std::io::Error),

    #[error("CSVエラー")]
    Csv(#[source] csv::Error),

    #[error("JSONエラー")]
    Json(#[source] serde_json::Error),

    #[error("インデックスが範囲外です: インデックス {index}, サイズ {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("列が見つかりません: {0}")]
    ColumnNotFound(String),

    #[error("列名が重複しています: {0}")]
    DuplicateColumnName(String),

    #[error("行数が一致しません: 期待値 {expected}, 実際 {found}")]
    InconsistentRowCount { expected: usize, found: usize },

    #[error("長さが一致しません: 期待値 {expected}, 実際 {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("データがありません: {0}")]
    EmptyData(String),

    #[error("欠損値が含まれています: {0}")]
    MissingValue(String),

    #[error("型変換エラー: {0}")]
    Cast(String),

    #[error("次元不一致エラー: {0}")]
    DimensionMismatch(String),

    #[error("データ不足エラー: {0}")]
    InsufficientData(String),

    #[error("計算エラー: {0}")]
    ComputationError(String),

    #[error("無効な操作です: {0}")]
    InvalidOperation(String),

    #[error("サポートされていないモデルです: {0}")]
    UnsupportedModel(String),

    #[error("パイプラインステージ {stage} が失敗しました: {source}")]
    PipelineStage {
        stage: &'static str,
        #[source]
        source: Box<Error>,
    },
}

/// Resultの型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

// 標準エラーからの変換
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl Error {
    /// パイプラインステージのエラーから元のエラーを取り出す
    pub fn stage_source(&self) -> Option<(&'static str, &Error)> {
        match self {
            Error::PipelineStage { stage, source } => Some((*stage, source.as_ref())),
            _ => None,
        }
    }
}

//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    #[error("Field index {index} out of range (fields: {len})")]
    FieldIndex { index: usize, len: usize },

    #[error("Field name must not be empty")]
    EmptyFieldName,

    #[error("Field already exists: {0}")]
    DuplicateField(String),

    #[error("Wrong JSON data: {0}")]
    InvalidFieldList(String),

    #[error("Record index {index} out of range (records: {len})")]
    RecordIndex { index: usize, len: usize },

    #[error("A submission is already in flight")]
    AlreadySending,

    #[cfg(not(feature = "wasm"))]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

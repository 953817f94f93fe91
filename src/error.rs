use thiserror::Error;

#[derive(Error, Debug)]
pub enum DejapawError {
    #[error(transparent)]
    Common(#[from] dejapaw_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, DejapawError>;

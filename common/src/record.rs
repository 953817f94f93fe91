//! レコード組み立てと保存先
//!
//! 必須項目が揃ったら `項目名 → 値` のフラットなマップを作り、
//! ローカル（保存済みレコード一覧）かリモート（Webhook）へ渡す。

use crate::error::{Error, Result};
use crate::types::{Field, FieldValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// 1セッション分の入力結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 表示用の文字列（未入力は `-`）
    pub fn display_value(&self, name: &str) -> String {
        match self.0.get(name) {
            None | Some(Value::Null) => "-".to_string(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// 項目順にレコードを組み立てる。未入力の項目はキーごと省く
pub fn assemble(fields: &[Field], values: &[Option<FieldValue>]) -> Record {
    let map = fields
        .iter()
        .enumerate()
        .filter_map(|(index, field)| {
            values
                .get(index)
                .and_then(|value| value.as_ref())
                .filter(|value| value.is_filled())
                .map(|value| (field.name.clone(), value.to_json()))
        })
        .collect();
    Record(map)
}

/// 保存先（セッション開始時に一度だけ決める）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    /// 拡張機能ストレージのレコード一覧へ追加
    Local,
    /// Webhookへ送信
    Remote { endpoint: String },
}

impl Sink {
    /// Webhookが空ならローカル
    pub fn from_webhook(webhook: &str) -> Self {
        let endpoint = webhook.trim();
        if endpoint.is_empty() {
            Sink::Local
        } else {
            Sink::Remote {
                endpoint: endpoint.to_string(),
            }
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Sink::Local)
    }
}

/// 保存・送信の失敗
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Error: {code} {text}")]
    Status { code: u16, text: String },

    #[error("Error: {0}")]
    Transport(String),

    /// ローカル保存（拡張機能ストレージ）の失敗
    #[error("Error: {0}")]
    Storage(String),
}

/// 保存・送信ボタンの状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitState {
    sending: bool,
    saved: bool,
    error: Option<String>,
}

impl SubmitState {
    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// ボタンを押せるか
    pub fn can_trigger(&self, sink: &Sink, ready: bool) -> bool {
        ready
            && match sink {
                Sink::Local => !self.saved,
                Sink::Remote { .. } => !self.sending,
            }
    }

    pub fn button_label(&self, sink: &Sink) -> &'static str {
        match sink {
            Sink::Local => "Save",
            Sink::Remote { .. } if self.sending => "Sending",
            Sink::Remote { .. } => "Send",
        }
    }

    /// 送信開始。送信中なら `AlreadySending`
    pub fn begin(&mut self) -> Result<()> {
        if self.sending {
            return Err(Error::AlreadySending);
        }
        self.sending = true;
        Ok(())
    }

    /// 送信完了。失敗はメッセージとして残し、再送は手動
    pub fn finish(&mut self, outcome: std::result::Result<(), SubmitError>) {
        self.sending = false;
        match outcome {
            Ok(()) => self.error = None,
            Err(e) => {
                log::warn!("submission failed: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn mark_saved(&mut self) {
        self.saved = true;
        self.error = None;
    }
}

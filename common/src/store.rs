//! 設定ストアのデータモデル
//!
//! 拡張機能ストレージ（CLIではJSONファイル）に保存されるキー:
//! - `fields`: 項目定義の配列
//! - `webhook`: 送信先URL（空ならローカル保存）
//! - `records`: 保存済みレコードの配列

use crate::error::{Error, Result};
use crate::record::{Record, Sink};
use crate::types::{Field, FieldType, FieldValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FIELDS_KEY: &str = "fields";
pub const WEBHOOK_KEY: &str = "webhook";
pub const RECORDS_KEY: &str = "records";

/// セッション開始時に読むキー
pub const STORE_KEYS: [&str; 3] = [FIELDS_KEY, WEBHOOK_KEY, RECORDS_KEY];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreData {
    pub fields: Vec<Field>,
    pub webhook: String,
    pub records: Vec<Record>,
}

impl StoreData {
    /// ストレージの読み出し結果から作る
    ///
    /// 無いキー・nullは既定値。項目種別はここで検証する。
    pub fn from_value(mut value: Value) -> Result<Self> {
        let Some(object) = value.as_object_mut() else {
            return Err(Error::Config("store data must be an object".into()));
        };
        object.retain(|_, v| !v.is_null());

        if let Some(fields) = object.get(FIELDS_KEY) {
            validate_field_types(fields)?;
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// JSONファイルから読み込み（非WASM環境のみ）。ファイルが無ければ既定値
    #[cfg(not(feature = "wasm"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSONファイルへ保存（非WASM環境のみ）
    #[cfg(not(feature = "wasm"))]
    pub fn save_file(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn sink(&self) -> Sink {
        Sink::from_webhook(&self.webhook)
    }

    /// 項目を追加。名前は空不可・重複不可
    pub fn add_field(&mut self, field: Field) -> Result<()> {
        if field.name.trim().is_empty() {
            return Err(Error::EmptyFieldName);
        }
        if self.fields.iter().any(|f| f.name == field.name) {
            return Err(Error::DuplicateField(field.name));
        }
        log::info!("field added: {} ({})", field.name, field.field_type);
        self.fields.push(field);
        Ok(())
    }

    pub fn remove_field(&mut self, index: usize) -> Result<Field> {
        if index >= self.fields.len() {
            return Err(Error::FieldIndex {
                index,
                len: self.fields.len(),
            });
        }
        Ok(self.fields.remove(index))
    }

    /// 項目リストをJSONから丸ごと置き換える
    pub fn import_fields(&mut self, json: &str) -> Result<usize> {
        let fields = parse_field_list(json)?;
        log::info!("imported {} fields", fields.len());
        self.fields = fields;
        Ok(self.fields.len())
    }

    pub fn append_record(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn remove_record(&mut self, index: usize) -> Result<Record> {
        if index >= self.records.len() {
            return Err(Error::RecordIndex {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    pub fn clear_records(&mut self) {
        self.records.clear();
    }

    /// コピー・エクスポート用（2スペースインデント）
    pub fn records_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }
}

/// 項目リストのJSON（配列）を読む
pub fn parse_field_list(json: &str) -> Result<Vec<Field>> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(Error::InvalidFieldList("expected an array of fields".into()));
    }
    validate_field_types(&value)?;
    Ok(serde_json::from_value(value)?)
}

/// 各項目の `type` を閉じた列挙に照らす
fn validate_field_types(fields: &Value) -> Result<()> {
    let Some(items) = fields.as_array() else {
        return Err(Error::InvalidFieldList("`fields` must be an array".into()));
    };
    for item in items {
        match item.get("type").and_then(Value::as_str) {
            Some(name) => {
                name.parse::<FieldType>()?;
            }
            None => {
                return Err(Error::InvalidFieldList(format!(
                    "field without a type: {}",
                    item
                )))
            }
        }
    }
    Ok(())
}

/// セッション開始時の値
///
/// 既定値があればそれ、`url` 項目は現在のページURL、それ以外は未入力。
pub fn initial_values(fields: &[Field], page_url: &str) -> Vec<Option<FieldValue>> {
    fields
        .iter()
        .map(|field| match field.default_value() {
            Some(default) => FieldValue::from_input(field.field_type, default),
            None if field.field_type == FieldType::Url => {
                FieldValue::from_input(field.field_type, page_url)
            }
            None => None,
        })
        .collect()
}

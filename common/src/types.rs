//! 項目定義と値の型
//!
//! オーバーレイとCLIで共有される型:
//! - FieldType: 項目種別（キャプチャ方法を決める閉じた列挙）
//! - Field: 設定ストアに保存される項目定義
//! - FieldValue: キャプチャまたは直接入力された値
//! - PanelPosition: パネルの固定位置（画面右下からのオフセット）

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 通貨選択肢（コード, 中国語表記）
pub const CURRENCY_CODES: &[(&str, &str)] = &[
    ("CNY", "人民币"),
    ("USD", "美元"),
    ("GBP", "英镑"),
    ("TWD", "新台币"),
    ("JPY", "日元"),
    ("HKD", "港币"),
    ("EUR", "欧元"),
    ("CAD", "加元"),
    ("AUD", "澳元"),
    ("KRW", "韩元"),
    ("SGD", "新币"),
    ("INR", "卢比"),
    ("MOP", "澳门元"),
];

/// 項目種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldType {
    String,
    Number,
    Image,
    Clipboard,
    Currency,
    Url,
}

impl FieldType {
    /// 全種別（オプション画面の選択肢の順）
    pub const ALL: [FieldType; 6] = [
        FieldType::String,
        FieldType::Number,
        FieldType::Image,
        FieldType::Clipboard,
        FieldType::Url,
        FieldType::Currency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Image => "image",
            FieldType::Clipboard => "clipboard",
            FieldType::Currency => "currency",
            FieldType::Url => "url",
        }
    }

    /// 入力欄のプレースホルダー
    pub fn placeholder(&self) -> &'static str {
        match self {
            FieldType::String => "Select Text By Mouse",
            FieldType::Image => "Right Click Image",
            FieldType::Number => "Select Number By Mouse",
            FieldType::Clipboard => "Press Ctrl/Cmd + v",
            FieldType::Currency => "Select A Currency",
            FieldType::Url => "Input A URL(CurrentURL As Default)",
        }
    }

    /// ページ操作ではなくパネルのフォームで入力する種別
    pub fn is_direct_input(&self) -> bool {
        matches!(self, FieldType::Currency | FieldType::Url)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(FieldType::String),
            "number" => Ok(FieldType::Number),
            "image" => Ok(FieldType::Image),
            "clipboard" => Ok(FieldType::Clipboard),
            "currency" => Ok(FieldType::Currency),
            "url" => Ok(FieldType::Url),
            other => Err(Error::UnknownFieldType(other.to_string())),
        }
    }
}

impl TryFrom<String> for FieldType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.as_str().to_string()
    }
}

/// 項目定義
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default)]
    pub is_required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            is_required: false,
            default_value: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// 空文字は未設定扱い
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref().filter(|v| !v.is_empty())
    }

    /// パネル表示用ラベル（必須なら `*` 付き）
    pub fn label(&self) -> String {
        if self.is_required {
            format!("{}*", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// 項目の値
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i64),
    Text(String),
}

impl FieldValue {
    /// 入力済みかどうか（空文字は未入力）
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Number(_) => true,
            FieldValue::Text(text) => !text.is_empty(),
        }
    }

    /// パネルのフォーム入力から値を作る
    ///
    /// `number` は先頭の整数部分、それ以外は入力文字列そのまま。
    /// 空入力・数値でない入力はNone。
    pub fn from_input(field_type: FieldType, raw: &str) -> Option<Self> {
        match field_type {
            FieldType::Number => parse_leading_int(raw).map(FieldValue::Number),
            _ if raw.is_empty() => None,
            _ => Some(FieldValue::Text(raw.to_string())),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FieldValue::Number(n) => serde_json::Value::from(*n),
            FieldValue::Text(text) => serde_json::Value::from(text.as_str()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

/// 先頭の整数を読む（前後の空白と符号を許容、数字がなければNone）
///
/// i64に収まらない桁数は `i64::MAX`（負なら `-i64::MAX`）に丸める。
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    // 数字だけなので失敗は桁あふれのみ。その場合は上限に丸める
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// パネルの固定位置（px, 画面右端・下端からのオフセット）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelPosition {
    pub right: f64,
    pub bottom: f64,
}

impl Default for PanelPosition {
    fn default() -> Self {
        Self {
            right: 20.0,
            bottom: 20.0,
        }
    }
}

impl PanelPosition {
    /// `position: fixed` 用のstyle文字列
    pub fn to_style(&self) -> String {
        format!("right: {}px; bottom: {}px;", self.right, self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_deserialize() {
        let json = r#"{"name": "price", "type": "number", "isRequired": true, "defaultValue": ""}"#;
        let field: Field = serde_json::from_str(json).expect("デシリアライズ失敗");

        assert_eq!(field.name, "price");
        assert_eq!(field.field_type, FieldType::Number);
        assert!(field.is_required);
        assert_eq!(field.default_value(), None);
    }

    #[test]
    fn test_field_deserialize_unknown_type() {
        let json = r#"{"name": "when", "type": "date"}"#;
        let err = serde_json::from_str::<Field>(json).unwrap_err();
        assert!(err.to_string().contains("Unknown field type: date"));
    }

    #[test]
    fn test_field_serialize_camel_case() {
        let field = Field::new("title", FieldType::String).required();
        let json = serde_json::to_string(&field).expect("シリアライズ失敗");

        assert!(json.contains("\"type\":\"string\""));
        assert!(json.contains("\"isRequired\":true"));
        assert!(!json.contains("defaultValue"));
    }

    #[test]
    fn test_field_type_from_str() {
        for field_type in FieldType::ALL {
            assert_eq!(field_type.as_str().parse::<FieldType>().unwrap(), field_type);
        }
        assert!(matches!(
            "STRING".parse::<FieldType>(),
            Err(Error::UnknownFieldType(_))
        ));
    }

    #[test]
    fn test_direct_input_types() {
        assert!(FieldType::Currency.is_direct_input());
        assert!(FieldType::Url.is_direct_input());
        assert!(!FieldType::String.is_direct_input());
        assert!(!FieldType::Clipboard.is_direct_input());
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), Some(42));
        assert_eq!(parse_leading_int("  12.75"), Some(12));
        assert_eq!(parse_leading_int("-7 items"), Some(-7));
        assert_eq!(parse_leading_int(".5"), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("12345678901234567890"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999 yen"), Some(-i64::MAX));
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_field_value_from_input() {
        assert_eq!(
            FieldValue::from_input(FieldType::Number, "300 yen"),
            Some(FieldValue::Number(300))
        );
        assert_eq!(FieldValue::from_input(FieldType::Number, "n/a"), None);
        assert_eq!(
            FieldValue::from_input(FieldType::Url, "https://example.com"),
            Some(FieldValue::Text("https://example.com".into()))
        );
        assert_eq!(FieldValue::from_input(FieldType::String, ""), None);
    }

    #[test]
    fn test_field_value_filled() {
        assert!(FieldValue::Number(0).is_filled());
        assert!(FieldValue::Text("x".into()).is_filled());
        assert!(!FieldValue::Text(String::new()).is_filled());
    }

    #[test]
    fn test_field_value_untagged_json() {
        assert_eq!(serde_json::to_string(&FieldValue::Number(42)).unwrap(), "42");
        assert_eq!(
            serde_json::to_string(&FieldValue::Text("a".into())).unwrap(),
            "\"a\""
        );
    }

    #[test]
    fn test_panel_position_style() {
        let position = PanelPosition::default();
        assert_eq!(position.to_style(), "right: 20px; bottom: 20px;");
    }
}

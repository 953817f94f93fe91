//! 項目種別レジストリ
//!
//! 種別ごとに「どのDOMイベントを待つか」と「イベントから値を取り出す純粋関数」を決める。
//! `currency` / `url` はページ操作では埋めないのでキャプチャ仕様を持たない。

use crate::types::{parse_leading_int, FieldType, FieldValue};

/// キャプチャのきっかけになるDOMイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureTrigger {
    /// テキスト選択の終了（mouseup）
    SelectionEnd,
    /// 右クリック（contextmenu）
    ContextMenu,
    /// 貼り付け（paste）
    Paste,
}

impl CaptureTrigger {
    pub fn event_name(&self) -> &'static str {
        match self {
            CaptureTrigger::SelectionEnd => "mouseup",
            CaptureTrigger::ContextMenu => "contextmenu",
            CaptureTrigger::Paste => "paste",
        }
    }

    /// ブラウザ標準の動作（コンテキストメニュー）を抑止するか
    pub fn suppresses_default(&self) -> bool {
        matches!(self, CaptureTrigger::ContextMenu)
    }
}

/// 抽出関数が読むページ側の状態
///
/// DOM実装はイベントとwindowを包む。テストではモックを使う。
pub trait CaptureContext {
    /// 現在の選択テキストを読み、同時に選択を解除する
    fn take_selection(&self) -> Option<String>;

    /// イベント対象が画像要素なら解決済みのソースURL
    fn image_source(&self) -> Option<String>;

    /// 貼り付けられたプレーンテキスト
    fn clipboard_text(&self) -> Option<String>;
}

/// 種別に対するキャプチャ仕様
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureSpec {
    pub field_type: FieldType,
    pub trigger: CaptureTrigger,
}

impl CaptureSpec {
    /// イベントから値を取り出す。有効なキャプチャでなければNone
    pub fn extract<C: CaptureContext + ?Sized>(&self, ctx: &C) -> Option<FieldValue> {
        match self.field_type {
            FieldType::String => ctx
                .take_selection()
                .filter(|text| !text.is_empty())
                .map(FieldValue::Text),
            FieldType::Number => ctx
                .take_selection()
                .and_then(|text| parse_number_selection(&text))
                .map(FieldValue::Number),
            FieldType::Image => ctx
                .image_source()
                .filter(|src| !src.is_empty())
                .map(FieldValue::Text),
            FieldType::Clipboard => ctx
                .clipboard_text()
                .filter(|text| !text.is_empty())
                .map(FieldValue::Text),
            FieldType::Currency | FieldType::Url => None,
        }
    }
}

/// 種別からキャプチャ仕様を引く（直接入力の種別はNone）
pub fn resolve(field_type: FieldType) -> Option<CaptureSpec> {
    let trigger = match field_type {
        FieldType::String | FieldType::Number => CaptureTrigger::SelectionEnd,
        FieldType::Image => CaptureTrigger::ContextMenu,
        FieldType::Clipboard => CaptureTrigger::Paste,
        FieldType::Currency | FieldType::Url => return None,
    };
    Some(CaptureSpec { field_type, trigger })
}

/// 選択テキストから数字と `.` 以外を除き、整数として読む
fn parse_number_selection(text: &str) -> Option<i64> {
    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    parse_leading_int(&stripped)
}

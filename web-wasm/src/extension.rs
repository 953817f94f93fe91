//! 拡張機能ストレージとランタイムへのブリッジ

use dejapaw_common::store::{RECORDS_KEY, STORE_KEYS};
use dejapaw_common::{Record, StoreData};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/extension.js")]
extern "C" {
    #[wasm_bindgen(js_name = "storageGet", catch)]
    async fn storage_get_js(keys: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "storageSet", catch)]
    async fn storage_set_js(items: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = "runtimeUrl")]
    fn runtime_url_js(path: &str) -> String;

    #[wasm_bindgen(js_name = "copyText")]
    fn copy_text_js(text: &str);
}

/// `fields` / `webhook` / `records` を読む。項目種別が不正ならエラー
pub async fn load_store() -> Result<StoreData, String> {
    let keys = serde_wasm_bindgen::to_value(&STORE_KEYS)
        .map_err(|e| format!("読込失敗: {}", e))?;
    let result = storage_get_js(keys)
        .await
        .map_err(|e| format!("読込失敗: {:?}", e))?;
    let value: serde_json::Value = serde_wasm_bindgen::from_value(result)
        .map_err(|e| format!("読込失敗: {}", e))?;
    StoreData::from_value(value).map_err(|e| e.to_string())
}

/// レコード一覧を丸ごと書き戻す
pub async fn save_records(records: &[Record]) -> Result<(), String> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    let items = serde_json::json!({ RECORDS_KEY: records })
        .serialize(&serializer)
        .map_err(|e| format!("保存失敗: {}", e))?;
    storage_set_js(items)
        .await
        .map(|_| ())
        .map_err(|e| format!("保存失敗: {:?}", e))
}

/// 拡張機能パッケージ内のURL
pub fn runtime_url(path: &str) -> String {
    runtime_url_js(path)
}

pub fn copy_text(text: &str) {
    copy_text_js(text);
}

/// 現在のページURL（url項目の既定値）
pub fn page_url() -> String {
    web_sys::window()
        .and_then(|window| window.location().href().ok())
        .unwrap_or_default()
}

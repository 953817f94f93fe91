//! Webhook送信
//!
//! レコード1件をJSONでPOSTする。okステータス以外・通信エラーは失敗として返し、再送はしない。

use dejapaw_common::{Record, SubmitError};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    ReferrerPolicy, Request, RequestCache, RequestCredentials, RequestInit, RequestMode,
    RequestRedirect, Response,
};

pub async fn submit_record(endpoint: &str, record: &Record) -> Result<(), SubmitError> {
    let body = record
        .to_json()
        .map_err(|e| SubmitError::Transport(e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_cache(RequestCache::NoCache);
    opts.set_credentials(RequestCredentials::Include);
    opts.set_redirect(RequestRedirect::Follow);
    opts.set_referrer_policy(ReferrerPolicy::NoReferrer);
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(endpoint, &opts).map_err(transport_error)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(transport_error)?;

    let window = web_sys::window()
        .ok_or_else(|| SubmitError::Transport("window is not available".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport_error)?;
    let resp: Response = resp_value.dyn_into().map_err(transport_error)?;

    if !resp.ok() {
        return Err(SubmitError::Status {
            code: resp.status(),
            text: resp.status_text(),
        });
    }

    log::info!("record submitted to {}", endpoint);
    Ok(())
}

fn transport_error(err: JsValue) -> SubmitError {
    let message = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.to_string()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));
    SubmitError::Transport(message)
}

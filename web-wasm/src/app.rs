//! メインアプリケーションコンポーネント

use crate::api::webhook;
use crate::components::{
    field_list::FieldList,
    footer::Footer,
    header::Header,
    records_bar::RecordsBar,
};
use crate::extension;
use crate::session::{CursorMirror, OverlaySession};
use dejapaw_common::{
    initial_values, DragTracker, Field, FieldValue, Record, Sink, SubmitError, SubmitState,
};
use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// オーバーレイをマウントする要素のID。パネル判定のルートにもなる
pub const CONTAINER_ID: &str = "dejapaw";

const LOGO_PATH: &str = "images/icon.png";
const OPTIONS_PATH: &str = "options.html";
const COPIED_RESET_MS: u32 = 500;

const PANEL_CSS: &str = r#"
#dejapaw-root {
  position: fixed;
  z-index: 10000;
  padding: 20px;
  border: 1.5px solid #333;
  border-radius: 6px;
  width: 360px;
  background: #fcfcfc;
  font-family: FreeSans, Arimo, "Droid Sans", Helvetica, Arial, sans-serif;
  font-size: 14px;
}
#dejapaw-root .dejapaw-head { display: flex; justify-content: space-between; align-items: center; }
#dejapaw-root .dejapaw-logo { width: 36px; cursor: move; }
#dejapaw-root .dejapaw-li-header { margin-top: 8px; display: flex; justify-content: space-between; }
#dejapaw-root .dejapaw-li-type { color: #999; flex-grow: 1; margin-left: 6px; }
#dejapaw-root .dejapaw-action { color: #999; cursor: pointer; margin: 0 3px; }
#dejapaw-root .dejapaw-li input { width: 300px; border: 1px solid #999; border-radius: 4px; padding: 3px 6px; }
#dejapaw-root .current { border: 1px solid red; }
#dejapaw-root .dejapaw-footer { margin-top: 12px; display: flex; }
#dejapaw-root .dejapaw-tips { flex-grow: 1; font-weight: 600; }
#dejapaw-root .dejapaw-button:disabled { background: #aaa; color: #eee; }
#dejapaw-root .dejapaw-error { margin-top: 4px; color: red; }
#dejapaw-root .dejapaw-records { margin-top: 12px; border-top: 1px solid #ccc; padding-top: 6px; display: flex; }
#dejapaw-root .dejapaw-records-count { flex-grow: 1; }
"#;

type SessionHandle = StoredValue<Option<OverlaySession>, LocalStorage>;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (open, set_open) = signal(true);

    view! {
        <Show when=move || open.get()>
            <Overlay on_close=move |_| set_open.set(false) />
        </Show>
    }
}

/// キャプチャパネル本体
///
/// 閉じるとコンポーネントごと破棄され、キャプチャ用リスナーも外れる。
#[component]
fn Overlay<FC>(on_close: FC) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone + Send + Sync,
{
    // パネルの状態
    let (fields, set_fields) = signal(Vec::<Field>::new());
    let (values, set_values) = signal(Vec::<Option<FieldValue>>::new());
    let (position, set_position) = signal(0usize);
    let (ready, set_ready) = signal(false);
    let (sink, set_sink) = signal(Sink::Local);
    let (records, set_records) = signal(Vec::<Record>::new());
    let (submit, set_submit) = signal(SubmitState::default());
    let (message, set_message) = signal(None::<String>);
    let (copied, set_copied) = signal(false);
    let drag = RwSignal::new(DragTracker::default());

    let mirror = CursorMirror {
        set_values,
        set_position,
        set_ready,
    };
    let session: SessionHandle = StoredValue::new_local(match create_session(mirror) {
        Ok(session) => Some(session),
        Err(e) => {
            log::error!("capture session unavailable: {}", e);
            set_message.set(Some(e));
            None
        }
    });

    on_cleanup(move || with_session(session, OverlaySession::release));

    // 設定の読み込み（起動時と reload 時）
    let load = move || {
        spawn_local(async move {
            match extension::load_store().await {
                Ok(store) => {
                    let initial = initial_values(&store.fields, &extension::page_url());
                    set_sink.set(store.sink());
                    set_records.set(store.records);
                    set_submit.set(SubmitState::default());
                    set_message.set(None);
                    set_fields.set(store.fields.clone());
                    with_session(session, move |s| s.configure(store.fields, initial));
                }
                Err(e) => {
                    log::error!("failed to load configuration: {}", e);
                    with_session(session, OverlaySession::clear);
                    set_fields.set(Vec::new());
                    set_message.set(Some(e));
                }
            }
        });
    };
    load();

    // 項目ごとの手動操作
    let on_pass = move |index: usize| with_session(session, |s| s.skip(index));
    let on_redo = move |index: usize| with_session(session, |s| s.redo(index));
    let on_reset = move |index: usize| with_session(session, |s| s.reset(index));
    let on_input = move |index: usize, value: Option<FieldValue>| {
        with_session(session, |s| s.set_value(index, value))
    };

    // 保存・送信
    let on_submit = move |_: ()| {
        let Some(record) = session
            .try_with_value(|s| s.as_ref().and_then(OverlaySession::record))
            .flatten()
        else {
            return;
        };

        match sink.get_untracked() {
            Sink::Local => {
                if submit.with_untracked(SubmitState::is_saved) {
                    return;
                }
                let mut next = records.get_untracked();
                next.push(record);
                spawn_local(async move {
                    match extension::save_records(&next).await {
                        Ok(()) => {
                            log::info!("record saved locally ({} total)", next.len());
                            set_records.set(next);
                            set_submit.update(SubmitState::mark_saved);
                        }
                        Err(e) => set_submit.update(|s| s.finish(Err(SubmitError::Storage(e)))),
                    }
                });
            }
            Sink::Remote { endpoint } => {
                let mut started = false;
                set_submit.update(|s| started = s.begin().is_ok());
                if !started {
                    return;
                }
                spawn_local(async move {
                    let outcome = webhook::submit_record(&endpoint, &record).await;
                    set_submit.update(|s| s.finish(outcome));
                });
            }
        }
    };

    // ローカルレコードのコピー・削除
    let on_copy = move |_: ()| match records.with_untracked(serde_json::to_string_pretty) {
        Ok(json) => {
            extension::copy_text(&json);
            set_copied.set(true);
            Timeout::new(COPIED_RESET_MS, move || set_copied.set(false)).forget();
        }
        Err(e) => log::error!("records could not be serialized: {}", e),
    };
    let on_clear = move |_: ()| {
        spawn_local(async move {
            match extension::save_records(&[]).await {
                Ok(()) => set_records.set(Vec::new()),
                Err(e) => set_message.set(Some(e)),
            }
        });
    };

    let on_close_panel = move |_: ()| {
        with_session(session, OverlaySession::release);
        on_close(());
    };

    let options_url = extension::runtime_url(OPTIONS_PATH);

    view! {
        <div
            id="dejapaw-root"
            draggable="true"
            style=move || drag.with(|d| d.position().to_style())
            on:dragstart=move |ev| {
                drag.update(|d| d.start(ev.client_x() as f64, ev.client_y() as f64));
            }
            on:dragend=move |ev| {
                drag.update(|d| {
                    d.end(ev.client_x() as f64, ev.client_y() as f64);
                });
            }
        >
            <Header logo_url=extension::runtime_url(LOGO_PATH) on_reload=move |_: ()| load() />
            <FieldList
                fields=fields
                values=values
                position=position
                on_pass=on_pass
                on_redo=on_redo
                on_reset=on_reset
                on_input=on_input
            />
            <Footer
                sink=sink
                ready=ready
                submit=submit
                message=message
                on_close=on_close_panel
                on_submit=on_submit
            />
            <Show when=move || sink.with(Sink::is_local)>
                <RecordsBar
                    records=records
                    options_url=options_url.clone()
                    copied=copied
                    on_copy=on_copy
                    on_clear=on_clear
                />
            </Show>
            <style>{PANEL_CSS}</style>
        </div>
    }
}

fn create_session(mirror: CursorMirror) -> Result<OverlaySession, String> {
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONTAINER_ID))
        .ok_or_else(|| format!("#{} is not mounted", CONTAINER_ID))?;
    OverlaySession::new(root.into(), mirror)
}

/// 破棄済み・未作成のセッションには何もしない
fn with_session(session: SessionHandle, f: impl FnOnce(&OverlaySession)) {
    session.try_with_value(|s| {
        if let Some(s) = s {
            f(s);
        }
    });
}

//! フッター（閉じる・保存/送信・エラー表示）

use dejapaw_common::{Sink, SubmitState};
use leptos::prelude::*;

#[component]
pub fn Footer<FC, FS>(
    sink: ReadSignal<Sink>,
    ready: ReadSignal<bool>,
    submit: ReadSignal<SubmitState>,
    message: ReadSignal<Option<String>>,
    on_close: FC,
    on_submit: FS,
) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone + Send + Sync,
    FS: Fn(()) + 'static + Clone + Send + Sync,
{
    let can_trigger = move || submit.with(|s| s.can_trigger(&sink.get(), ready.get()));
    let label = move || submit.with(|s| s.button_label(&sink.get()));
    let error = move || {
        message
            .get()
            .or_else(|| submit.with(|s| s.error().map(str::to_string)))
            .unwrap_or_default()
    };

    view! {
        <div class="dejapaw-footer">
            <div class="dejapaw-tips">"* Required Field"</div>
            <button
                class="dejapaw-button"
                on:click={
                    let on_close = on_close.clone();
                    move |_| on_close(())
                }
            >
                "Close"
            </button>
            <button
                class="dejapaw-button"
                disabled=move || !can_trigger()
                on:click={
                    let on_submit = on_submit.clone();
                    move |_| on_submit(())
                }
            >
                {label}
            </button>
        </div>
        <div class="dejapaw-error">{error}</div>
    }
}

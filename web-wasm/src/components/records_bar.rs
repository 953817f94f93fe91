//! ローカル保存済みレコードの操作バー

use dejapaw_common::Record;
use leptos::prelude::*;

#[component]
pub fn RecordsBar<FC, FX>(
    records: ReadSignal<Vec<Record>>,
    options_url: String,
    copied: ReadSignal<bool>,
    on_copy: FC,
    on_clear: FX,
) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone + Send + Sync,
    FX: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="dejapaw-records">
            <a href=options_url target="_blank" class="dejapaw-records-count">
                {move || format!("{} Records Saved ➔", records.with(Vec::len))}
            </a>
            <button
                class="dejapaw-button-small"
                on:click={
                    let on_copy = on_copy.clone();
                    move |_| on_copy(())
                }
            >
                {move || if copied.get() { "Copied" } else { "Copy" }}
            </button>
            <button
                class="dejapaw-button-small"
                on:click={
                    let on_clear = on_clear.clone();
                    move |_| on_clear(())
                }
            >
                "Clear"
            </button>
        </div>
    }
}

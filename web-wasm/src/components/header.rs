//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header<FR>(logo_url: String, on_reload: FR) -> impl IntoView
where
    FR: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="dejapaw-head">
            <h2 class="dejapaw-title">"Dejapaw Go!"</h2>
            <a
                class="dejapaw-action"
                title="Reload fields"
                on:click={
                    let on_reload = on_reload.clone();
                    move |_| on_reload(())
                }
            >
                "reload"
            </a>
            <img src=logo_url alt="Logo" class="dejapaw-logo" />
        </div>
    }
}

//! 項目リストコンポーネント
//!
//! 1項目ごとに名前・種別・pass/redo/reset と入力欄を並べる。
//! カーソル位置の項目は `current` クラスで強調する。

use dejapaw_common::{Field, FieldType, FieldValue, CURRENCY_CODES};
use leptos::prelude::*;

#[component]
pub fn FieldList<FP, FR, FX, FI>(
    fields: ReadSignal<Vec<Field>>,
    values: ReadSignal<Vec<Option<FieldValue>>>,
    position: ReadSignal<usize>,
    on_pass: FP,
    on_redo: FR,
    on_reset: FX,
    on_input: FI,
) -> impl IntoView
where
    FP: Fn(usize) + 'static + Clone + Send + Sync,
    FR: Fn(usize) + 'static + Clone + Send + Sync,
    FX: Fn(usize) + 'static + Clone + Send + Sync,
    FI: Fn(usize, Option<FieldValue>) + 'static + Clone + Send + Sync,
{
    view! {
        <ol class="dejapaw-list">
            <For
                each={move || fields.get().into_iter().enumerate().collect::<Vec<_>>()}
                key=|(index, field)| (*index, field.name.clone())
                children=move |(index, field)| {
                    view! {
                        <FieldRow
                            index=index
                            field=field
                            values=values
                            position=position
                            on_pass=on_pass.clone()
                            on_redo=on_redo.clone()
                            on_reset=on_reset.clone()
                            on_input=on_input.clone()
                        />
                    }
                }
            />
        </ol>
    }
}

#[component]
fn FieldRow<FP, FR, FX, FI>(
    index: usize,
    field: Field,
    values: ReadSignal<Vec<Option<FieldValue>>>,
    position: ReadSignal<usize>,
    on_pass: FP,
    on_redo: FR,
    on_reset: FX,
    on_input: FI,
) -> impl IntoView
where
    FP: Fn(usize) + 'static + Clone + Send + Sync,
    FR: Fn(usize) + 'static + Clone + Send + Sync,
    FX: Fn(usize) + 'static + Clone + Send + Sync,
    FI: Fn(usize, Option<FieldValue>) + 'static + Clone + Send + Sync,
{
    let field_type = field.field_type;
    let is_current = move || position.get() == index;
    let current_value = move || {
        values
            .get()
            .get(index)
            .cloned()
            .flatten()
            .map(|value| value.to_string())
            .unwrap_or_default()
    };

    let input = if field_type == FieldType::Currency {
        let on_input = on_input.clone();
        view! {
            <select
                class:current=is_current
                on:change=move |ev| {
                    on_input(index, FieldValue::from_input(field_type, &event_target_value(&ev)));
                }
            >
                <option value="" selected=move || current_value().is_empty()>
                    {field_type.placeholder()}
                </option>
                {CURRENCY_CODES
                    .iter()
                    .map(move |(code, name)| {
                        let code = *code;
                        view! {
                            <option value=code title=*name selected=move || current_value() == code>
                                {code}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any()
    } else {
        let on_input = on_input.clone();
        view! {
            <input
                type="text"
                class:current=is_current
                placeholder=field_type.placeholder()
                prop:value=current_value
                on:input=move |ev| {
                    on_input(index, FieldValue::from_input(field_type, &event_target_value(&ev)));
                }
            />
        }
        .into_any()
    };

    view! {
        <li class="dejapaw-li">
            <div class="dejapaw-li-header">
                <div class="dejapaw-li-title">{field.label()}</div>
                <div class="dejapaw-li-type">{field_type.as_str()}</div>
                <div>
                    <a
                        class="dejapaw-action"
                        on:click={
                            let on_pass = on_pass.clone();
                            move |_| on_pass(index)
                        }
                    >
                        "pass"
                    </a>
                    <a
                        class="dejapaw-action"
                        on:click={
                            let on_redo = on_redo.clone();
                            move |_| on_redo(index)
                        }
                    >
                        "redo"
                    </a>
                    <a
                        class="dejapaw-action"
                        on:click={
                            let on_reset = on_reset.clone();
                            move |_| on_reset(index)
                        }
                    >
                        "reset"
                    </a>
                </div>
            </div>
            {input}
        </li>
    }
}

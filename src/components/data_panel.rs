use leptos::*;

use crate::models::{DataSelection, DataType};

/// Selection for `data_type`, falling back to its default subselector
fn selection(data_type: DataType, subselector: Option<&str>) -> DataSelection {
    match subselector {
        Some(name) => DataSelection::with_subselector(data_type, name).unwrap_or_else(|e| {
            leptos::logging::warn!("{e}");
            DataSelection::new(data_type)
        }),
        None => DataSelection::new(data_type),
    }
}

/// One button per data type. The active type's section is expanded to show
/// its subselectors; clearing collapses everything.
#[component]
#[must_use]
pub fn DataPanel(on_load: Callback<Option<DataSelection>>) -> impl IntoView {
    let (expanded, set_expanded) = create_signal(None::<DataType>);

    let clear = move |_| {
        set_expanded.set(None);
        on_load.call(None);
    };

    view! {
        <div class="data-panel">
            {DataType::ALL
                .iter()
                .map(|&data_type| view! {
                    <DataTypeSection
                        data_type=data_type
                        expanded=expanded
                        set_expanded=set_expanded
                        on_load=on_load
                    />
                })
                .collect_view()}
            <button class="data-clear" on:click=clear>"Clear data"</button>
        </div>
    }
}

#[component]
fn DataTypeSection(
    data_type: DataType,
    expanded: ReadSignal<Option<DataType>>,
    set_expanded: WriteSignal<Option<DataType>>,
    on_load: Callback<Option<DataSelection>>,
) -> impl IntoView {
    let (subselector, set_subselector) =
        create_signal(data_type.subselectors().first().map(|name| (*name).to_string()));

    let is_open = move || expanded.get() == Some(data_type);

    let display = move |_| {
        set_expanded.set(Some(data_type));
        on_load.call(Some(selection(data_type, subselector.get_untracked().as_deref())));
    };

    let group = format!("{data_type}-subselector");

    view! {
        <div class="data-section" class:expanded=is_open>
            <button class="data-section-header" on:click=display>
                {data_type.to_string()}
            </button>
            <Show when=move || is_open() && data_type.needs_subselector()>
                <div class="subselectors">
                    {data_type
                        .subselectors()
                        .iter()
                        .map(|&name| {
                            let choose = move |_| {
                                set_subselector.set(Some(name.to_string()));
                                on_load.call(Some(selection(data_type, Some(name))));
                            };
                            view! {
                                <label>
                                    <input
                                        type="radio"
                                        name=group.clone()
                                        value=name
                                        prop:checked=move || subselector.get().as_deref() == Some(name)
                                        on:change=choose
                                    />
                                    {name}
                                </label>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}

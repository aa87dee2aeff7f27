use leptos::prelude::*;

use csmeta_shared::filter::{ALL_VALUE, Selection, Slug};
use csmeta_shared::{GrenadeType, MapName};

use crate::app::Filter;
use crate::colors::MUTED;
use crate::icons::{Glyph, icon};

const SELECT_STYLE: &str = "background: #1f2937; color: #fff; border: none; border-radius: 8px; padding: 8px 16px; font-size: 1rem; cursor: pointer;";

/// Parse a `<select>` change into a selection; unknown values leave the filter untouched.
fn parse_selection<T: Slug>(ev: &leptos::ev::Event) -> Option<Selection<T>> {
    let value = event_target_value(ev);
    match value.parse() {
        Ok(selection) => Some(selection),
        Err(e) => {
            web_sys::console::warn_1(&format!("filter_ignored: {e}").into());
            None
        }
    }
}

/// Map and grenade-type selectors.
#[component]
pub fn FilterBar() -> impl IntoView {
    let Filter(filter) = expect_context();

    let on_map_change = move |ev: leptos::ev::Event| {
        if let Some(map) = parse_selection::<MapName>(&ev) {
            filter.update(|f| f.map = map);
        }
    };
    let on_type_change = move |ev: leptos::ev::Event| {
        if let Some(grenade) = parse_selection::<GrenadeType>(&ev) {
            filter.update(|f| f.grenade = grenade);
        }
    };

    view! {
        <div
            class="container"
            style="padding-top: 24px; padding-bottom: 24px; position: sticky; top: 80px; background: #111827; z-index: 40;"
        >
            <div style="display: flex; flex-wrap: wrap; gap: 16px; align-items: center;">
                <div style="display: flex; align-items: center; gap: 8px;">
                    {icon(Glyph::Map, 20, MUTED)}
                    <select
                        class="focus-ring"
                        style=SELECT_STYLE
                        prop:value=move || filter.with(|f| f.map.as_value())
                        on:change=on_map_change
                    >
                        <option value=ALL_VALUE>"All Maps"</option>
                        {MapName::ALL
                            .into_iter()
                            .map(|map| view! { <option value=map.slug()>{map.label()}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div style="display: flex; align-items: center; gap: 8px;">
                    {icon(Glyph::Filter, 20, MUTED)}
                    <select
                        class="focus-ring"
                        style=SELECT_STYLE
                        prop:value=move || filter.with(|f| f.grenade.as_value())
                        on:change=on_type_change
                    >
                        <option value=ALL_VALUE>"All Types"</option>
                        {GrenadeType::ALL
                            .into_iter()
                            .map(|grenade| view! { <option value=grenade.slug()>{grenade.label()}</option> })
                            .collect_view()}
                    </select>
                </div>
            </div>
        </div>
    }
}

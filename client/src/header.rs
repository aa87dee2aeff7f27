use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use csmeta_shared::auth;

use crate::app::{Authenticated, Filter, View};
use crate::colors::{ACCENT, MUTED};
use crate::icons::{Glyph, icon};
use crate::supabase;
use crate::toast::Toasts;

const GHOST_BUTTON: &str = "display: flex; align-items: center; gap: 8px; background: none; border: none; color: #9ca3af; cursor: pointer; font-size: 1rem;";

/// Sticky page header: title, search box and auth controls.
#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header style="background: #1f2937; padding: 24px 0; position: sticky; top: 0; z-index: 50;">
            <div class="container" style="display: flex; align-items: center; justify-content: space-between; gap: 16px; flex-wrap: wrap;">
                <div style="display: flex; align-items: center; gap: 8px;">
                    {icon(Glyph::Crosshair, 32, ACCENT)}
                    <h1 style="font-size: 1.5rem; font-weight: 700; margin: 0;">"CS Meta 2"</h1>
                </div>
                <div style="display: flex; align-items: center; gap: 16px;">
                    <SearchBox />
                    <AuthControls />
                </div>
            </div>
        </header>
    }
}

#[component]
fn SearchBox() -> impl IntoView {
    let Filter(filter) = expect_context();

    let on_input = move |e: leptos::ev::Event| {
        let Some(target) = e.target() else {
            return;
        };
        let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
            return;
        };
        filter.update(|f| f.search = input.value());
    };

    view! {
        <div style="position: relative;">
            <div style="position: absolute; left: 12px; top: 50%; transform: translateY(-50%); pointer-events: none;">
                {icon(Glyph::Search, 20, MUTED)}
            </div>
            <input
                type="text"
                class="focus-ring"
                placeholder="Search lineups..."
                style="background: #374151; color: #fff; border: none; border-radius: 8px; padding: 8px 16px 8px 40px; font-size: 1rem;"
                prop:value=move || filter.with(|f| f.search.clone())
                on:input=on_input
            />
        </div>
    }
}

#[component]
fn AuthControls() -> impl IntoView {
    let View(view_state) = expect_context();
    let Authenticated(authenticated) = expect_context();
    let toasts: Toasts = expect_context();

    let on_logout = move |_| {
        spawn_local(async move {
            let client = supabase::client();
            if let Err(e) = auth::logout(&client, &toasts).await {
                web_sys::console::warn_1(&format!("logout_failed: {e}").into());
            }
        });
    };

    view! {
        <Show
            when=move || authenticated.get()
            fallback=move || view! {
                <button
                    style=GHOST_BUTTON
                    class="hover-white"
                    on:click=move |_| view_state.update(|v| v.open_login())
                >
                    {icon(Glyph::LogIn, 20, "currentColor")}
                    <span>"Login"</span>
                </button>
            }
        >
            <div style="display: flex; align-items: center; gap: 16px;">
                <button
                    class="button-accent"
                    style="display: flex; align-items: center; gap: 8px; border: none; color: #fff; padding: 8px 16px; border-radius: 8px; cursor: pointer; font-size: 1rem;"
                    on:click=move |_| view_state.update(|v| v.open_add_lineup())
                >
                    {icon(Glyph::Plus, 20, "currentColor")}
                    <span>"Add Lineup"</span>
                </button>
                <button style=GHOST_BUTTON class="hover-white" on:click=on_logout>
                    {icon(Glyph::LogOut, 20, "currentColor")}
                    <span>"Logout"</span>
                </button>
            </div>
        </Show>
    }
}

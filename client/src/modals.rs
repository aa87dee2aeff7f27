use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use csmeta_shared::catalog::{catalog, find};
use csmeta_shared::{Lineup, auth};

use crate::app::View;
use crate::colors::{ACCENT, MUTED, difficulty_badge_style};
use crate::icons::{self, Glyph, icon};
use crate::supabase;
use crate::toast::Toasts;

const BACKDROP: &str = "position: fixed; inset: 0; background: rgba(0,0,0,0.8); display: flex; align-items: center; justify-content: center; z-index: 50; padding: 16px;";
const PANEL_WIDE: &str = "background: #1f2937; border-radius: 8px; max-width: 896px; width: 100%; max-height: 90vh; overflow-y: auto;";
const PANEL_NARROW: &str =
    "background: #1f2937; border-radius: 8px; max-width: 448px; width: 100%; padding: 24px;";
const CLOSE_BUTTON: &str =
    "background: none; border: none; color: #9ca3af; cursor: pointer; padding: 0;";
const FIELD_LABEL: &str =
    "display: block; font-size: 0.85rem; font-weight: 500; color: #9ca3af; margin-bottom: 4px;";
const FIELD_INPUT: &str = "width: 100%; box-sizing: border-box; background: #374151; color: #fff; border: none; border-radius: 8px; padding: 8px 16px; font-size: 1rem;";

fn input_value(e: &leptos::ev::Event) -> Option<String> {
    let target = e.target()?;
    let input = target.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    Some(input.value())
}

/// Full breakdown of the selected lineup. Looked up in the whole catalog, so it
/// stays open even if the filters later hide the card it was opened from.
#[component]
pub fn DetailModal() -> impl IntoView {
    let View(view_state) = expect_context();

    let selected = move || {
        let id = view_state.with(|v| v.selected_lineup)?;
        find(catalog(), id)
    };

    move || selected().map(|lineup| view! { <DetailPanel lineup=lineup /> })
}

#[component]
fn DetailPanel(lineup: &'static Lineup) -> impl IntoView {
    let View(view_state) = expect_context();

    view! {
        <div style=BACKDROP role="dialog" aria-modal="true">
            <div style=PANEL_WIDE>
                <div style="padding: 24px;">
                    <div style="display: flex; justify-content: space-between; align-items: flex-start; margin-bottom: 24px;">
                        <div>
                            <h2 style="font-size: 1.5rem; font-weight: 700; margin: 0 0 8px;">{lineup.title.as_str()}</h2>
                            <div style="display: flex; align-items: center; gap: 16px;">
                                <span style=format!("color: {ACCENT}; text-transform: uppercase;")>{lineup.map.slug()}</span>
                                <span style=format!("color: {MUTED};")>{lineup.position.label()}</span>
                                <span style=format!("color: {MUTED};")>{format!("{} tick", lineup.tickrate.label())}</span>
                            </div>
                        </div>
                        <button
                            style=CLOSE_BUTTON
                            class="hover-white"
                            title="Close"
                            on:click=move |_| view_state.update(|v| v.close_detail())
                        >
                            {icons::close(24, "currentColor")}
                        </button>
                    </div>

                    <div class="two-column" style="margin-bottom: 24px;">
                        <figure style="margin: 0;">
                            <h3 style="font-size: 1.125rem; font-weight: 600; margin: 0 0 12px;">"Setup Position"</h3>
                            <img src=lineup.setup_image_url.as_str() alt="Setup position" style="border-radius: 8px; width: 100%; display: block;" />
                        </figure>
                        <figure style="margin: 0;">
                            <h3 style="font-size: 1.125rem; font-weight: 600; margin: 0 0 12px;">"Throw Position"</h3>
                            <img src=lineup.throw_image_url.as_str() alt="Throw position" style="border-radius: 8px; width: 100%; display: block;" />
                        </figure>
                    </div>

                    <div style="margin-bottom: 24px;">
                        <h3 style="font-size: 1.125rem; font-weight: 600; margin: 0 0 12px;">"Steps"</h3>
                        <ol style="list-style: decimal inside; padding: 0; margin: 0; display: flex; flex-direction: column; gap: 8px;">
                            {lineup
                                .steps
                                .iter()
                                .map(|step| view! { <li style="color: #d1d5db;">{step.as_str()}</li> })
                                .collect_view()}
                        </ol>
                    </div>

                    <div style="display: flex; align-items: center; justify-content: space-between;">
                        <div style="display: flex; align-items: center; gap: 8px;">
                            <span style=difficulty_badge_style(lineup.difficulty)>{lineup.difficulty.label()}</span>
                            <span style=format!("color: {MUTED};")>{lineup.technique.label()}</span>
                        </div>
                        <button
                            class="link-accent"
                            style="display: flex; align-items: center; gap: 8px;"
                            on:click=move |_| view_state.update(|v| v.watch_video_from_detail())
                        >
                            {icon(Glyph::Play, 20, "currentColor")}
                            <span>"Watch Video"</span>
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn LoginModal() -> impl IntoView {
    let View(view_state) = expect_context();
    let toasts: Toasts = expect_context();

    let on_submit = move |e: leptos::ev::SubmitEvent| {
        e.prevent_default();
        let credentials = view_state.with_untracked(|v| v.login_form.credentials());
        spawn_local(async move {
            let client = supabase::client();
            let result = auth::login(&client, &toasts, &credentials).await;
            if let Err(e) = &result {
                web_sys::console::warn_1(&format!("login_failed: {e}").into());
            }
            view_state.update(|v| v.finish_login(&result));
        });
    };
    let on_email = move |e: leptos::ev::Event| {
        if let Some(value) = input_value(&e) {
            view_state.update(|v| v.set_login_email(value));
        }
    };
    let on_password = move |e: leptos::ev::Event| {
        if let Some(value) = input_value(&e) {
            view_state.update(|v| v.set_login_password(value));
        }
    };

    view! {
        <Show when=move || view_state.with(|v| v.show_login_modal)>
            <div style=BACKDROP role="dialog" aria-modal="true">
                <div style=PANEL_NARROW>
                    <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 24px;">
                        <h2 style="font-size: 1.5rem; font-weight: 700; margin: 0;">"Login"</h2>
                        <button
                            style=CLOSE_BUTTON
                            class="hover-white"
                            title="Close"
                            on:click=move |_| view_state.update(|v| v.close_login())
                        >
                            {icons::close(24, "currentColor")}
                        </button>
                    </div>
                    <form on:submit=on_submit style="display: flex; flex-direction: column; gap: 16px;">
                        <div>
                            <label for="email" style=FIELD_LABEL>"Email"</label>
                            <input
                                type="email"
                                id="email"
                                autocomplete="email"
                                class="focus-ring"
                                style=FIELD_INPUT
                                prop:value=move || view_state.with(|v| v.login_form.email.clone())
                                on:input=on_email
                            />
                        </div>
                        <div>
                            <label for="password" style=FIELD_LABEL>"Password"</label>
                            <input
                                type="password"
                                id="password"
                                autocomplete="current-password"
                                class="focus-ring"
                                style=FIELD_INPUT
                                prop:value=move || view_state.with(|v| v.login_form.password.clone())
                                on:input=on_password
                            />
                        </div>
                        <button
                            type="submit"
                            class="button-accent"
                            style="width: 100%; border: none; color: #fff; padding: 8px 0; border-radius: 8px; font-weight: 500; font-size: 1rem; cursor: pointer;"
                        >
                            "Login"
                        </button>
                    </form>
                </div>
            </div>
        </Show>
    }
}

/// Entry point for contributing lineups. Submission is not wired up; the modal is a shell.
#[component]
pub fn AddLineupModal() -> impl IntoView {
    let View(view_state) = expect_context();

    view! {
        <Show when=move || view_state.with(|v| v.show_add_lineup_modal)>
            <div style=BACKDROP role="dialog" aria-modal="true">
                <div style=PANEL_WIDE>
                    <div style="padding: 24px;">
                        <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 24px;">
                            <h2 style="font-size: 1.5rem; font-weight: 700; margin: 0;">"Add New Lineup"</h2>
                            <button
                                style=CLOSE_BUTTON
                                class="hover-white"
                                title="Close"
                                on:click=move |_| view_state.update(|v| v.close_add_lineup())
                            >
                                {icons::close(24, "currentColor")}
                            </button>
                        </div>
                        <p style=format!("color: {MUTED}; margin: 0;")>"Submitting new lineups is not available yet."</p>
                    </div>
                </div>
            </div>
        </Show>
    }
}

use leptos::prelude::*;

use csmeta_shared::{Lineup, MapGroup, Site};

use crate::app::{Grouped, View};
use crate::colors::{ACCENT, MUTED, SITE_HEADING, difficulty_badge_style};
use crate::icons::{Glyph, icon};

const VIDEO_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

/// One section per map that has visible lineups. Renders nothing when the filters match nothing.
#[component]
pub fn MapSections() -> impl IntoView {
    let Grouped(grouped) = expect_context();

    view! {
        <main class="container" style="padding-top: 24px; padding-bottom: 24px;">
            {move || {
                grouped
                    .get()
                    .groups()
                    .iter()
                    .map(|group| view! { <MapSection group=group.clone() /> })
                    .collect_view()
            }}
        </main>
    }
}

#[component]
fn MapSection(group: MapGroup<'static>) -> impl IntoView {
    let View(view_state) = expect_context();
    let map = group.map;

    // The player shows under the map whose visible lineups include the active video.
    let video_group = group.clone();
    let active_video = move || {
        let id = view_state.with(|v| v.active_video_id)?;
        video_group.find(id)
    };

    let sites = group
        .sites
        .non_empty()
        .map(|(site, lineups)| view! { <SiteSection site=site lineups=lineups.to_vec() /> })
        .collect_view();

    view! {
        <section data-map=map.slug() style="margin-bottom: 64px;">
            <h2 style=format!("font-size: 1.875rem; font-weight: 700; margin: 0 0 32px; color: {ACCENT}; text-transform: uppercase;")>
                {map.slug()}
            </h2>
            {move || active_video().map(|lineup| view! { <VideoPanel lineup=lineup /> })}
            {sites}
        </section>
    }
}

#[component]
fn VideoPanel(lineup: &'static Lineup) -> impl IntoView {
    let View(view_state) = expect_context();

    view! {
        <div style="margin-bottom: 32px; background: #1f2937; border-radius: 8px; padding: 16px;">
            <div style="margin-bottom: 16px;">
                <iframe
                    src=lineup.video_url.as_str()
                    title=lineup.title.as_str()
                    allow=VIDEO_ALLOW
                    allowfullscreen=true
                    style="width: 100%; height: 500px; border: none; border-radius: 8px;"
                ></iframe>
            </div>
            <h3 style="font-size: 1.25rem; font-weight: 600; margin: 0 0 8px;">{lineup.title.as_str()}</h3>
            <button
                class="hover-white"
                style=format!("background: none; border: none; color: {MUTED}; cursor: pointer; padding: 0; font-size: 1rem;")
                on:click=move |_| view_state.update(|v| v.close_video())
            >
                "Close Video"
            </button>
        </div>
    }
}

#[component]
fn SiteSection(site: Site, lineups: Vec<&'static Lineup>) -> impl IntoView {
    view! {
        <div style="margin-bottom: 48px;">
            <h3 style=format!("font-size: 1.5rem; font-weight: 600; margin: 0 0 24px; color: {SITE_HEADING};")>
                {site.label()}
            </h3>
            <div class="lineup-grid">
                {lineups
                    .into_iter()
                    .map(|lineup| view! { <LineupCard lineup=lineup /> })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn LineupCard(lineup: &'static Lineup) -> impl IntoView {
    let View(view_state) = expect_context();
    let id = lineup.id;

    view! {
        <article class="lineup-card" data-lineup-id=id.to_string() style="background: #1f2937; border-radius: 8px; overflow: hidden;">
            <div class="play-overlay-host" style="position: relative;">
                <img
                    src=lineup.image_url.as_str()
                    alt=lineup.title.as_str()
                    loading="lazy"
                    style="width: 100%; height: 192px; object-fit: cover; display: block;"
                />
                <button
                    class="play-overlay"
                    title="Play video"
                    on:click=move |_| view_state.update(|v| v.play_video(id))
                >
                    {icon(Glyph::Play, 48, ACCENT)}
                </button>
            </div>
            <div style="padding: 16px;">
                <div style="display: flex; align-items: center; justify-content: space-between; margin-bottom: 8px;">
                    <span style=format!("font-size: 0.85rem; font-weight: 600; color: {ACCENT}; text-transform: uppercase;")>
                        {lineup.grenade.slug()}
                    </span>
                    <span style=difficulty_badge_style(lineup.difficulty)>{lineup.difficulty.label()}</span>
                </div>
                <h3 style="font-size: 1.125rem; font-weight: 700; margin: 0 0 8px;">{lineup.title.as_str()}</h3>
                <p style=format!("color: {MUTED}; font-size: 0.85rem; margin: 0;")>{lineup.description.as_str()}</p>
                <div style="margin-top: 16px; display: flex; align-items: center; justify-content: space-between;">
                    <div style="display: flex; align-items: center; gap: 8px;">
                        {icon(Glyph::MapPin, 16, MUTED)}
                        <span style=format!("font-size: 0.85rem; color: {MUTED};")>{lineup.position.label()}</span>
                    </div>
                    <button
                        class="link-accent"
                        on:click=move |_| view_state.update(|v| v.open_detail(id))
                    >
                        "View Details"
                    </button>
                </div>
            </div>
        </article>
    }
}

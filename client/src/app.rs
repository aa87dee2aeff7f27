use std::cell::RefCell;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use csmeta_shared::auth::is_authenticated;
use csmeta_shared::filter::filter_and_group;
use csmeta_shared::{AuthBackend, GroupedLineups, LineupFilter, Subscription, ViewState, catalog};

use crate::catalog_view::MapSections;
use crate::filters::FilterBar;
use crate::header::Header;
use crate::modals::{AddLineupModal, DetailModal, LoginModal};
use crate::supabase;
use crate::toast::{Toaster, ToastQueue, Toasts};

/// Modal, video and login-form state. One signal so compound transitions land as a single update.
#[derive(Clone, Copy)]
pub(crate) struct View(pub RwSignal<ViewState>);
#[derive(Clone, Copy)]
pub(crate) struct Filter(pub RwSignal<LineupFilter>);
#[derive(Clone, Copy)]
pub(crate) struct Authenticated(pub RwSignal<bool>);
/// Visible lineups, grouped by map then site.
#[derive(Clone, Copy)]
pub(crate) struct Grouped(pub Memo<GroupedLineups<'static>>);

struct KeydownBinding {
    window: web_sys::Window,
    handler: wasm_bindgen::closure::Closure<dyn Fn(web_sys::KeyboardEvent)>,
}

impl KeydownBinding {
    fn release(self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("keydown", self.handler.as_ref().unchecked_ref());
    }
}

thread_local! {
    static KEYDOWN_BINDING: RefCell<Option<KeydownBinding>> = const { RefCell::new(None) };
    static AUTH_SUBSCRIPTION: RefCell<Option<Subscription>> = const { RefCell::new(None) };
}

fn release_auth_subscription() {
    AUTH_SUBSCRIPTION.with(|slot| {
        if let Some(subscription) = slot.borrow_mut().take() {
            subscription.unsubscribe();
        }
    });
}

fn release_keydown_binding() {
    KEYDOWN_BINDING.with(|slot| {
        if let Some(binding) = slot.borrow_mut().take() {
            binding.release();
        }
    });
}

#[component]
pub fn App() -> impl IntoView {
    let view_state: RwSignal<ViewState> = RwSignal::new(ViewState::default());
    let filter: RwSignal<LineupFilter> = RwSignal::new(LineupFilter::default());
    let authenticated: RwSignal<bool> = RwSignal::new(false);
    let toasts = Toasts(RwSignal::new(ToastQueue::default()));
    // Recomputed whenever any filter input changes.
    let grouped = Memo::new(move |_| filter.with(|f| filter_and_group(catalog(), f)));

    provide_context(View(view_state));
    provide_context(Filter(filter));
    provide_context(Authenticated(authenticated));
    provide_context(Grouped(grouped));
    provide_context(toasts);

    // Session-change subscription lives exactly as long as the app is mounted.
    Effect::new(move || {
        let auth = supabase::client();
        let subscription = auth.on_auth_state_change(move |event, session| {
            web_sys::console::info_1(&format!("auth_event={}", event.as_str()).into());
            authenticated.set(is_authenticated(session));
        });
        release_auth_subscription();
        AUTH_SUBSCRIPTION.with(|slot| {
            *slot.borrow_mut() = Some(subscription);
        });
        spawn_local(async move {
            auth.restore_session().await;
        });
        on_cleanup(release_auth_subscription);
    });

    // Escape dismisses the topmost open surface.
    Effect::new(move || {
        use wasm_bindgen::prelude::*;

        let Some(window) = web_sys::window() else {
            return;
        };
        release_keydown_binding();

        let handler =
            Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(move |e: web_sys::KeyboardEvent| {
                if e.key() != "Escape" {
                    return;
                }
                let target_tag = e
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                    .map(|el| el.tag_name())
                    .unwrap_or_default();
                // Let inputs lose focus first; a second Escape closes the modal.
                if target_tag == "INPUT"
                    && let Some(el) = e
                        .target()
                        .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                {
                    el.blur().ok();
                    return;
                }
                view_state.maybe_update(ViewState::dismiss_topmost);
            });

        if window
            .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
            .is_ok()
        {
            KEYDOWN_BINDING.with(|slot| {
                *slot.borrow_mut() = Some(KeydownBinding {
                    window,
                    handler,
                });
            });
        }
        on_cleanup(release_keydown_binding);
    });

    view! {
        <div style="min-height: 100vh; background: #111827; color: #fff; font-family: 'Inter', system-ui, sans-serif;">
            <Toaster />
            <Header />
            <FilterBar />
            <MapSections />
            <DetailModal />
            <LoginModal />
            <AddLineupModal />
        </div>
    }
}

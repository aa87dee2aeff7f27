use leptos::prelude::*;

use csmeta_shared::Notifier;

use crate::icons;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn duration_ms(self) -> u32 {
        match self {
            Self::Success => 2_000,
            Self::Error => 4_000,
        }
    }

    fn accent(self) -> &'static str {
        match self {
            Self::Success => "#22c55e",
            Self::Error => "#ef4444",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    /// Returns false if the toast was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|toast| toast.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Notification stack, provided through context.
#[derive(Clone, Copy)]
pub struct Toasts(pub RwSignal<ToastQueue>);

impl Toasts {
    pub fn push(&self, kind: ToastKind, message: &str) {
        let mut id = 0;
        self.0.update(|queue| id = queue.push(kind, message));
        let queue = self.0;
        gloo_timers::callback::Timeout::new(kind.duration_ms(), move || {
            let _ = queue.try_maybe_update(|queue| (queue.dismiss(id), ()));
        })
        .forget();
    }

    pub fn dismiss(&self, id: u64) {
        self.0.maybe_update(|queue| queue.dismiss(id));
    }
}

impl Notifier for Toasts {
    fn success(&self, message: &str) {
        self.push(ToastKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.push(ToastKind::Error, message);
    }
}

/// Top-right toast stack. Click a toast to dismiss it early.
#[component]
pub fn Toaster() -> impl IntoView {
    let toasts: Toasts = expect_context();

    view! {
        <div style="position: fixed; top: 16px; right: 16px; z-index: 9999; display: flex; flex-direction: column; gap: 8px; pointer-events: none;">
            <For
                each=move || toasts.0.with(|queue| queue.items().to_vec())
                key=|toast| toast.id
                let:toast
            >
                {
                    let id = toast.id;
                    let accent = toast.kind.accent();
                    view! {
                        <div
                            role="status"
                            class="toast-animate"
                            style=format!(
                                "pointer-events: auto; cursor: pointer; display: flex; align-items: center; gap: 10px; background: #fff; color: #363636; padding: 10px 14px; border-radius: 8px; box-shadow: 0 3px 10px rgba(0,0,0,0.1), 0 3px 3px rgba(0,0,0,0.05); max-width: 350px; font-size: 0.9rem; border-left: 3px solid {accent};",
                            )
                            on:click=move |_| toasts.dismiss(id)
                        >
                            {match toast.kind {
                                ToastKind::Success => icons::check(18, accent).into_any(),
                                ToastKind::Error => icons::close(18, accent).into_any(),
                            }}
                            <span>{toast.message.clone()}</span>
                        </div>
                    }
                }
            </For>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::{ToastKind, ToastQueue};

    #[test]
    fn push_assigns_increasing_ids() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Success, "Successfully logged in!");
        let second = queue.push(ToastKind::Error, "Invalid login credentials");
        assert!(second > first);
        assert_eq!(queue.items().len(), 2);
        assert_eq!(queue.items()[1].message, "Invalid login credentials");
    }

    #[test]
    fn dismiss_removes_only_the_target() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Success, "a");
        let second = queue.push(ToastKind::Success, "b");

        assert!(queue.dismiss(first));
        assert!(!queue.dismiss(first));
        let remaining: Vec<u64> = queue.items().iter().map(|toast| toast.id).collect();
        assert_eq!(remaining, vec![second]);
    }

    #[test]
    fn errors_linger_longer_than_successes() {
        assert_eq!(ToastKind::Success.duration_ms(), 2_000);
        assert_eq!(ToastKind::Error.duration_ms(), 4_000);
    }
}

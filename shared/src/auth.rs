//! Bridge between the UI and the managed auth service.
//!
//! The service itself sits behind [`AuthBackend`]; user feedback goes through
//! [`Notifier`]. Everything here runs on the single UI thread, so listener
//! storage is `Rc<RefCell<..>>` rather than anything `Send`.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const LOGIN_SUCCESS_MESSAGE: &str = "Successfully logged in!";
pub const LOGOUT_SUCCESS_MESSAGE: &str = "Logged out successfully";

/// Sessions this close to expiry are treated as expired.
const EXPIRY_MARGIN_SECS: i64 = 10;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Fill in `expires_at` from `expires_in` when the service omitted it.
    pub fn stamp_expiry(&mut self, now: DateTime<Utc>) {
        if self.expires_at.is_none() && self.expires_in > 0 {
            self.expires_at = Some(now.timestamp() + self.expires_in);
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now.timestamp() + EXPIRY_MARGIN_SECS >= expires_at,
            None => false,
        }
    }
}

pub fn is_authenticated(session: Option<&Session>) -> bool {
    session.is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthChangeEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

impl AuthChangeEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialSession => "INITIAL_SESSION",
            Self::SignedIn => "SIGNED_IN",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
        }
    }
}

/// Failure reported by the auth service. `message` is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    pub message: String,
    pub status: Option<u16>,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AuthError {}

type Listener = Rc<dyn Fn(AuthChangeEvent, Option<&Session>)>;

#[derive(Default)]
struct ListenerSlots {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Session-change listener registry embedded by auth backends.
#[derive(Clone, Default)]
pub struct AuthListeners {
    slots: Rc<RefCell<ListenerSlots>>,
}

impl AuthListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(AuthChangeEvent, Option<&Session>) + 'static,
    {
        let mut slots = self.slots.borrow_mut();
        let id = slots.next_id;
        slots.next_id += 1;
        slots.entries.push((id, Rc::new(callback)));
        Subscription {
            id,
            slots: Rc::downgrade(&self.slots),
        }
    }

    /// Deliver to every listener registered at the time of the call.
    pub fn emit(&self, event: AuthChangeEvent, session: Option<&Session>) {
        let listeners: Vec<Listener> = self
            .slots
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(event, session);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Live registration of a session-change listener. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    slots: Weak<RefCell<ListenerSlots>>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(slots) = self.slots.upgrade() else {
            return;
        };
        slots
            .borrow_mut()
            .entries
            .retain(|(id, _)| *id != self.id);
    }
}

/// The managed auth service.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    /// Register for session changes. The listener stays registered until the
    /// returned [`Subscription`] is dropped.
    fn on_auth_state_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(AuthChangeEvent, Option<&Session>) + 'static;

    async fn sign_in_with_password(&self, credentials: &Credentials)
    -> Result<Session, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Transient user-facing notifications.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Sign in and report the outcome. The authenticated flag itself only changes
/// when the backend's session notification arrives.
pub async fn login<B, N>(
    backend: &B,
    notifier: &N,
    credentials: &Credentials,
) -> Result<(), AuthError>
where
    B: AuthBackend + ?Sized,
    N: Notifier + ?Sized,
{
    match backend.sign_in_with_password(credentials).await {
        Ok(_) => {
            notifier.success(LOGIN_SUCCESS_MESSAGE);
            Ok(())
        }
        Err(err) => {
            notifier.error(&err.message);
            Err(err)
        }
    }
}

pub async fn logout<B, N>(backend: &B, notifier: &N) -> Result<(), AuthError>
where
    B: AuthBackend + ?Sized,
    N: Notifier + ?Sized,
{
    match backend.sign_out().await {
        Ok(()) => {
            notifier.success(LOGOUT_SUCCESS_MESSAGE);
            Ok(())
        }
        Err(err) => {
            notifier.error(&err.message);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::ViewState;
    use chrono::TimeZone;
    use futures::executor::block_on;
    use std::cell::Cell;

    fn session() -> Session {
        Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            expires_at: None,
            user: User {
                id: "user-1".to_string(),
                email: Some("player@example.com".to_string()),
            },
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        listeners: AuthListeners,
        sign_in_error: RefCell<Option<AuthError>>,
        sign_out_error: RefCell<Option<AuthError>>,
    }

    impl AuthBackend for FakeBackend {
        fn on_auth_state_change<F>(&self, callback: F) -> Subscription
        where
            F: Fn(AuthChangeEvent, Option<&Session>) + 'static,
        {
            self.listeners.subscribe(callback)
        }

        async fn sign_in_with_password(
            &self,
            _credentials: &Credentials,
        ) -> Result<Session, AuthError> {
            if let Some(err) = self.sign_in_error.borrow_mut().take() {
                return Err(err);
            }
            let session = session();
            self.listeners.emit(AuthChangeEvent::SignedIn, Some(&session));
            Ok(session)
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            if let Some(err) = self.sign_out_error.borrow_mut().take() {
                return Err(err);
            }
            self.listeners.emit(AuthChangeEvent::SignedOut, None);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        messages: RefCell<Vec<(&'static str, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            self.messages.borrow_mut().push(("success", message.to_string()));
        }

        fn error(&self, message: &str) {
            self.messages.borrow_mut().push(("error", message.to_string()));
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "player@example.com".to_string(),
            password: "hunter2".to_string(),
        }
    }

    fn track_auth(backend: &FakeBackend) -> (Rc<Cell<bool>>, Subscription) {
        let authenticated = Rc::new(Cell::new(false));
        let flag = Rc::clone(&authenticated);
        let subscription = backend.on_auth_state_change(move |_event, session| {
            flag.set(is_authenticated(session));
        });
        (authenticated, subscription)
    }

    #[test]
    fn successful_login_closes_modal_and_authenticates_on_notification() {
        let backend = FakeBackend::default();
        let notifier = RecordingNotifier::default();
        let (authenticated, _subscription) = track_auth(&backend);
        let mut view = ViewState::default();
        view.open_login();

        let result = block_on(login(&backend, &notifier, &credentials()));
        view.finish_login(&result);

        assert!(result.is_ok());
        assert!(!view.show_login_modal);
        assert!(authenticated.get());
        assert_eq!(
            notifier.messages.borrow().as_slice(),
            &[("success", LOGIN_SUCCESS_MESSAGE.to_string())]
        );
    }

    #[test]
    fn failed_login_keeps_modal_open_and_shows_service_message() {
        let backend = FakeBackend::default();
        *backend.sign_in_error.borrow_mut() =
            Some(AuthError::with_status("Invalid login credentials", 400));
        let notifier = RecordingNotifier::default();
        let (authenticated, _subscription) = track_auth(&backend);
        let mut view = ViewState::default();
        view.open_login();

        let result = block_on(login(&backend, &notifier, &credentials()));
        view.finish_login(&result);

        assert_eq!(result.unwrap_err().status, Some(400));
        assert!(view.show_login_modal);
        assert!(!authenticated.get());
        assert_eq!(
            notifier.messages.borrow().as_slice(),
            &[("error", "Invalid login credentials".to_string())]
        );
    }

    #[test]
    fn failed_logout_leaves_authentication_unchanged() {
        let backend = FakeBackend::default();
        let notifier = RecordingNotifier::default();
        let (authenticated, _subscription) = track_auth(&backend);
        block_on(login(&backend, &notifier, &credentials())).unwrap();
        *backend.sign_out_error.borrow_mut() = Some(AuthError::new("network down"));

        let result = block_on(logout(&backend, &notifier));

        assert!(result.is_err());
        assert!(authenticated.get());
        assert_eq!(
            notifier.messages.borrow().last(),
            Some(&("error", "network down".to_string()))
        );
    }

    #[test]
    fn logout_success_notifies_even_when_signed_out() {
        let backend = FakeBackend::default();
        let notifier = RecordingNotifier::default();
        let (authenticated, _subscription) = track_auth(&backend);

        block_on(logout(&backend, &notifier)).unwrap();

        assert!(!authenticated.get());
        assert_eq!(
            notifier.messages.borrow().as_slice(),
            &[("success", LOGOUT_SUCCESS_MESSAGE.to_string())]
        );
    }

    #[test]
    fn dropped_subscription_stops_receiving_events() {
        let listeners = AuthListeners::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let subscription = listeners.subscribe(move |_, _| counter.set(counter.get() + 1));

        listeners.emit(AuthChangeEvent::SignedOut, None);
        assert_eq!(calls.get(), 1);

        subscription.unsubscribe();
        assert!(listeners.is_empty());
        listeners.emit(AuthChangeEvent::SignedOut, None);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn subscription_outliving_registry_drops_cleanly() {
        let listeners = AuthListeners::new();
        let subscription = listeners.subscribe(|_, _| {});
        drop(listeners);
        drop(subscription);
    }

    #[test]
    fn listeners_may_unsubscribe_while_being_notified() {
        let listeners = AuthListeners::new();
        let held: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&held);
        let subscription = listeners.subscribe(move |_, _| {
            slot.borrow_mut().take();
        });
        *held.borrow_mut() = Some(subscription);

        listeners.emit(AuthChangeEvent::SignedIn, None);
        assert!(listeners.is_empty());
    }

    #[test]
    fn session_expiry_is_stamped_and_checked_with_margin() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let mut session = session();
        session.stamp_expiry(now);
        assert_eq!(session.expires_at, Some(now.timestamp() + 3600));

        assert!(!session.is_expired_at(now));
        assert!(session.is_expired_at(now + chrono::Duration::seconds(3595)));
    }

    #[test]
    fn session_parses_service_payload() {
        let payload = serde_json::json!({
            "access_token": "a",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 1_735_693_200,
            "refresh_token": "r",
            "user": { "id": "u", "email": "x@example.com", "role": "authenticated" }
        });
        let session: Session = serde_json::from_value(payload).unwrap();
        assert_eq!(session.expires_at, Some(1_735_693_200));
        assert_eq!(session.user.email.as_deref(), Some("x@example.com"));
    }

    #[test]
    fn credentials_debug_hides_password() {
        let rendered = format!("{:?}", credentials());
        assert!(rendered.contains("player@example.com"));
        assert!(!rendered.contains("hunter2"));
    }
}

//! Supabase GoTrue client speaking the service's password-grant HTTP API.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_net::http::{Request, Response};
use gloo_storage::{LocalStorage, Storage};
use serde::Serialize;

use csmeta_shared::{
    AuthBackend, AuthChangeEvent, AuthError, AuthListeners, Credentials, Session, Subscription,
};

use crate::config::{self, SupabaseConfig};

const NOT_CONFIGURED: &str = "Authentication is not configured";

/// Remote rejections that still mean the session is gone server-side.
const SIGNED_OUT_STATUSES: [u16; 3] = [401, 403, 404];

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
}

struct AuthInner {
    config: Option<SupabaseConfig>,
    session: RefCell<Option<Session>>,
    /// Persisted session found expired at startup, waiting for a refresh.
    stale: RefCell<Option<Session>>,
    /// Bumped by every sign-in and sign-out.
    generation: Cell<u64>,
    listeners: AuthListeners,
}

#[derive(Clone)]
pub struct SupabaseAuth {
    inner: Rc<AuthInner>,
}

thread_local! {
    static AUTH_CLIENT: SupabaseAuth = SupabaseAuth::new(config::supabase_config());
}

/// The page-wide auth client.
pub fn client() -> SupabaseAuth {
    AUTH_CLIENT.with(SupabaseAuth::clone)
}

impl SupabaseAuth {
    pub fn new(config: Option<SupabaseConfig>) -> Self {
        let persisted = config
            .as_ref()
            .and_then(|config| LocalStorage::get::<Session>(config.storage_key()).ok());
        let (session, stale) = match persisted {
            Some(session) if session.is_expired_at(chrono::Utc::now()) => (None, Some(session)),
            other => (other, None),
        };
        if config.is_none() {
            web_sys::console::warn_1(&"auth_disabled: supabase url or anon key missing".into());
        }
        Self {
            inner: Rc::new(AuthInner {
                config,
                session: RefCell::new(session),
                stale: RefCell::new(stale),
                generation: Cell::new(0),
                listeners: AuthListeners::new(),
            }),
        }
    }

    fn config(&self) -> Result<&SupabaseConfig, AuthError> {
        self.inner
            .config
            .as_ref()
            .ok_or_else(|| AuthError::new(NOT_CONFIGURED))
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.session.borrow().clone()
    }

    fn store_session(&self, session: Option<Session>) {
        if let Some(config) = self.inner.config.as_ref() {
            let key = config.storage_key();
            match session.as_ref() {
                Some(session) => {
                    if let Err(e) = LocalStorage::set(&key, session) {
                        web_sys::console::warn_1(&format!("auth_persist_failed: {e}").into());
                    }
                }
                None => LocalStorage::delete(&key),
            }
        }
        *self.inner.session.borrow_mut() = session;
    }

    fn bump_generation(&self) {
        self.inner.generation.set(self.inner.generation.get().wrapping_add(1));
    }

    fn emit(&self, event: AuthChangeEvent) {
        let session = self.session();
        self.inner.listeners.emit(event, session.as_ref());
    }

    /// Exchange a persisted-but-expired session for a fresh one.
    pub async fn restore_session(&self) {
        let Some(stale) = self.inner.stale.borrow_mut().take() else {
            return;
        };
        if stale.refresh_token.is_empty() {
            self.store_session(None);
            return;
        }
        let started = self.inner.generation.get();
        let refreshed = self.refresh(&stale.refresh_token).await;
        if let Err(e) = &refreshed {
            web_sys::console::warn_1(&format!("auth_refresh_failed: {e}").into());
        }
        let superseded = self.inner.generation.get() != started;
        match settle_restore(superseded, refreshed) {
            RestoreOutcome::Keep => {
                web_sys::console::info_1(&"auth_refresh_superseded: newer auth state kept".into());
            }
            RestoreOutcome::Refreshed(session) => {
                self.store_session(Some(session));
                self.emit(AuthChangeEvent::TokenRefreshed);
            }
            RestoreOutcome::SignedOut => {
                self.store_session(None);
                self.emit(AuthChangeEvent::SignedOut);
            }
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let config = self.config()?;
        let resp = Request::post(&config.token_url("refresh_token"))
            .header("apikey", &config.anon_key)
            .json(&RefreshGrant { refresh_token })
            .map_err(|e| AuthError::new(format!("encode error: {e}")))?
            .send()
            .await
            .map_err(|e| AuthError::new(format!("fetch error: {e}")))?;
        read_session(resp).await
    }
}

#[derive(Debug, PartialEq)]
enum RestoreOutcome {
    /// A sign-in or sign-out landed while the refresh was in flight.
    Keep,
    Refreshed(Session),
    SignedOut,
}

/// Decide what a finished startup refresh may do to the current session.
fn settle_restore(superseded: bool, refreshed: Result<Session, AuthError>) -> RestoreOutcome {
    if superseded {
        return RestoreOutcome::Keep;
    }
    match refreshed {
        Ok(session) => RestoreOutcome::Refreshed(session),
        Err(_) => RestoreOutcome::SignedOut,
    }
}

/// `Authorization` header for the logout call. `None` means there is nothing to revoke remotely.
fn logout_authorization(session: Option<&Session>) -> Option<String> {
    session.map(|session| format!("Bearer {}", session.access_token))
}

/// Whether a logout response leaves the user signed out.
fn logout_accepted(status: u16) -> bool {
    (200..300).contains(&status) || SIGNED_OUT_STATUSES.contains(&status)
}

async fn read_session(resp: Response) -> Result<Session, AuthError> {
    if !resp.ok() {
        return Err(read_error(resp).await);
    }
    let mut session = resp
        .json::<Session>()
        .await
        .map_err(|e| AuthError::new(format!("parse error: {e}")))?;
    session.stamp_expiry(chrono::Utc::now());
    Ok(session)
}

async fn read_error(resp: Response) -> AuthError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    AuthError::with_status(error_message(&body, status), status)
}

/// Pull the human-readable message out of a GoTrue error body.
pub(crate) fn error_message(body: &str, status: u16) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    parsed
        .as_ref()
        .and_then(|json| {
            ["msg", "error_description", "message", "error"]
                .into_iter()
                .find_map(|key| json.get(key).and_then(|v| v.as_str()))
        })
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"))
}

impl AuthBackend for SupabaseAuth {
    fn on_auth_state_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(AuthChangeEvent, Option<&Session>) + 'static,
    {
        let callback = Rc::new(callback);
        let listener = Rc::clone(&callback);
        let subscription = self
            .inner
            .listeners
            .subscribe(move |event, session| listener(event, session));
        let session = self.session();
        callback(AuthChangeEvent::InitialSession, session.as_ref());
        subscription
    }

    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, AuthError> {
        let config = self.config()?;
        let resp = Request::post(&config.token_url("password"))
            .header("apikey", &config.anon_key)
            .json(&PasswordGrant {
                email: &credentials.email,
                password: &credentials.password,
            })
            .map_err(|e| AuthError::new(format!("encode error: {e}")))?
            .send()
            .await
            .map_err(|e| AuthError::new(format!("fetch error: {e}")))?;
        let session = read_session(resp).await?;

        self.inner.stale.borrow_mut().take();
        self.bump_generation();
        self.store_session(Some(session.clone()));
        self.emit(AuthChangeEvent::SignedIn);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let config = self.config()?;
        let Some(authorization) = logout_authorization(self.session().as_ref()) else {
            self.bump_generation();
            self.store_session(None);
            self.emit(AuthChangeEvent::SignedOut);
            return Ok(());
        };

        let resp = Request::post(&config.logout_url())
            .header("apikey", &config.anon_key)
            .header("Authorization", &authorization)
            .send()
            .await
            .map_err(|e| AuthError::new(format!("fetch error: {e}")))?;
        if !logout_accepted(resp.status()) {
            return Err(read_error(resp).await);
        }

        self.bump_generation();
        self.store_session(None);
        self.emit(AuthChangeEvent::SignedOut);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{RestoreOutcome, error_message, logout_accepted, logout_authorization, settle_restore};
    use csmeta_shared::{AuthError, Session, User};

    fn session(access_token: &str) -> Session {
        Session {
            access_token: access_token.to_string(),
            refresh_token: format!("{access_token}-refresh"),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            expires_at: None,
            user: User {
                id: "user-1".to_string(),
                email: Some("player@example.com".to_string()),
            },
        }
    }

    #[test]
    fn sign_in_during_refresh_survives_a_failed_refresh() {
        let rejected = AuthError::with_status("Invalid Refresh Token", 400);
        assert_eq!(settle_restore(true, Err(rejected)), RestoreOutcome::Keep);
    }

    #[test]
    fn auth_change_during_refresh_is_not_overwritten_by_old_session() {
        let outcome = settle_restore(true, Ok(session("refreshed")));
        assert_eq!(outcome, RestoreOutcome::Keep);
    }

    #[test]
    fn refresh_without_competing_sign_in_applies() {
        assert_eq!(
            settle_restore(false, Ok(session("refreshed"))),
            RestoreOutcome::Refreshed(session("refreshed"))
        );
        assert_eq!(
            settle_restore(false, Err(AuthError::new("fetch error: offline"))),
            RestoreOutcome::SignedOut
        );
    }

    #[test]
    fn logout_without_session_skips_the_network() {
        assert_eq!(logout_authorization(None), None);
        assert_eq!(logout_authorization(Some(&session("tok"))).as_deref(), Some("Bearer tok"));
    }

    #[test]
    fn logout_treats_missing_remote_session_as_signed_out() {
        assert!(logout_accepted(204));
        assert!(logout_accepted(401));
        assert!(logout_accepted(403));
        assert!(logout_accepted(404));
        assert!(!logout_accepted(500));
        assert!(!logout_accepted(429));
    }

    #[test]
    fn prefers_msg_field() {
        let body = r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#;
        assert_eq!(error_message(body, 400), "Invalid login credentials");
    }

    #[test]
    fn falls_back_to_oauth_style_description() {
        let body = r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#;
        assert_eq!(error_message(body, 400), "Email not confirmed");
    }

    #[test]
    fn uses_bare_error_field_last() {
        assert_eq!(error_message(r#"{"error":"rate limited"}"#, 429), "rate limited");
    }

    #[test]
    fn falls_back_to_status_for_opaque_bodies() {
        assert_eq!(error_message("<html>bad gateway</html>", 502), "HTTP 502");
        assert_eq!(error_message(r#"{"msg":"  "}"#, 500), "HTTP 500");
        assert_eq!(error_message("", 503), "HTTP 503");
    }
}

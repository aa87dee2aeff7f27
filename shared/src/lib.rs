pub mod auth;
pub mod catalog;
pub mod filter;
pub mod lineup;
pub mod view_state;

pub use auth::{
    AuthBackend, AuthChangeEvent, AuthError, AuthListeners, Credentials, Notifier, Session,
    Subscription, User,
};
pub use catalog::catalog;
pub use filter::{GroupedLineups, LineupFilter, MapGroup, Selection, filter_and_group};
pub use lineup::*;
pub use view_state::{LoginForm, ViewState};

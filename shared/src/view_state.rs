use crate::auth::{AuthError, Credentials};

/// Draft contents of the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Which modal and which inline video are open.
///
/// The slots are independent toggles: nothing here stops the detail modal and
/// the add-lineup modal from being open at the same time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub selected_lineup: Option<u32>,
    pub active_video_id: Option<u32>,
    pub show_login_modal: bool,
    pub show_add_lineup_modal: bool,
    pub login_form: LoginForm,
}

impl ViewState {
    pub fn open_detail(&mut self, id: u32) {
        self.selected_lineup = Some(id);
    }

    pub fn close_detail(&mut self) {
        self.selected_lineup = None;
    }

    pub fn play_video(&mut self, id: u32) {
        self.active_video_id = Some(id);
    }

    pub fn close_video(&mut self) {
        self.active_video_id = None;
    }

    /// Close the detail modal and start its lineup's video. No-op without a detailed lineup.
    pub fn watch_video_from_detail(&mut self) {
        if let Some(id) = self.selected_lineup.take() {
            self.active_video_id = Some(id);
        }
    }

    pub fn open_login(&mut self) {
        self.show_login_modal = true;
    }

    pub fn close_login(&mut self) {
        self.show_login_modal = false;
    }

    pub fn set_login_email(&mut self, email: String) {
        self.login_form.email = email;
    }

    pub fn set_login_password(&mut self, password: String) {
        self.login_form.password = password;
    }

    /// Apply the result of a sign-in attempt: success closes the login modal.
    pub fn finish_login(&mut self, result: &Result<(), AuthError>) {
        if result.is_ok() {
            self.show_login_modal = false;
        }
    }

    pub fn open_add_lineup(&mut self) {
        self.show_add_lineup_modal = true;
    }

    pub fn close_add_lineup(&mut self) {
        self.show_add_lineup_modal = false;
    }

    pub fn any_modal_open(&self) -> bool {
        self.selected_lineup.is_some() || self.show_login_modal || self.show_add_lineup_modal
    }

    /// Close one open surface (Escape key). Modals paint detail, login, add-lineup
    /// bottom to top, so they close in the reverse order, then the inline video.
    /// Returns false when nothing was open.
    pub fn dismiss_topmost(&mut self) -> bool {
        if self.show_add_lineup_modal {
            self.show_add_lineup_modal = false;
            return true;
        }
        if self.show_login_modal {
            self.show_login_modal = false;
            return true;
        }
        if self.selected_lineup.take().is_some() {
            return true;
        }
        self.active_video_id.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_video_closes_detail_and_opens_video_in_one_step() {
        let mut view = ViewState::default();
        view.open_detail(4);

        view.watch_video_from_detail();
        assert_eq!(view.selected_lineup, None);
        assert_eq!(view.active_video_id, Some(4));

        view.close_video();
        assert_eq!(view.active_video_id, None);
        assert_eq!(view.selected_lineup, None);
    }

    #[test]
    fn watch_video_without_detail_is_a_noop() {
        let mut view = ViewState::default();
        view.play_video(2);
        view.watch_video_from_detail();
        assert_eq!(view.active_video_id, Some(2));
    }

    #[test]
    fn play_video_replaces_previous_video() {
        let mut view = ViewState::default();
        view.play_video(1);
        view.play_video(5);
        assert_eq!(view.active_video_id, Some(5));
    }

    #[test]
    fn modals_can_stack() {
        let mut view = ViewState::default();
        view.open_detail(1);
        view.open_add_lineup();
        view.open_login();
        assert!(view.show_add_lineup_modal);
        assert!(view.show_login_modal);
        assert_eq!(view.selected_lineup, Some(1));

        view.close_add_lineup();
        assert!(view.show_login_modal);
        assert_eq!(view.selected_lineup, Some(1));
    }

    #[test]
    fn finish_login_only_closes_on_success() {
        let mut view = ViewState::default();
        view.open_login();

        view.finish_login(&Err(AuthError::new("Invalid login credentials")));
        assert!(view.show_login_modal);

        view.finish_login(&Ok(()));
        assert!(!view.show_login_modal);
    }

    #[test]
    fn login_form_drafts_become_credentials() {
        let mut view = ViewState::default();
        view.set_login_email("player@example.com".to_string());
        view.set_login_password("hunter2".to_string());
        let credentials = view.login_form.credentials();
        assert_eq!(credentials.email, "player@example.com");
        assert_eq!(credentials.password, "hunter2");
    }

    #[test]
    fn dismiss_topmost_closes_one_surface_at_a_time() {
        let mut view = ViewState::default();
        view.open_detail(3);
        view.open_login();
        view.play_video(6);

        assert!(view.dismiss_topmost());
        assert!(!view.show_login_modal);
        assert_eq!(view.selected_lineup, Some(3));

        assert!(view.dismiss_topmost());
        assert_eq!(view.selected_lineup, None);
        assert_eq!(view.active_video_id, Some(6));

        assert!(view.dismiss_topmost());
        assert_eq!(view.active_video_id, None);

        assert!(!view.dismiss_topmost());
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn dismiss_topmost_follows_paint_order_of_stacked_modals() {
        let mut view = ViewState::default();
        view.open_detail(1);
        view.open_login();
        view.open_add_lineup();

        assert!(view.dismiss_topmost());
        assert!(!view.show_add_lineup_modal);
        assert!(view.show_login_modal);
        assert_eq!(view.selected_lineup, Some(1));

        assert!(view.dismiss_topmost());
        assert!(!view.show_login_modal);
        assert_eq!(view.selected_lineup, Some(1));

        assert!(view.dismiss_topmost());
        assert_eq!(view.selected_lineup, None);
    }
}

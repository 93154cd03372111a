use std::sync::Arc;

use anyhow::Result;
use log::info;

use crate::api::patient::{AdminCredentials, Credentials};
use crate::api::ApiResult;
use crate::client::service::ClinicApi;
use crate::session::{Role, Session, SessionStore};
use crate::ui::Ui;

use super::{Navigation, Page};

/// Entry page: role selection plus the admin and doctor login forms.
pub struct LoginPage {
    api: Arc<dyn ClinicApi>,
    ui: Arc<dyn Ui>,
    store: SessionStore,
}

impl LoginPage {
    pub fn new(api: Arc<dyn ClinicApi>, ui: Arc<dyn Ui>, store: SessionStore) -> Self {
        Self { api, ui, store }
    }

    pub async fn admin_login(&self, username: &str, password: &str) -> Result<Navigation> {
        let creds = AdminCredentials::new(username, password);
        if !creds.is_complete() {
            self.ui.alert("Please enter both username and password.");
            return Ok(Navigation::Stay);
        }

        let result = self.api.admin_login(&creds).await;
        finish_login(&self.store, self.ui.as_ref(), result, Role::Admin)
    }

    pub async fn doctor_login(&self, email: &str, password: &str) -> Result<Navigation> {
        let creds = Credentials::new(email, password.trim());
        if !creds.is_complete() {
            self.ui.alert("Please enter both email and password.");
            return Ok(Navigation::Stay);
        }

        let result = self.api.doctor_login(&creds).await;
        finish_login(&self.store, self.ui.as_ref(), result, Role::Doctor)
    }

    /// Browses as `role` without an account session.
    pub fn select_role(&self, role: Role) -> Result<Navigation> {
        self.store.save(&Session::with_role(role))?;
        Ok(Navigation::Redirect(Page::dashboard(role)))
    }

    pub fn logout(&self) -> Result<Navigation> {
        self.store.clear()?;
        info!("Logged out");
        Ok(Navigation::Redirect(Page::Home))
    }
}

fn login_message(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin login successful!",
        Role::Doctor => "Doctor login successful!",
        Role::Patient | Role::LoggedPatient => "Login successful!",
    }
}

/// Stores the session of a successful login and sends the user to the
/// dashboard of `role`. A failed login only alerts.
pub(super) fn finish_login(
    store: &SessionStore,
    ui: &dyn Ui,
    result: ApiResult,
    role: Role,
) -> Result<Navigation> {
    let token = match result.token {
        Some(token) if result.success => token,
        _ => {
            ui.alert(&result.message);
            return Ok(Navigation::Stay);
        }
    };

    store.save(&Session::logged_in(token, role))?;
    info!("Logged in as {role}");
    ui.alert(login_message(role));
    Ok(Navigation::Redirect(Page::dashboard(role)))
}

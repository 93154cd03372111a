use std::sync::Arc;

use anyhow::Result;

use crate::api::patient::{Credentials, NewPatient};
use crate::card::{CardAction, LOGIN_FIRST};
use crate::client::service::ClinicApi;
use crate::session::{Role, Session, SessionStore};
use crate::ui::Ui;

use super::board::DoctorBoard;
use super::login::finish_login;
use super::Navigation;

pub const INCOMPLETE_PATIENT: &str = "Please fill in all fields.";

/// Dashboard for visitors and logged-in patients. Which one it is follows
/// from the session role.
pub struct PatientDashboard {
    board: DoctorBoard,
    store: SessionStore,
}

impl PatientDashboard {
    pub fn new(
        api: Arc<dyn ClinicApi>,
        ui: Arc<dyn Ui>,
        session: Session,
        store: SessionStore,
    ) -> Self {
        Self {
            board: DoctorBoard::new(api, ui, session),
            store,
        }
    }

    pub fn board(&self) -> &DoctorBoard {
        &self.board
    }

    pub async fn signup(&self, form: NewPatient) -> Navigation {
        let ui = self.board.ui();
        let patient = form.normalize();
        if !patient.is_complete() {
            ui.alert(INCOMPLETE_PATIENT);
            return Navigation::Stay;
        }

        let result = self.board.api().patient_signup(&patient).await;
        ui.alert(&result.message);
        if result.success {
            self.board.load().await;
        }
        Navigation::Stay
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Navigation> {
        let ui = self.board.ui();
        let creds = Credentials::new(email, password);
        if !creds.is_complete() {
            ui.alert("Please enter both email and password.");
            return Ok(Navigation::Stay);
        }

        let result = self.board.api().patient_login(&creds).await;
        finish_login(&self.store, ui, result, Role::LoggedPatient)
    }

    pub async fn book(&self, doctor_id: u64) -> Navigation {
        let action = match self.board.session().role() {
            Some(Role::LoggedPatient) => CardAction::Book,
            Some(Role::Patient) => CardAction::LoginToBook,
            Some(Role::Admin) | Some(Role::Doctor) | None => {
                self.board.ui().alert(LOGIN_FIRST);
                return Navigation::Stay;
            }
        };
        self.board.activate(doctor_id, action).await
    }
}

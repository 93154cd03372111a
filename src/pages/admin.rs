use std::sync::Arc;

use log::info;

use crate::api::doctor::NewDoctor;
use crate::card::{CardAction, SESSION_EXPIRED};
use crate::client::service::ClinicApi;
use crate::session::Session;
use crate::ui::Ui;

use super::board::DoctorBoard;
use super::{Navigation, Page};

pub const INCOMPLETE_DOCTOR: &str =
    "Please fill all fields and select at least one availability.";
pub const DOCTOR_ADDED: &str = "Doctor added successfully!";

pub struct AdminDashboard {
    board: DoctorBoard,
}

impl AdminDashboard {
    pub fn new(api: Arc<dyn ClinicApi>, ui: Arc<dyn Ui>, session: Session) -> Self {
        Self {
            board: DoctorBoard::new(api, ui, session),
        }
    }

    pub fn board(&self) -> &DoctorBoard {
        &self.board
    }

    /// Submits the add-doctor form. On success the list is reloaded once; on
    /// failure the form is left as it was.
    pub async fn add_doctor(&self, form: NewDoctor) -> Navigation {
        let ui = self.board.ui();
        let token = match self.board.session().token() {
            Some(token) => token,
            None => {
                ui.alert(SESSION_EXPIRED);
                return Navigation::Redirect(Page::Home);
            }
        };

        let doctor = form.normalize();
        if !doctor.is_complete() {
            ui.alert(INCOMPLETE_DOCTOR);
            return Navigation::Stay;
        }

        let result = self.board.api().save_doctor(&doctor, token).await;
        if !result.success {
            ui.alert(&result.message);
            return Navigation::Stay;
        }

        info!("Doctor '{}' added", doctor.name);
        ui.alert(DOCTOR_ADDED);
        self.board.load().await;
        Navigation::Stay
    }

    pub async fn delete_doctor(&self, doctor_id: u64) -> Navigation {
        self.board.activate(doctor_id, CardAction::Delete).await
    }
}

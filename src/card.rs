use log::{debug, info};
use serde::Serialize;

use crate::api::doctor::Doctor;
use crate::client::service::ClinicApi;
use crate::pages::Page;
use crate::session::{Role, Session};
use crate::ui::{BookingOverlay, Ui};

pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";
pub const LOGIN_FIRST: &str = "Please log in first to book an appointment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    /// Admin only: remove the doctor.
    Delete,
    /// Visitor on the patient dashboard: booking needs an account.
    LoginToBook,
    /// Logged-in patient: open the booking overlay.
    Book,
}

impl CardAction {
    pub fn label(self) -> &'static str {
        match self {
            CardAction::Delete => "Delete",
            CardAction::LoginToBook | CardAction::Book => "Book Now",
        }
    }
}

/// What activating an action did, the caller applies it to its page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The doctor is gone, drop the card from its container.
    Removed,
    /// Nothing changed on the page (cancelled, rejected, or only an alert).
    Unchanged,
    /// The booking overlay was shown.
    BookingShown,
    Redirect(Page),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorCard {
    doctor: Doctor,
    actions: Vec<CardAction>,
}

/// Builds the card of `doctor` as seen by `session`.
pub fn render(doctor: &Doctor, session: &Session) -> DoctorCard {
    let actions = match session.role() {
        Some(Role::Admin) => vec![CardAction::Delete],
        Some(Role::Patient) => vec![CardAction::LoginToBook],
        Some(Role::LoggedPatient) => vec![CardAction::Book],
        Some(Role::Doctor) | None => Vec::new(),
    };
    DoctorCard {
        doctor: doctor.clone(),
        actions,
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

impl DoctorCard {
    pub fn doctor(&self) -> &Doctor {
        &self.doctor
    }

    pub fn doctor_id(&self) -> Option<u64> {
        self.doctor.id
    }

    pub fn actions(&self) -> &[CardAction] {
        &self.actions
    }

    pub fn has_action(&self, action: CardAction) -> bool {
        self.actions.contains(&action)
    }

    pub fn name(&self) -> &str {
        or_default(&self.doctor.name, "Unnamed Doctor")
    }

    pub fn specialty(&self) -> &str {
        or_default(&self.doctor.specialty, "N/A")
    }

    pub fn email(&self) -> &str {
        or_default(&self.doctor.email, "Not Provided")
    }

    pub fn availability(&self) -> String {
        if self.doctor.availability.is_empty() {
            return String::from("N/A");
        }
        self.doctor.availability.join(", ")
    }

    pub fn info_lines(&self) -> Vec<String> {
        vec![
            self.name().to_string(),
            format!("Specialty: {}", self.specialty()),
            format!("Email: {}", self.email()),
            format!("Available: {}", self.availability()),
        ]
    }

    /// Runs `action` the way clicking its button would. The action must be one
    /// of the card's own.
    pub async fn activate(
        &self,
        action: CardAction,
        session: &Session,
        api: &dyn ClinicApi,
        ui: &dyn Ui,
    ) -> ActionOutcome {
        if !self.has_action(action) {
            debug!("Action {action:?} is not offered on the card of '{}'", self.name());
            return ActionOutcome::Unchanged;
        }

        match action {
            CardAction::Delete => self.delete(session, api, ui).await,
            CardAction::LoginToBook => {
                ui.alert(LOGIN_FIRST);
                ActionOutcome::Unchanged
            }
            CardAction::Book => self.book(session, api, ui).await,
        }
    }

    async fn delete(&self, session: &Session, api: &dyn ClinicApi, ui: &dyn Ui) -> ActionOutcome {
        let question = format!("Are you sure you want to delete Dr. {}?", self.name());
        if !ui.confirm(&question) {
            return ActionOutcome::Unchanged;
        }

        let token = match session.token() {
            Some(token) => token,
            None => {
                ui.alert(SESSION_EXPIRED);
                return ActionOutcome::Redirect(Page::Home);
            }
        };

        let id = match self.doctor.id {
            Some(id) => id,
            None => {
                ui.alert("Failed to delete doctor: the record has no id.");
                return ActionOutcome::Unchanged;
            }
        };

        let result = api.delete_doctor(id, token).await;
        if result.success {
            info!("Doctor {id} deleted");
            ui.alert(&format!("Doctor {} deleted successfully.", self.name()));
            ActionOutcome::Removed
        } else {
            ui.alert(&result.message);
            ActionOutcome::Unchanged
        }
    }

    async fn book(&self, session: &Session, api: &dyn ClinicApi, ui: &dyn Ui) -> ActionOutcome {
        let token = match session.token() {
            Some(token) => token,
            None => {
                ui.alert(SESSION_EXPIRED);
                return ActionOutcome::Redirect(Page::Home);
            }
        };

        let patient = match api.get_patient_data(token).await {
            Some(patient) => patient,
            None => {
                ui.alert("Unable to fetch patient data. Please try again.");
                return ActionOutcome::Unchanged;
            }
        };

        let overlay = BookingOverlay {
            doctor: self.doctor.clone(),
            patient,
        };
        ui.show_booking(&overlay);
        if ui.confirm("Confirm Booking?") {
            overlay.confirm(ui);
        }
        ActionOutcome::BookingShown
    }
}

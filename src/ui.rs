use console::{style, Term};
use log::warn;

use crate::api::doctor::Doctor;
use crate::api::patient::Patient;

/// The user-facing surface the pages talk to: blocking alerts, confirmation
/// prompts and the booking overlay.
pub trait Ui: Send + Sync {
    fn alert(&self, message: &str);

    fn confirm(&self, message: &str) -> bool;

    fn show_booking(&self, overlay: &BookingOverlay);
}

/// Booking surface opened for a logged-in patient, pre-filled with both
/// identities.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingOverlay {
    pub doctor: Doctor,
    pub patient: Patient,
}

impl BookingOverlay {
    pub const CONFIRMED: &'static str = "Booking confirmed!";

    pub fn title(&self) -> String {
        format!("Book Appointment with Dr. {}", self.doctor.name)
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            self.title(),
            format!("Specialty: {}", self.doctor.specialty),
            format!("Patient: {}", self.patient.name),
        ]
    }

    /// Confirmation only acknowledges the choice, no booking request is sent.
    pub fn confirm(&self, ui: &dyn Ui) {
        ui.alert(Self::CONFIRMED);
    }
}

/// Ui on the controlling terminal. Alerts go to stderr so listings on stdout
/// stay machine readable.
pub struct TerminalUi {
    term: Term,
    assume_yes: bool,
}

impl TerminalUi {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            term: Term::stderr(),
            assume_yes,
        }
    }

    pub fn prompt(&self, label: &str) -> anyhow::Result<String> {
        self.term.write_str(&format!("{label}: "))?;
        Ok(self.term.read_line()?.trim().to_string())
    }

    pub fn prompt_secret(&self, label: &str) -> anyhow::Result<String> {
        self.term.write_str(&format!("{label}: "))?;
        Ok(self.term.read_secure_line()?)
    }
}

impl Ui for TerminalUi {
    fn alert(&self, message: &str) {
        if let Err(err) = self.term.write_line(&format!("{} {message}", style("!").bold().cyan())) {
            warn!("Write alert to terminal: {err}");
        }
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let question = format!("{} {message} [y/N] ", style("?").bold().yellow());
        if self.term.write_str(&question).is_err() {
            return false;
        }
        match self.term.read_line() {
            Ok(answer) => matches!(answer.trim(), "y" | "Y" | "yes"),
            Err(err) => {
                warn!("Read confirmation from terminal: {err}");
                false
            }
        }
    }

    fn show_booking(&self, overlay: &BookingOverlay) {
        let mut lines = overlay.lines().into_iter();
        if let Some(title) = lines.next() {
            _ = self.term.write_line(&style(title).bold().to_string());
        }
        for line in lines {
            _ = self.term.write_line(&format!("  {line}"));
        }
    }
}

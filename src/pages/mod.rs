pub mod admin;
pub mod appointments;
pub mod board;
pub mod login;
pub mod patient;

use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::session::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Entry page with the role selection and the login forms.
    Home,
    AdminDashboard,
    DoctorDashboard,
    PatientDashboard,
    LoggedPatientDashboard,
}

impl Page {
    pub fn dashboard(role: Role) -> Page {
        match role {
            Role::Admin => Page::AdminDashboard,
            Role::Doctor => Page::DoctorDashboard,
            Role::Patient => Page::PatientDashboard,
            Role::LoggedPatient => Page::LoggedPatientDashboard,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::AdminDashboard => "admin dashboard",
            Page::DoctorDashboard => "doctor dashboard",
            Page::PatientDashboard => "patient dashboard",
            Page::LoggedPatientDashboard => "logged patient dashboard",
        }
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Where the caller should go after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Redirect(Page),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Idle,
    Loading,
    Loaded(Vec<T>),
    Empty(String),
    Error(String),
}

impl<T> PageState<T> {
    pub fn items(&self) -> &[T] {
        match self {
            PageState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }

    /// Loaded when there is anything to show, Empty with `empty_message`
    /// otherwise.
    pub fn from_items(items: Vec<T>, empty_message: &str) -> Self {
        if items.is_empty() {
            PageState::Empty(empty_message.to_string())
        } else {
            PageState::Loaded(items)
        }
    }
}

/// Request-generation counter. Every load or filter cycle takes a new
/// generation; only the cycle holding the latest one may write the page.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0.load(Ordering::SeqCst) == generation
    }
}

use std::fmt::Display;

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{non_blank, push_field, QueryFields, RequestField};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub patient_id: Option<u64>,

    #[serde(default)]
    pub patient_name: Option<String>,

    #[serde(default)]
    pub doctor_id: Option<u64>,

    #[serde(default)]
    pub doctor_name: Option<String>,

    #[serde(default)]
    pub appointment_time: Option<String>,

    #[serde(default)]
    pub status: Option<AppointmentStatus>,
}

/// The backend reports status as a numeric code, some deployments send the
/// label itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppointmentStatus {
    Code(i64),
    Label(String),
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Code(0) => write!(f, "pending"),
            AppointmentStatus::Code(1) => write!(f, "consulted"),
            AppointmentStatus::Code(code) => write!(f, "status {code}"),
            AppointmentStatus::Label(label) => write!(f, "{label}"),
        }
    }
}

impl Appointment {
    const TIME_FORMATS: [&'static str; 3] =
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

    /// Backend timestamps are local date-times without zone. Anything that does
    /// not parse is shown as received.
    pub fn display_time(&self) -> String {
        let raw = match self.appointment_time {
            Some(ref raw) => raw,
            None => return String::from("N/A"),
        };
        for format in Self::TIME_FORMATS {
            if let Ok(time) = NaiveDateTime::parse_from_str(raw, format) {
                return time.format("%Y-%m-%d %H:%M").to_string();
            }
        }
        raw.clone()
    }

    pub fn display_status(&self) -> String {
        match self.status {
            Some(ref status) => status.to_string(),
            None => String::from("N/A"),
        }
    }
}

/// Which dashboard is asking for a patient's appointments, it becomes the
/// `{role}` segment of the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Requester {
    Patient,
    Doctor,
}

impl Requester {
    pub fn as_str(self) -> &'static str {
        match self {
            Requester::Patient => "patient",
            Requester::Doctor => "doctor",
        }
    }
}

pub fn patient_appointments_path(requester: Requester, patient_id: u64) -> String {
    format!("/patient/{}/{patient_id}/appointments", requester.as_str())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub condition: Option<String>,
    pub name: Option<String>,
}

impl AppointmentFilter {
    pub fn new(condition: &str, name: &str) -> Self {
        Self {
            condition: non_blank(condition),
            name: non_blank(name),
        }
    }
}

impl QueryFields for AppointmentFilter {
    fn fields(&self) -> Vec<RequestField> {
        let mut fields = Vec::new();
        push_field(&mut fields, "condition", &self.condition);
        push_field(&mut fields, "name", &self.name);
        fields
    }
}

use std::collections::HashMap;

use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::Serialize;

use crate::api::appointment::Appointment;
use crate::card::DoctorCard;
use crate::pages::PageState;
use crate::table::Table;

/// Display style options for output formatting
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DisplayStyle {
    /// Display data in a formatted table
    Table,
    /// Display data in JSON format
    Json,
    /// Display data in CSV format
    Csv,
}

/// Types that can be listed in the terminal.
pub trait TerminalDisplay {
    fn table_titles() -> Vec<&'static str>;

    fn table_row(&self) -> Vec<String>;

    fn csv_titles() -> Vec<&'static str>;

    fn csv_row(&self) -> HashMap<&'static str, String>;
}

pub fn pretty_json<T: Serialize>(o: T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&o)?);
    Ok(())
}

/// Prints what a page currently shows. An `Error` state becomes the command
/// error.
pub fn display_state<T>(state: PageState<T>, style: DisplayStyle, headless: bool) -> Result<()>
where
    T: Serialize + TerminalDisplay,
{
    match state {
        PageState::Loaded(items) => display_list(&items, style, headless),
        PageState::Empty(message) => {
            match style {
                DisplayStyle::Json => println!("[]"),
                DisplayStyle::Table | DisplayStyle::Csv => println!("{message}"),
            }
            Ok(())
        }
        PageState::Error(message) => bail!("{message}"),
        PageState::Idle | PageState::Loading => Ok(()),
    }
}

pub fn display_list<T>(items: &[T], style: DisplayStyle, headless: bool) -> Result<()>
where
    T: Serialize + TerminalDisplay,
{
    match style {
        DisplayStyle::Table => {
            let mut table = Table::new(&T::table_titles(), items.len(), headless);
            for item in items {
                table.add(item.table_row());
            }
            table.show();
        }
        DisplayStyle::Csv => {
            let titles = T::csv_titles();
            if !headless {
                println!("{}", titles.join(","));
            }
            for item in items {
                let mut row = item.csv_row();
                let values: Vec<_> = titles
                    .iter()
                    .map(|title| csv_cell(&row.remove(*title).unwrap_or_default()))
                    .collect();
                println!("{}", values.join(","));
            }
        }
        DisplayStyle::Json => pretty_json(items)?,
    }
    Ok(())
}

fn csv_cell(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn id_text(id: Option<u64>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => String::from("-"),
    }
}

impl TerminalDisplay for DoctorCard {
    fn table_titles() -> Vec<&'static str> {
        vec!["ID", "Name", "Specialty", "Email", "Available", "Actions"]
    }

    fn table_row(&self) -> Vec<String> {
        let actions: Vec<_> = self.actions().iter().map(|a| a.label()).collect();
        vec![
            id_text(self.doctor_id()),
            self.name().to_string(),
            self.specialty().to_string(),
            self.email().to_string(),
            self.availability(),
            actions.join(", "),
        ]
    }

    fn csv_titles() -> Vec<&'static str> {
        vec!["id", "name", "specialty", "email", "mobile", "available"]
    }

    fn csv_row(&self) -> HashMap<&'static str, String> {
        let doctor = self.doctor();
        HashMap::from([
            ("id", id_text(doctor.id)),
            ("name", doctor.name.clone()),
            ("specialty", doctor.specialty.clone()),
            ("email", doctor.email.clone()),
            ("mobile", doctor.mobile.clone()),
            ("available", doctor.availability.join(" ")),
        ])
    }
}

impl TerminalDisplay for Appointment {
    fn table_titles() -> Vec<&'static str> {
        vec!["ID", "Patient", "Doctor", "Time", "Status"]
    }

    fn table_row(&self) -> Vec<String> {
        vec![
            id_text(self.id),
            self.patient_name.clone().unwrap_or_else(|| id_text(self.patient_id)),
            self.doctor_name.clone().unwrap_or_else(|| id_text(self.doctor_id)),
            self.display_time(),
            self.display_status(),
        ]
    }

    fn csv_titles() -> Vec<&'static str> {
        vec!["id", "patient_id", "patient", "doctor_id", "doctor", "time", "status"]
    }

    fn csv_row(&self) -> HashMap<&'static str, String> {
        HashMap::from([
            ("id", id_text(self.id)),
            ("patient_id", id_text(self.patient_id)),
            ("patient", self.patient_name.clone().unwrap_or_default()),
            ("doctor_id", id_text(self.doctor_id)),
            ("doctor", self.doctor_name.clone().unwrap_or_default()),
            ("time", self.appointment_time.clone().unwrap_or_default()),
            ("status", self.display_status()),
        ])
    }
}

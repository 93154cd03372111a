use serde::{Deserialize, Serialize};

use super::{non_blank, null_as_default, push_field, QueryFields, RequestField};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub specialty: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,

    /// Write-only, the backend never returns it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, alias = "phone", deserialize_with = "null_as_default")]
    pub mobile: String,

    #[serde(default, alias = "availableTimes", deserialize_with = "null_as_default")]
    pub availability: Vec<String>,
}

/// Payload of the add-doctor form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDoctor {
    pub name: String,
    pub specialty: String,
    pub email: String,
    pub password: String,
    pub mobile: String,
    pub availability: Vec<String>,
}

impl NewDoctor {
    /// Trims every field and drops blank availability slots.
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.specialty = self.specialty.trim().to_string();
        self.email = self.email.trim().to_string();
        self.password = self.password.trim().to_string();
        self.mobile = self.mobile.trim().to_string();
        self.availability = self
            .availability
            .into_iter()
            .filter_map(|slot| non_blank(&slot))
            .collect();
        self
    }

    /// Only presence is checked, email and password formats are left to the
    /// backend.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty()
            && !self.specialty.is_empty()
            && !self.email.is_empty()
            && !self.password.is_empty()
            && !self.mobile.is_empty()
            && !self.availability.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorFilter {
    pub name: Option<String>,
    pub time: Option<String>,
    pub specialty: Option<String>,
}

impl DoctorFilter {
    pub fn new(name: &str, time: &str, specialty: &str) -> Self {
        Self {
            name: non_blank(name),
            time: non_blank(time),
            specialty: non_blank(specialty),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.time.is_none() && self.specialty.is_none()
    }
}

impl QueryFields for DoctorFilter {
    fn fields(&self) -> Vec<RequestField> {
        let mut fields = Vec::new();
        push_field(&mut fields, "name", &self.name);
        push_field(&mut fields, "time", &self.time);
        push_field(&mut fields, "specialty", &self.specialty);
        fields
    }
}

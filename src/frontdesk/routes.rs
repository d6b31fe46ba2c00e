//! Path-based navigation.
//!
//! Every front-end screen has a path. Anything unrecognised, including a
//! non-numeric or zero id, resolves to [`View::Landing`].

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Patients,
    AddPatient,
    EditPatient(u32),
    PatientDetails(u32),
    Doctors,
    DoctorRegistration,
    DoctorDetails(u32),
}

impl View {
    pub fn resolve(path: &str) -> View {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => View::Landing,
            ["patients"] => View::Patients,
            ["doctors"] => View::Doctors,
            ["add-patient"] => View::AddPatient,
            ["add-patient", id] => parse_id(id).map_or(View::Landing, View::EditPatient),
            ["patient-details", id] => parse_id(id).map_or(View::Landing, View::PatientDetails),
            ["doctor-registration"] => View::DoctorRegistration,
            ["doctor-details", id] => parse_id(id).map_or(View::Landing, View::DoctorDetails),
            _ => View::Landing,
        }
    }

    pub fn path(&self) -> String {
        match self {
            View::Landing => "/".to_string(),
            View::Patients => "/patients".to_string(),
            View::AddPatient => "/add-patient".to_string(),
            View::EditPatient(id) => format!("/add-patient/{}", id),
            View::PatientDetails(id) => format!("/patient-details/{}", id),
            View::Doctors => "/doctors".to_string(),
            View::DoctorRegistration => "/doctor-registration".to_string(),
            View::DoctorDetails(id) => format!("/doctor-details/{}", id),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn parse_id(raw: &str) -> Option<u32> {
    raw.parse().ok().filter(|id| *id > 0)
}

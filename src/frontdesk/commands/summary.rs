use super::CmdResult;
use crate::model::{Doctor, DoctorStatus, Patient};
use crate::routes::View;
use chrono::NaiveDate;
use serde::Serialize;

/// Counts shown on the landing view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub patients: usize,
    pub doctors: usize,
    pub active_doctors: usize,
    /// Patients with a next appointment on or after `today`.
    pub upcoming_appointments: usize,
}

pub fn run(patients: &[Patient], doctors: &[Doctor], today: NaiveDate) -> CmdResult {
    let summary = Summary {
        patients: patients.len(),
        doctors: doctors.len(),
        active_doctors: doctors
            .iter()
            .filter(|d| d.status == DoctorStatus::Active)
            .count(),
        upcoming_appointments: patients
            .iter()
            .filter(|p| p.next_appointment.is_some_and(|date| date >= today))
            .count(),
    };
    CmdResult::default()
        .with_view(View::Landing)
        .with_summary(summary)
}

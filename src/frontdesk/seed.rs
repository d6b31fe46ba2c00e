//! Fixed datasets used when nothing has been stored yet.

use crate::model::{
    BloodType, Doctor, DoctorDraft, EmergencyContact, Gender, Patient, PatientDraft, Record,
    Specialization,
};
use chrono::{DateTime, NaiveDate, Utc};

// 2024-01-15T09:00:00Z
const SEEDED_AT: i64 = 1_705_309_200;

fn seeded_at() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(SEEDED_AT, 0).unwrap_or_default()
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

pub fn patients() -> Vec<Patient> {
    let now = seeded_at();

    let mut john = PatientDraft::new(
        "John",
        "Smith",
        45,
        Gender::Male,
        "5550101234",
        "john.smith@example.com",
    );
    john.address = Some("12 Elm Street, Springfield".into());
    john.blood_type = Some(BloodType::APositive);
    john.medical_history = Some("Hypertension, diagnosed 2019".into());
    john.current_medications = Some("Lisinopril 10mg daily".into());
    john.allergies = Some("Penicillin".into());
    john.insurance_info = Some("BlueCross #BC-44812".into());
    john.last_visit = date(2024, 1, 8);
    john.next_appointment = date(2024, 2, 12);
    john.emergency_contact = Some(EmergencyContact {
        name: "Mary Smith".into(),
        relationship: "Spouse".into(),
        phone: "5550105678".into(),
    });

    let mut sara = PatientDraft::new(
        "Sara",
        "Okafor",
        29,
        Gender::Female,
        "5550112233",
        "sara.okafor@example.com",
    );
    sara.blood_type = Some(BloodType::ONegative);
    sara.allergies = Some("None known".into());
    sara.last_visit = date(2023, 12, 19);
    sara.emergency_contact = Some(EmergencyContact {
        name: "Chidi Okafor".into(),
        relationship: "Brother".into(),
        phone: "5550119988".into(),
    });

    let mut ravi = PatientDraft::new(
        "Ravi",
        "Menon",
        67,
        Gender::Male,
        "5550134455",
        "ravi.menon@example.com",
    );
    ravi.blood_type = Some(BloodType::BPositive);
    ravi.medical_history = Some("Type 2 diabetes; knee replacement 2021".into());
    ravi.current_medications = Some("Metformin 500mg twice daily".into());
    ravi.next_appointment = date(2024, 1, 29);
    ravi.notes = Some("Prefers morning appointments".into());

    vec![
        Patient::build(1, john, now),
        Patient::build(2, sara, now),
        Patient::build(3, ravi, now),
    ]
}

pub fn doctors() -> Vec<Doctor> {
    let now = seeded_at();

    let mut grey = DoctorDraft::new("Meredith", "Grey", Specialization::Neurology, "NEU48213");
    grey.email = "m.grey@stmarys.example".into();
    grey.phone = "5550201000".into();
    grey.gender = Some(Gender::Female);
    grey.experience = 12;
    grey.hospital = "St. Mary's General".into();
    grey.qualifications = Some("MD, PhD Neuroscience".into());
    grey.working_days = Some("Mon-Thu".into());
    grey.working_hours = Some("08:00-16:00".into());
    grey.languages = Some("English, French".into());

    let mut osei = DoctorDraft::new("Kwame", "Osei", Specialization::Cardiology, "CAR77120");
    osei.email = "k.osei@stmarys.example".into();
    osei.phone = "5550202000".into();
    osei.gender = Some(Gender::Male);
    osei.experience = 20;
    osei.hospital = "St. Mary's General".into();
    osei.qualifications = Some("MD, FACC".into());
    osei.working_days = Some("Tue-Sat".into());
    osei.working_hours = Some("10:00-18:00".into());
    osei.insurance_accepted = Some("BlueCross, Aetna".into());

    let mut lind = DoctorDraft::new("Ingrid", "Lind", Specialization::Pediatrics, "PED30551");
    lind.email = "i.lind@northside.example".into();
    lind.phone = "5550203000".into();
    lind.experience = 7;
    lind.hospital = "Northside Children's".into();
    lind.working_days = Some("Mon-Fri".into());
    lind.working_hours = Some("09:00-17:00".into());
    lind.languages = Some("English, Swedish".into());

    vec![
        Doctor::build(1, grey, now),
        Doctor::build(2, osei, now),
        Doctor::build(3, lind, now),
    ]
}

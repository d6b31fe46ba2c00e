//! Record types for patients and doctors.
//!
//! Records serialize with camelCase keys. Optional fields are explicit `Option`s; on
//! load, blank strings in optional enum/date fields are read as `None` and numeric
//! fields accept either JSON numbers or numeric strings, so data written by older
//! front-ends still parses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Patient,
    Doctor,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Patient => write!(f, "Patient"),
            RecordKind::Doctor => write!(f, "Doctor"),
        }
    }
}

/// Common behaviour the record store needs from a stored entity.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// The id-less field set a record is created from or replaced with.
    type Draft;

    const KIND: RecordKind;

    fn id(&self) -> u32;
    fn set_id(&mut self, id: u32);

    fn build(id: u32, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Replaces every editable field, keeping id and creation time.
    fn replace(&mut self, draft: Self::Draft, now: DateTime<Utc>);

    fn touch(&mut self, now: DateTime<Utc>);

    /// `term` is already lowercased.
    fn matches(&self, term: &str) -> bool;

    fn full_name(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown gender: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        BloodType::ALL
            .into_iter()
            .find(|b| b.as_str() == wanted)
            .ok_or_else(|| format!("unknown blood type: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Specialization {
    Neurology,
    Cardiology,
    Pediatrics,
    Dermatology,
    Orthopedics,
    Psychiatry,
    #[serde(rename = "General Medicine")]
    GeneralMedicine,
    Other,
}

impl Specialization {
    pub const ALL: [Specialization; 8] = [
        Specialization::Neurology,
        Specialization::Cardiology,
        Specialization::Pediatrics,
        Specialization::Dermatology,
        Specialization::Orthopedics,
        Specialization::Psychiatry,
        Specialization::GeneralMedicine,
        Specialization::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialization::Neurology => "Neurology",
            Specialization::Cardiology => "Cardiology",
            Specialization::Pediatrics => "Pediatrics",
            Specialization::Dermatology => "Dermatology",
            Specialization::Orthopedics => "Orthopedics",
            Specialization::Psychiatry => "Psychiatry",
            Specialization::GeneralMedicine => "General Medicine",
            Specialization::Other => "Other",
        }
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Specialization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Specialization::ALL
            .into_iter()
            .find(|sp| sp.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown specialization: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoctorStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for DoctorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoctorStatus::Active => write!(f, "active"),
            DoctorStatus::Inactive => write!(f, "inactive"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub age: u32,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub blood_type: Option<BloodType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_medications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_info: Option<String>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_visit: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_appointment: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDraft {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: Gender,
    pub phone: String,
    pub email: String,
    pub address: Option<String>,
    pub blood_type: Option<BloodType>,
    pub medical_history: Option<String>,
    pub current_medications: Option<String>,
    pub allergies: Option<String>,
    pub insurance_info: Option<String>,
    pub last_visit: Option<NaiveDate>,
    pub next_appointment: Option<NaiveDate>,
    pub emergency_contact: Option<EmergencyContact>,
    pub notes: Option<String>,
}

impl PatientDraft {
    /// A draft with the required fields set and every optional field empty.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: u32,
        gender: Gender,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            gender,
            phone: phone.into(),
            email: email.into(),
            address: None,
            blood_type: None,
            medical_history: None,
            current_medications: None,
            allergies: None,
            insurance_info: None,
            last_visit: None,
            next_appointment: None,
            emergency_contact: None,
            notes: None,
        }
    }
}

impl From<&Patient> for PatientDraft {
    fn from(p: &Patient) -> Self {
        Self {
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            age: p.age,
            gender: p.gender,
            phone: p.phone.clone(),
            email: p.email.clone(),
            address: p.address.clone(),
            blood_type: p.blood_type,
            medical_history: p.medical_history.clone(),
            current_medications: p.current_medications.clone(),
            allergies: p.allergies.clone(),
            insurance_info: p.insurance_info.clone(),
            last_visit: p.last_visit,
            next_appointment: p.next_appointment,
            emergency_contact: p.emergency_contact.clone(),
            notes: p.notes.clone(),
        }
    }
}

impl Record for Patient {
    type Draft = PatientDraft;

    const KIND: RecordKind = RecordKind::Patient;

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn build(id: u32, draft: PatientDraft, now: DateTime<Utc>) -> Self {
        let mut patient = Patient {
            id,
            first_name: String::new(),
            last_name: String::new(),
            age: 0,
            gender: draft.gender,
            phone: String::new(),
            email: String::new(),
            address: None,
            blood_type: None,
            medical_history: None,
            current_medications: None,
            allergies: None,
            insurance_info: None,
            last_visit: None,
            next_appointment: None,
            emergency_contact: None,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        patient.replace(draft, now);
        patient
    }

    fn replace(&mut self, draft: PatientDraft, now: DateTime<Utc>) {
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.age = draft.age;
        self.gender = draft.gender;
        self.phone = draft.phone;
        self.email = draft.email;
        self.address = draft.address;
        self.blood_type = draft.blood_type;
        self.medical_history = draft.medical_history;
        self.current_medications = draft.current_medications;
        self.allergies = draft.allergies;
        self.insurance_info = draft.insurance_info;
        self.last_visit = draft.last_visit;
        self.next_appointment = draft.next_appointment;
        self.emergency_contact = draft.emergency_contact;
        self.notes = draft.notes;
        self.touch(now);
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }

    fn matches(&self, term: &str) -> bool {
        self.full_name().to_lowercase().contains(term)
            || self.phone.contains(term)
            || self.email.to_lowercase().contains(term)
    }

    fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub specialization: Specialization,
    pub license_number: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub experience: u32,
    #[serde(default)]
    pub hospital: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_days: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_accepted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: DoctorStatus,
    // Legacy doctor data carries no timestamps; those load as the epoch.
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub specialization: Specialization,
    pub license_number: String,
    pub experience: u32,
    pub hospital: String,
    pub qualifications: Option<String>,
    pub working_days: Option<String>,
    pub working_hours: Option<String>,
    pub languages: Option<String>,
    pub insurance_accepted: Option<String>,
    pub notes: Option<String>,
}

impl DoctorDraft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        specialization: Specialization,
        license_number: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: String::new(),
            phone: String::new(),
            gender: None,
            address: None,
            specialization,
            license_number: license_number.into(),
            experience: 0,
            hospital: String::new(),
            qualifications: None,
            working_days: None,
            working_hours: None,
            languages: None,
            insurance_accepted: None,
            notes: None,
        }
    }
}

impl From<&Doctor> for DoctorDraft {
    fn from(d: &Doctor) -> Self {
        Self {
            first_name: d.first_name.clone(),
            last_name: d.last_name.clone(),
            email: d.email.clone(),
            phone: d.phone.clone(),
            gender: d.gender,
            address: d.address.clone(),
            specialization: d.specialization,
            license_number: d.license_number.clone(),
            experience: d.experience,
            hospital: d.hospital.clone(),
            qualifications: d.qualifications.clone(),
            working_days: d.working_days.clone(),
            working_hours: d.working_hours.clone(),
            languages: d.languages.clone(),
            insurance_accepted: d.insurance_accepted.clone(),
            notes: d.notes.clone(),
        }
    }
}

impl Record for Doctor {
    type Draft = DoctorDraft;

    const KIND: RecordKind = RecordKind::Doctor;

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    fn build(id: u32, draft: DoctorDraft, now: DateTime<Utc>) -> Self {
        let mut doctor = Doctor {
            id,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            gender: None,
            address: None,
            specialization: draft.specialization,
            license_number: String::new(),
            experience: 0,
            hospital: String::new(),
            qualifications: None,
            working_days: None,
            working_hours: None,
            languages: None,
            insurance_accepted: None,
            notes: None,
            status: DoctorStatus::Active,
            created_at: now,
            updated_at: now,
        };
        doctor.replace(draft, now);
        doctor
    }

    fn replace(&mut self, draft: DoctorDraft, now: DateTime<Utc>) {
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.email = draft.email;
        self.phone = draft.phone;
        self.gender = draft.gender;
        self.address = draft.address;
        self.specialization = draft.specialization;
        self.license_number = draft.license_number;
        self.experience = draft.experience;
        self.hospital = draft.hospital;
        self.qualifications = draft.qualifications;
        self.working_days = draft.working_days;
        self.working_hours = draft.working_hours;
        self.languages = draft.languages;
        self.insurance_accepted = draft.insurance_accepted;
        self.notes = draft.notes;
        self.touch(now);
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }

    fn matches(&self, term: &str) -> bool {
        self.full_name().to_lowercase().contains(term)
            || self.specialization.as_str().to_lowercase().contains(term)
            || self.phone.contains(term)
            || self.email.to_lowercase().contains(term)
    }

    fn full_name(&self) -> String {
        format!("Dr. {} {}", self.first_name, self.last_name)
    }
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(de::Error::custom),
    }
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(u32),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_patient() -> Patient {
        Patient::build(
            3,
            PatientDraft::new("Ana", "Silva", 41, Gender::Female, "5551234567", "ana@x.org"),
            Utc::now(),
        )
    }

    #[test]
    fn patient_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample_patient()).unwrap();
        assert_eq!(json["firstName"], "Ana");
        assert_eq!(json["gender"], "female");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("bloodType").is_none());
    }

    #[test]
    fn legacy_patient_with_blank_fields_parses() {
        let json = r#"{
            "id": 1, "firstName": "Tom", "lastName": "Reed", "age": "52",
            "gender": "male", "phone": "5550001111", "email": "tom@reed.io",
            "bloodType": "", "lastVisit": "", "nextAppointment": "2024-05-02",
            "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let patient: Patient = serde_json::from_str(json).unwrap();
        assert_eq!(patient.age, 52);
        assert_eq!(patient.blood_type, None);
        assert_eq!(patient.last_visit, None);
        assert_eq!(
            patient.next_appointment,
            NaiveDate::from_ymd_opt(2024, 5, 2)
        );
    }

    #[test]
    fn legacy_doctor_without_timestamps_defaults_status_and_times() {
        let json = r#"{
            "id": 4, "firstName": "Lee", "lastName": "Park", "email": "lee@h.org",
            "phone": "5552223333", "specialization": "General Medicine",
            "licenseNumber": "GM1234", "experience": "12"
        }"#;
        let doctor: Doctor = serde_json::from_str(json).unwrap();
        assert_eq!(doctor.specialization, Specialization::GeneralMedicine);
        assert_eq!(doctor.status, DoctorStatus::Active);
        assert_eq!(doctor.experience, 12);
        assert_eq!(doctor.created_at, DateTime::<Utc>::default());
    }

    #[test]
    fn touch_never_moves_update_before_creation() {
        let mut patient = sample_patient();
        let earlier = patient.created_at - chrono::Duration::hours(1);
        patient.touch(earlier);
        assert!(patient.updated_at >= patient.created_at);
    }

    #[test]
    fn blood_type_parses_case_insensitively() {
        assert_eq!("ab-".parse::<BloodType>(), Ok(BloodType::AbNegative));
        assert!("C+".parse::<BloodType>().is_err());
    }

    #[test]
    fn new_doctor_is_active() {
        let draft = DoctorDraft::new("Mia", "Chen", Specialization::Cardiology, "CARD99");
        let doctor = Doctor::build(1, draft, Utc::now());
        assert_eq!(doctor.status, DoctorStatus::Active);
        assert_eq!(doctor.full_name(), "Dr. Mia Chen");
    }
}

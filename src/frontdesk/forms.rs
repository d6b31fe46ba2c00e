//! Patient and doctor forms: field names, rule sets, and binding to drafts.
//!
//! A form is a bag of raw strings ([`FormValues`]). Edit flows prefill it from the
//! stored record, overlay what the user changed, then call `into_draft`, which
//! validates the whole form and only then converts it. Nothing reaches a store
//! unless every field passes.

use crate::model::{
    BloodType, Doctor, DoctorDraft, EmergencyContact, Gender, Patient, PatientDraft,
    Specialization,
};
use crate::validation::{FieldRules, FormSchema, FormValues, Rule, ValidationErrors};
use once_cell::sync::Lazy;
use std::str::FromStr;

pub const PHONE_PATTERN: &str = r"^[0-9]{10}$";
pub const EMAIL_PATTERN: &str = r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";
pub const NO_DIGITS_PATTERN: &str = r"^[^\d]*$";
pub const LICENSE_PATTERN: &str = r"^[A-Z0-9]{6,}$";
pub const WHOLE_NUMBER_PATTERN: &str = r"^[0-9]+$";
pub const MAX_AGE: i64 = 150;
pub const MAX_EXPERIENCE: i64 = 80;

const DATE_MESSAGE: &str = "Please enter a date as YYYY-MM-DD";

pub mod patient {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const AGE: &str = "age";
    pub const GENDER: &str = "gender";
    pub const PHONE: &str = "phone";
    pub const EMAIL: &str = "email";
    pub const ADDRESS: &str = "address";
    pub const BLOOD_TYPE: &str = "bloodType";
    pub const MEDICAL_HISTORY: &str = "medicalHistory";
    pub const CURRENT_MEDICATIONS: &str = "currentMedications";
    pub const ALLERGIES: &str = "allergies";
    pub const INSURANCE_INFO: &str = "insuranceInfo";
    pub const LAST_VISIT: &str = "lastVisit";
    pub const NEXT_APPOINTMENT: &str = "nextAppointment";
    pub const EMERGENCY_NAME: &str = "emergencyContactName";
    pub const EMERGENCY_RELATIONSHIP: &str = "emergencyContactRelationship";
    pub const EMERGENCY_PHONE: &str = "emergencyContactPhone";
    pub const NOTES: &str = "notes";
}

pub mod doctor {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const GENDER: &str = "gender";
    pub const ADDRESS: &str = "address";
    pub const SPECIALIZATION: &str = "specialization";
    pub const LICENSE_NUMBER: &str = "licenseNumber";
    pub const EXPERIENCE: &str = "experience";
    pub const HOSPITAL: &str = "hospital";
    pub const QUALIFICATIONS: &str = "qualifications";
    pub const WORKING_DAYS: &str = "workingDays";
    pub const WORKING_HOURS: &str = "workingHours";
    pub const LANGUAGES: &str = "languages";
    pub const INSURANCE_ACCEPTED: &str = "insuranceAccepted";
    pub const NOTES: &str = "notes";
}

const GENDERS: &[&str] = &["male", "female", "other"];
const BLOOD_TYPES: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];
const SPECIALIZATIONS: &[&str] = &[
    "Neurology",
    "Cardiology",
    "Pediatrics",
    "Dermatology",
    "Orthopedics",
    "Psychiatry",
    "General Medicine",
    "Other",
];

fn optional(name: &'static str, label: &'static str) -> FieldRules {
    FieldRules::new(name, label)
}

pub static PATIENT_SCHEMA: Lazy<FormSchema> = Lazy::new(|| {
    use patient::*;
    FormSchema::new(vec![
        FieldRules::new(FIRST_NAME, "First name").rule(Rule::Required("First name is required")),
        FieldRules::new(LAST_NAME, "Last name").rule(Rule::Required("Last name is required")),
        FieldRules::new(AGE, "Age")
            .rule(Rule::Required("Age is required"))
            .rule(Rule::Integer("Age must be a number"))
            .rule(Rule::Min {
                value: 0,
                message: "Age must be positive",
            })
            .rule(Rule::Max {
                value: MAX_AGE,
                message: "Age must be 150 or less",
            }),
        FieldRules::new(GENDER, "Gender")
            .rule(Rule::Required("Gender is required"))
            .rule(Rule::OneOf {
                options: GENDERS,
                message: "Gender must be male, female or other",
            }),
        FieldRules::new(PHONE, "Phone")
            .rule(Rule::Required("Phone number is required"))
            .rule(Rule::pattern(
                PHONE_PATTERN,
                "Please enter a valid 10-digit phone number",
            )),
        FieldRules::new(EMAIL, "Email")
            .rule(Rule::Required("Email is required"))
            .rule(Rule::pattern(
                EMAIL_PATTERN,
                "Please enter a valid email address",
            )),
        optional(ADDRESS, "Address"),
        FieldRules::new(BLOOD_TYPE, "Blood type").rule(Rule::OneOf {
            options: BLOOD_TYPES,
            message: "Please choose a valid blood type",
        }),
        optional(MEDICAL_HISTORY, "Medical history"),
        optional(CURRENT_MEDICATIONS, "Current medications"),
        optional(ALLERGIES, "Allergies"),
        optional(INSURANCE_INFO, "Insurance"),
        FieldRules::new(LAST_VISIT, "Last visit").rule(Rule::Date(DATE_MESSAGE)),
        FieldRules::new(NEXT_APPOINTMENT, "Next appointment").rule(Rule::Date(DATE_MESSAGE)),
        optional(EMERGENCY_NAME, "Emergency contact"),
        optional(EMERGENCY_RELATIONSHIP, "Relationship"),
        FieldRules::new(EMERGENCY_PHONE, "Emergency phone").rule(Rule::pattern(
            PHONE_PATTERN,
            "Please enter a valid 10-digit phone number",
        )),
        optional(NOTES, "Notes"),
    ])
});

pub static DOCTOR_SCHEMA: Lazy<FormSchema> = Lazy::new(|| {
    use doctor::*;
    FormSchema::new(vec![
        FieldRules::new(FIRST_NAME, "First name")
            .rule(Rule::Required("First name is required"))
            .rule(Rule::pattern(
                NO_DIGITS_PATTERN,
                "First name cannot contain numbers",
            )),
        FieldRules::new(LAST_NAME, "Last name")
            .rule(Rule::Required("Last name is required"))
            .rule(Rule::pattern(
                NO_DIGITS_PATTERN,
                "Last name cannot contain numbers",
            )),
        FieldRules::new(EMAIL, "Email")
            .rule(Rule::Required("Email is required"))
            .rule(Rule::pattern(EMAIL_PATTERN, "Invalid email address")),
        FieldRules::new(PHONE, "Phone")
            .rule(Rule::Required("Phone number is required"))
            .rule(Rule::pattern(
                PHONE_PATTERN,
                "Phone number must be 10 digits",
            )),
        FieldRules::new(GENDER, "Gender").rule(Rule::OneOf {
            options: GENDERS,
            message: "Gender must be male, female or other",
        }),
        optional(ADDRESS, "Address"),
        FieldRules::new(SPECIALIZATION, "Specialization")
            .rule(Rule::Required("Specialization is required"))
            .rule(Rule::OneOf {
                options: SPECIALIZATIONS,
                message: "Please choose a listed specialization",
            }),
        FieldRules::new(LICENSE_NUMBER, "License number")
            .rule(Rule::Required("License number is required"))
            .rule(Rule::pattern(
                LICENSE_PATTERN,
                "License number must be at least 6 characters",
            )),
        FieldRules::new(EXPERIENCE, "Years of experience")
            .rule(Rule::Required("Years of experience is required"))
            .rule(Rule::pattern(
                WHOLE_NUMBER_PATTERN,
                "Please enter a valid number",
            ))
            .rule(Rule::Max {
                value: MAX_EXPERIENCE,
                message: "Years of experience must be 80 or less",
            }),
        FieldRules::new(HOSPITAL, "Hospital").rule(Rule::Required("Hospital name is required")),
        optional(QUALIFICATIONS, "Qualifications"),
        optional(WORKING_DAYS, "Working days"),
        optional(WORKING_HOURS, "Working hours"),
        optional(LANGUAGES, "Languages"),
        optional(INSURANCE_ACCEPTED, "Insurance accepted"),
        optional(NOTES, "Notes"),
    ])
});

fn parse<T: FromStr>(values: &FormValues, field: &'static str) -> Result<T, ValidationErrors>
where
    T::Err: std::fmt::Display,
{
    let raw = values.get(field).unwrap_or("").trim();
    raw.parse()
        .map_err(|e: T::Err| ValidationErrors::single(field, e.to_string()))
}

fn parse_opt<T: FromStr>(
    values: &FormValues,
    field: &'static str,
) -> Result<Option<T>, ValidationErrors>
where
    T::Err: std::fmt::Display,
{
    match values.text(field) {
        Some(_) => parse(values, field).map(Some),
        None => Ok(None),
    }
}

fn required_text(values: &FormValues, field: &str) -> String {
    values.text(field).unwrap_or_default()
}

fn date_text(date: Option<chrono::NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientForm {
    pub values: FormValues,
}

impl PatientForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefills every field from a stored patient.
    pub fn from_record(p: &Patient) -> Self {
        use patient::*;
        let mut values = FormValues::new();
        values.set(FIRST_NAME, &p.first_name);
        values.set(LAST_NAME, &p.last_name);
        values.set(AGE, p.age.to_string());
        values.set(GENDER, p.gender.as_str());
        values.set(PHONE, &p.phone);
        values.set(EMAIL, &p.email);
        values.set_opt(ADDRESS, p.address.clone());
        values.set_opt(BLOOD_TYPE, p.blood_type.map(|b| b.as_str()));
        values.set_opt(MEDICAL_HISTORY, p.medical_history.clone());
        values.set_opt(CURRENT_MEDICATIONS, p.current_medications.clone());
        values.set_opt(ALLERGIES, p.allergies.clone());
        values.set_opt(INSURANCE_INFO, p.insurance_info.clone());
        values.set_opt(LAST_VISIT, date_text(p.last_visit));
        values.set_opt(NEXT_APPOINTMENT, date_text(p.next_appointment));
        if let Some(contact) = &p.emergency_contact {
            values.set(EMERGENCY_NAME, &contact.name);
            values.set(EMERGENCY_RELATIONSHIP, &contact.relationship);
            values.set(EMERGENCY_PHONE, &contact.phone);
        }
        values.set_opt(NOTES, p.notes.clone());
        Self { values }
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) -> &mut Self {
        self.values.set(field, value);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        PATIENT_SCHEMA.validate(&self.values)
    }

    pub fn into_draft(self) -> Result<PatientDraft, ValidationErrors> {
        use patient::*;
        self.validate()?;
        let v = &self.values;

        let emergency_contact = match (
            v.text(EMERGENCY_NAME),
            v.text(EMERGENCY_RELATIONSHIP),
            v.text(EMERGENCY_PHONE),
        ) {
            (None, None, None) => None,
            (name, relationship, phone) => Some(EmergencyContact {
                name: name.unwrap_or_default(),
                relationship: relationship.unwrap_or_default(),
                phone: phone.unwrap_or_default(),
            }),
        };

        Ok(PatientDraft {
            first_name: required_text(v, FIRST_NAME),
            last_name: required_text(v, LAST_NAME),
            age: parse(v, AGE)?,
            gender: parse::<Gender>(v, GENDER)?,
            phone: required_text(v, PHONE),
            email: required_text(v, EMAIL),
            address: v.text(ADDRESS),
            blood_type: parse_opt::<BloodType>(v, BLOOD_TYPE)?,
            medical_history: v.text(MEDICAL_HISTORY),
            current_medications: v.text(CURRENT_MEDICATIONS),
            allergies: v.text(ALLERGIES),
            insurance_info: v.text(INSURANCE_INFO),
            last_visit: parse_opt(v, LAST_VISIT)?,
            next_appointment: parse_opt(v, NEXT_APPOINTMENT)?,
            emergency_contact,
            notes: v.text(NOTES),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorForm {
    pub values: FormValues,
}

impl DoctorForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_record(d: &Doctor) -> Self {
        use doctor::*;
        let mut values = FormValues::new();
        values.set(FIRST_NAME, &d.first_name);
        values.set(LAST_NAME, &d.last_name);
        values.set(EMAIL, &d.email);
        values.set(PHONE, &d.phone);
        values.set_opt(GENDER, d.gender.map(|g| g.as_str()));
        values.set_opt(ADDRESS, d.address.clone());
        values.set(SPECIALIZATION, d.specialization.as_str());
        values.set(LICENSE_NUMBER, &d.license_number);
        values.set(EXPERIENCE, d.experience.to_string());
        values.set(HOSPITAL, &d.hospital);
        values.set_opt(QUALIFICATIONS, d.qualifications.clone());
        values.set_opt(WORKING_DAYS, d.working_days.clone());
        values.set_opt(WORKING_HOURS, d.working_hours.clone());
        values.set_opt(LANGUAGES, d.languages.clone());
        values.set_opt(INSURANCE_ACCEPTED, d.insurance_accepted.clone());
        values.set_opt(NOTES, d.notes.clone());
        Self { values }
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) -> &mut Self {
        self.values.set(field, value);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        DOCTOR_SCHEMA.validate(&self.values)
    }

    pub fn into_draft(self) -> Result<DoctorDraft, ValidationErrors> {
        use doctor::*;
        self.validate()?;
        let v = &self.values;

        Ok(DoctorDraft {
            first_name: required_text(v, FIRST_NAME),
            last_name: required_text(v, LAST_NAME),
            email: required_text(v, EMAIL),
            phone: required_text(v, PHONE),
            gender: parse_opt::<Gender>(v, GENDER)?,
            address: v.text(ADDRESS),
            specialization: parse::<Specialization>(v, SPECIALIZATION)?,
            license_number: required_text(v, LICENSE_NUMBER),
            experience: parse(v, EXPERIENCE)?,
            hospital: required_text(v, HOSPITAL),
            qualifications: v.text(QUALIFICATIONS),
            working_days: v.text(WORKING_DAYS),
            working_hours: v.text(WORKING_HOURS),
            languages: v.text(LANGUAGES),
            insurance_accepted: v.text(INSURANCE_ACCEPTED),
            notes: v.text(NOTES),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::seed;
    use chrono::Utc;

    fn valid_patient() -> PatientForm {
        let mut form = PatientForm::new();
        form.set(patient::FIRST_NAME, "Lena")
            .set(patient::LAST_NAME, "Ortiz")
            .set(patient::AGE, "38")
            .set(patient::GENDER, "female")
            .set(patient::PHONE, "5557654321")
            .set(patient::EMAIL, "lena.ortiz@clinic.example");
        form
    }

    fn valid_doctor() -> DoctorForm {
        let mut form = DoctorForm::new();
        form.set(doctor::FIRST_NAME, "Sam")
            .set(doctor::LAST_NAME, "Wu")
            .set(doctor::EMAIL, "sam.wu@h.example")
            .set(doctor::PHONE, "5550009999")
            .set(doctor::SPECIALIZATION, "general medicine")
            .set(doctor::LICENSE_NUMBER, "GEN12345")
            .set(doctor::EXPERIENCE, "9")
            .set(doctor::HOSPITAL, "Lakeside");
        form
    }

    #[test]
    fn valid_patient_binds_to_draft() {
        let mut form = valid_patient();
        form.set(patient::BLOOD_TYPE, "o+")
            .set(patient::NEXT_APPOINTMENT, "2024-06-01")
            .set(patient::ADDRESS, "  ");

        let draft = form.into_draft().unwrap();
        assert_eq!(draft.age, 38);
        assert_eq!(draft.gender, Gender::Female);
        assert_eq!(draft.blood_type, Some(BloodType::OPositive));
        assert_eq!(draft.address, None);
        assert_eq!(draft.emergency_contact, None);
    }

    #[test]
    fn nine_digit_phone_is_rejected_with_phone_message() {
        let mut form = valid_patient();
        form.set(patient::PHONE, "555765432");

        let errors = form.into_draft().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(patient::PHONE),
            Some("Please enter a valid 10-digit phone number")
        );
    }

    #[test]
    fn oversized_age_is_rejected_before_binding() {
        let mut form = valid_patient();
        form.set(patient::AGE, "99999999999");

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(patient::AGE), Some("Age must be 150 or less"));
        assert_eq!(form.into_draft().unwrap_err(), errors);
    }

    #[test]
    fn oversized_experience_is_rejected_before_binding() {
        let mut form = valid_doctor();
        form.set(doctor::EXPERIENCE, "123456789012345678901234");

        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(doctor::EXPERIENCE),
            Some("Years of experience must be 80 or less")
        );
        assert_eq!(form.into_draft().unwrap_err(), errors);
    }

    #[test]
    fn empty_patient_form_lists_every_required_field() {
        let errors = PatientForm::new().validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["firstName", "lastName", "age", "gender", "phone", "email"]
        );
    }

    #[test]
    fn negative_age_and_bad_email_are_reported() {
        let mut form = valid_patient();
        form.set(patient::AGE, "-1").set(patient::EMAIL, "nobody@nowhere");

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(patient::AGE), Some("Age must be positive"));
        assert_eq!(
            errors.get(patient::EMAIL),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn email_pattern_ignores_case() {
        let mut form = valid_patient();
        form.set(patient::EMAIL, "LENA@CLINIC.ORG");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn partial_emergency_contact_is_kept() {
        let mut form = valid_patient();
        form.set(patient::EMERGENCY_NAME, "Rob Ortiz");
        let draft = form.into_draft().unwrap();
        let contact = draft.emergency_contact.unwrap();
        assert_eq!(contact.name, "Rob Ortiz");
        assert_eq!(contact.phone, "");
    }

    #[test]
    fn emergency_phone_must_be_ten_digits_when_given() {
        let mut form = valid_patient();
        form.set(patient::EMERGENCY_PHONE, "12345");
        assert!(form.validate().is_err());
    }

    #[test]
    fn patient_prefill_round_trips_through_the_form() {
        let stored = &seed::patients()[0];
        let draft = PatientForm::from_record(stored).into_draft().unwrap();
        assert_eq!(draft, PatientDraft::from(stored));
    }

    #[test]
    fn valid_doctor_binds_to_draft() {
        let draft = valid_doctor().into_draft().unwrap();
        assert_eq!(draft.specialization, Specialization::GeneralMedicine);
        assert_eq!(draft.experience, 9);
        assert_eq!(draft.gender, None);
    }

    #[test]
    fn doctor_names_cannot_contain_digits() {
        let mut form = valid_doctor();
        form.set(doctor::FIRST_NAME, "R2D2");
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.get(doctor::FIRST_NAME),
            Some("First name cannot contain numbers")
        );
    }

    #[test]
    fn license_needs_six_upper_alphanumerics() {
        let mut form = valid_doctor();
        form.set(doctor::LICENSE_NUMBER, "ab12");
        assert_eq!(
            form.validate().unwrap_err().get(doctor::LICENSE_NUMBER),
            Some("License number must be at least 6 characters")
        );
    }

    #[test]
    fn experience_must_be_whole_number() {
        let mut form = valid_doctor();
        form.set(doctor::EXPERIENCE, "4.5");
        assert_eq!(
            form.validate().unwrap_err().get(doctor::EXPERIENCE),
            Some("Please enter a valid number")
        );
    }

    #[test]
    fn doctor_prefill_round_trips_through_the_form() {
        for stored in seed::doctors() {
            let draft = DoctorForm::from_record(&stored).into_draft().unwrap();
            let rebuilt = Doctor::build(stored.id, draft, Utc::now());
            assert_eq!(rebuilt.license_number, stored.license_number);
            assert_eq!(rebuilt.specialization, stored.specialization);
        }
    }
}

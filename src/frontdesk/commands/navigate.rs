use super::{doctors, form_fields, patients, summary, CmdResult};
use crate::error::Result;
use crate::forms::{PatientForm, DOCTOR_SCHEMA, PATIENT_SCHEMA};
use crate::routes::View;
use crate::store::records::{DoctorStore, PatientStore};
use crate::store::Storage;
use crate::validation::FormValues;
use chrono::NaiveDate;

/// Resolves `path` and fills the result with what that view shows.
///
/// List views start on page 1. A details or edit path whose id is not stored
/// is a `NotFound` error.
pub fn open<S: Storage>(
    path: &str,
    patient_store: &PatientStore<S>,
    doctor_store: &DoctorStore<S>,
    per_page: usize,
    today: NaiveDate,
) -> Result<CmdResult> {
    let view = View::resolve(path);
    let result = match view {
        View::Landing => summary::run(patient_store.list(), doctor_store.list(), today),
        View::Patients => patients::list(patient_store, 1, per_page),
        View::Doctors => doctors::list(doctor_store, 1, per_page),
        View::PatientDetails(id) => patients::show(patient_store, id)?,
        View::DoctorDetails(id) => doctors::show(doctor_store, id)?,
        View::AddPatient => CmdResult::default()
            .with_view(view)
            .with_form(form_fields(&PATIENT_SCHEMA, &FormValues::new())),
        View::DoctorRegistration => CmdResult::default()
            .with_view(view)
            .with_form(form_fields(&DOCTOR_SCHEMA, &FormValues::new())),
        View::EditPatient(id) => {
            let patient = patient_store.get(id)?;
            let form = PatientForm::from_record(patient);
            CmdResult::default()
                .with_view(view)
                .with_form(form_fields(&PATIENT_SCHEMA, &form.values))
                .with_patients(vec![patient.clone()])
        }
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrontdeskError;
    use crate::forms::patient as field;
    use crate::seed;
    use crate::store::ids::IdPolicy;
    use crate::store::memory::InMemoryStorage;
    use crate::store::records::RecordStore;
    use crate::store::{DOCTORS_KEY, PATIENTS_KEY};

    fn stores() -> (PatientStore<InMemoryStorage>, DoctorStore<InMemoryStorage>) {
        let storage = InMemoryStorage::new();
        (
            RecordStore::open(
                storage.clone(),
                PATIENTS_KEY,
                IdPolicy::Renumber,
                seed::patients,
            ),
            RecordStore::open(storage, DOCTORS_KEY, IdPolicy::Stable, seed::doctors),
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    #[test]
    fn unknown_path_lands_on_summary() {
        let (p, d) = stores();
        let result = open("/billing", &p, &d, 10, today()).unwrap();
        assert_eq!(result.view, Some(View::Landing));
        assert_eq!(result.summary.unwrap().patients, 3);
    }

    #[test]
    fn list_path_returns_first_page() {
        let (p, d) = stores();
        let result = open("/doctors", &p, &d, 2, today()).unwrap();
        assert_eq!(result.doctors.len(), 2);
        assert_eq!(result.page.unwrap().page, 1);
    }

    #[test]
    fn edit_path_prefills_form() {
        let (p, d) = stores();
        let result = open("/add-patient/2", &p, &d, 10, today()).unwrap();
        assert_eq!(result.view, Some(View::EditPatient(2)));
        let first = result
            .form
            .iter()
            .find(|f| f.name == field::FIRST_NAME)
            .unwrap();
        assert_eq!(first.value.as_deref(), Some("Sara"));
    }

    #[test]
    fn add_path_has_blank_form() {
        let (p, d) = stores();
        let result = open("/add-patient", &p, &d, 10, today()).unwrap();
        assert_eq!(result.form.len(), PATIENT_SCHEMA.fields().len());
        assert!(result.form.iter().all(|f| f.value.is_none()));
    }

    #[test]
    fn details_for_missing_id_is_not_found() {
        let (p, d) = stores();
        assert!(matches!(
            open("/doctor-details/42", &p, &d, 10, today()),
            Err(FrontdeskError::NotFound { id: 42, .. })
        ));
    }
}

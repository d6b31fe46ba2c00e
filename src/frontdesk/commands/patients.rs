use super::{paginate, unsaved_warning, CmdMessage, CmdResult};
use crate::error::Result;
use crate::forms::PatientForm;
use crate::model::{Patient, Record};
use crate::routes::View;
use crate::store::ids::IdPolicy;
use crate::store::records::PatientStore;
use crate::store::Storage;
use crate::validation::FormValues;

pub fn list<S: Storage>(store: &PatientStore<S>, page: usize, per_page: usize) -> CmdResult {
    let (patients, info) = paginate(store.list(), page, per_page);
    CmdResult::default()
        .with_view(View::Patients)
        .with_patients(patients)
        .with_page(info)
}

pub fn search<S: Storage>(store: &PatientStore<S>, term: &str) -> CmdResult {
    let found: Vec<Patient> = store.search(term).into_iter().cloned().collect();
    let mut result = CmdResult::default().with_view(View::Patients);
    if found.is_empty() {
        result.add_message(CmdMessage::info(format!("No patients match '{}'.", term)));
    }
    result.with_patients(found)
}

pub fn show<S: Storage>(store: &PatientStore<S>, id: u32) -> Result<CmdResult> {
    let patient = store.get(id)?.clone();
    Ok(CmdResult::default()
        .with_view(View::PatientDetails(id))
        .with_patients(vec![patient]))
}

pub fn add<S: Storage>(store: &mut PatientStore<S>, form: PatientForm) -> Result<CmdResult> {
    let draft = form.into_draft()?;
    let patient = store.add(draft);

    let mut result = CmdResult::default().with_view(View::PatientDetails(patient.id));
    result.add_message(CmdMessage::success(format!(
        "Patient added (#{}): {}",
        patient.id,
        patient.full_name()
    )));
    if store.is_dirty() {
        result.add_message(unsaved_warning());
    }
    Ok(result.with_patients(vec![patient]))
}

/// Prefills the form from the stored patient, applies `changes`, and saves.
pub fn edit<S: Storage>(
    store: &mut PatientStore<S>,
    id: u32,
    changes: &FormValues,
) -> Result<CmdResult> {
    let mut form = PatientForm::from_record(store.get(id)?);
    for field in crate::forms::PATIENT_SCHEMA.fields() {
        if let Some(value) = changes.get(field.name) {
            form.set(field.name, value);
        }
    }
    let draft = form.into_draft()?;
    let patient = store.update(id, draft)?;

    let mut result = CmdResult::default().with_view(View::PatientDetails(id));
    result.add_message(CmdMessage::success(format!(
        "Patient updated (#{}): {}",
        patient.id,
        patient.full_name()
    )));
    if store.is_dirty() {
        result.add_message(unsaved_warning());
    }
    Ok(result.with_patients(vec![patient]))
}

pub fn delete<S: Storage>(store: &mut PatientStore<S>, id: u32) -> Result<CmdResult> {
    let removed = store.remove(id)?;

    let mut result = CmdResult::default().with_view(View::Patients);
    result.add_message(CmdMessage::success(format!(
        "Patient deleted (#{}): {}",
        id,
        removed.full_name()
    )));
    if store.policy() == IdPolicy::Renumber && !store.is_empty() && id as usize <= store.len() {
        result.add_message(CmdMessage::info(format!(
            "Patient ids renumbered 1-{}.",
            store.len()
        )));
    }
    if store.is_dirty() {
        result.add_message(unsaved_warning());
    }
    Ok(result.with_patients(vec![removed]))
}

pub fn reset<S: Storage>(store: &mut PatientStore<S>) -> CmdResult {
    store.reset();
    let mut result = CmdResult::default().with_view(View::Patients);
    result.add_message(CmdMessage::success(format!(
        "Patient data cleared; {} sample patients restored.",
        store.len()
    )));
    if store.is_dirty() {
        result.add_message(unsaved_warning());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::FrontdeskError;
    use crate::forms::patient as field;
    use crate::store::memory::InMemoryStorage;
    use crate::store::records::RecordStore;
    use crate::store::PATIENTS_KEY;

    fn store() -> PatientStore<InMemoryStorage> {
        RecordStore::open(
            InMemoryStorage::new(),
            PATIENTS_KEY,
            IdPolicy::Renumber,
            Vec::new,
        )
    }

    fn form(first: &str, phone: &str) -> PatientForm {
        let mut form = PatientForm::new();
        form.set(field::FIRST_NAME, first)
            .set(field::LAST_NAME, "Ng")
            .set(field::AGE, "50")
            .set(field::GENDER, "male")
            .set(field::PHONE, phone)
            .set(field::EMAIL, "x@y.io");
        form
    }

    #[test]
    fn invalid_form_never_reaches_the_store() {
        let mut store = store();
        let err = add(&mut store, form("Bad", "123456789")).unwrap_err();
        match err {
            FrontdeskError::Validation(errors) => assert_eq!(
                errors.get(field::PHONE),
                Some("Please enter a valid 10-digit phone number")
            ),
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn add_then_show() {
        let mut store = store();
        let result = add(&mut store, form("Ok", "5551234567")).unwrap();
        assert_eq!(result.view, Some(View::PatientDetails(1)));

        let shown = show(&store, 1).unwrap();
        assert_eq!(shown.patients[0].first_name, "Ok");
    }

    #[test]
    fn edit_applies_only_given_changes() {
        let mut store = store();
        add(&mut store, form("Before", "5551234567")).unwrap();

        let changes = FormValues::new().with(field::FIRST_NAME, "After");
        let result = edit(&mut store, 1, &changes).unwrap();

        let patient = &result.patients[0];
        assert_eq!(patient.first_name, "After");
        assert_eq!(patient.phone, "5551234567");
    }

    #[test]
    fn edit_rejects_invalid_change_and_keeps_record() {
        let mut store = store();
        add(&mut store, form("Keep", "5551234567")).unwrap();

        let changes = FormValues::new().with(field::EMAIL, "not-an-email");
        assert!(edit(&mut store, 1, &changes).is_err());
        assert_eq!(store.get(1).unwrap().email, "x@y.io");
    }

    #[test]
    fn delete_reports_renumbering() {
        let mut store = store();
        add(&mut store, form("A", "5551234567")).unwrap();
        add(&mut store, form("B", "5551234567")).unwrap();

        let result = delete(&mut store, 1).unwrap();
        assert_eq!(result.messages.len(), 2);
        assert_eq!(store.get(1).unwrap().first_name, "B");
    }

    #[test]
    fn show_missing_is_not_found() {
        let store = store();
        assert!(matches!(
            show(&store, 4),
            Err(FrontdeskError::NotFound { id: 4, .. })
        ));
    }

    #[test]
    fn failed_write_is_reported_as_warning() {
        let storage = InMemoryStorage::new();
        let mut store: PatientStore<_> =
            RecordStore::open(storage.clone(), PATIENTS_KEY, IdPolicy::Renumber, Vec::new);
        storage.fail_writes(true);

        let result = add(&mut store, form("A", "5551234567")).unwrap();
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn failed_reset_is_reported_as_warning() {
        let storage = InMemoryStorage::new();
        let mut store: PatientStore<_> =
            RecordStore::open(storage.clone(), PATIENTS_KEY, IdPolicy::Renumber, Vec::new);
        add(&mut store, form("A", "5551234567")).unwrap();
        storage.fail_writes(true);

        let result = reset(&mut store);
        assert!(store.is_dirty());
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning));
    }
}

use super::{paginate, unsaved_warning, CmdMessage, CmdResult};
use crate::error::Result;
use crate::forms::{DoctorForm, DOCTOR_SCHEMA};
use crate::model::{Doctor, DoctorStatus, Record};
use crate::routes::View;
use crate::store::records::DoctorStore;
use crate::store::Storage;
use crate::validation::FormValues;

pub fn list<S: Storage>(store: &DoctorStore<S>, page: usize, per_page: usize) -> CmdResult {
    let (doctors, info) = paginate(store.list(), page, per_page);
    CmdResult::default()
        .with_view(View::Doctors)
        .with_doctors(doctors)
        .with_page(info)
}

pub fn search<S: Storage>(store: &DoctorStore<S>, term: &str) -> CmdResult {
    let found: Vec<Doctor> = store.search(term).into_iter().cloned().collect();
    let mut result = CmdResult::default().with_view(View::Doctors);
    if found.is_empty() {
        result.add_message(CmdMessage::info(format!("No doctors match '{}'.", term)));
    }
    result.with_doctors(found)
}

pub fn show<S: Storage>(store: &DoctorStore<S>, id: u32) -> Result<CmdResult> {
    let doctor = store.get(id)?.clone();
    Ok(CmdResult::default()
        .with_view(View::DoctorDetails(id))
        .with_doctors(vec![doctor]))
}

pub fn register<S: Storage>(store: &mut DoctorStore<S>, form: DoctorForm) -> Result<CmdResult> {
    let draft = form.into_draft()?;
    let doctor = store.add(draft);

    let mut result = CmdResult::default().with_view(View::DoctorDetails(doctor.id));
    result.add_message(CmdMessage::success(format!(
        "Doctor registered (#{}): {}",
        doctor.id,
        doctor.full_name()
    )));
    if store.is_dirty() {
        result.add_message(unsaved_warning());
    }
    Ok(result.with_doctors(vec![doctor]))
}

pub fn edit<S: Storage>(
    store: &mut DoctorStore<S>,
    id: u32,
    changes: &FormValues,
) -> Result<CmdResult> {
    let mut form = DoctorForm::from_record(store.get(id)?);
    for field in DOCTOR_SCHEMA.fields() {
        if let Some(value) = changes.get(field.name) {
            form.set(field.name, value);
        }
    }
    let draft = form.into_draft()?;
    let doctor = store.update(id, draft)?;

    let mut result = CmdResult::default().with_view(View::DoctorDetails(id));
    result.add_message(CmdMessage::success(format!(
        "Doctor updated (#{}): {}",
        doctor.id,
        doctor.full_name()
    )));
    if store.is_dirty() {
        result.add_message(unsaved_warning());
    }
    Ok(result.with_doctors(vec![doctor]))
}

pub fn set_status<S: Storage>(
    store: &mut DoctorStore<S>,
    id: u32,
    status: DoctorStatus,
) -> Result<CmdResult> {
    let current = store.get(id)?.status;
    let mut result = CmdResult::default().with_view(View::DoctorDetails(id));
    if current == status {
        result.add_message(CmdMessage::info(format!(
            "Doctor #{} is already {}.",
            id, status
        )));
        return Ok(result.with_doctors(vec![store.get(id)?.clone()]));
    }

    let doctor = store.set_status(id, status)?;
    result.add_message(CmdMessage::success(format!(
        "{} marked {}.",
        doctor.full_name(),
        status
    )));
    if store.is_dirty() {
        result.add_message(unsaved_warning());
    }
    Ok(result.with_doctors(vec![doctor]))
}

pub fn delete<S: Storage>(store: &mut DoctorStore<S>, id: u32) -> Result<CmdResult> {
    let removed = store.remove(id)?;

    let mut result = CmdResult::default().with_view(View::Doctors);
    result.add_message(CmdMessage::success(format!(
        "Doctor deleted (#{}): {}",
        id,
        removed.full_name()
    )));
    if store.is_dirty() {
        result.add_message(unsaved_warning());
    }
    Ok(result.with_doctors(vec![removed]))
}

pub fn reset<S: Storage>(store: &mut DoctorStore<S>) -> CmdResult {
    store.reset();
    let mut result = CmdResult::default().with_view(View::Doctors);
    result.add_message(CmdMessage::success(format!(
        "Doctor data cleared; {} sample doctors restored.",
        store.len()
    )));
    if store.is_dirty() {
        result.add_message(unsaved_warning());
    }
    result
}

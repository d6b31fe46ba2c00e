//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point for all front-office operations, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the command function for each operation
//! - **Normalizes inputs** (page numbers, form values from flags)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no stdout/stderr output and no formatting. Business rules live in
//! `commands/*.rs`; persistence lives behind [`Storage`].
//!
//! ## Generic Over Storage
//!
//! `FrontDesk<S: Storage>` is generic over the storage backend:
//! - Production: `FrontDesk<FileStorage>`
//! - Testing: `FrontDesk<InMemoryStorage>`

use crate::commands;
use crate::config::FrontdeskConfig;
use crate::error::{FrontdeskError, Result};
use crate::forms::{DoctorForm, PatientForm};
use crate::model::{Doctor, DoctorStatus, Patient};
use crate::seed;
use crate::store::records::{DoctorStore, PatientStore, RecordStore};
use crate::store::{Storage, DOCTORS_KEY, PATIENTS_KEY};
use crate::validation::FormValues;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// The front-office facade: one patient store and one doctor store over a
/// shared storage handle.
pub struct FrontDesk<S: Storage> {
    patients: PatientStore<S>,
    doctors: DoctorStore<S>,
    config: FrontdeskConfig,
    data_dir: Option<PathBuf>,
}

impl<S: Storage + Clone> FrontDesk<S> {
    /// Opens both stores, seeding them when nothing is stored and the config
    /// allows it.
    pub fn new(storage: S, config: FrontdeskConfig) -> Self {
        let patient_seed: fn() -> Vec<Patient> = if config.seed_on_empty {
            seed::patients
        } else {
            Vec::new
        };
        let doctor_seed: fn() -> Vec<Doctor> = if config.seed_on_empty {
            seed::doctors
        } else {
            Vec::new
        };

        let patients = RecordStore::open(
            storage.clone(),
            PATIENTS_KEY,
            config.patient_ids,
            patient_seed,
        );
        let doctors = RecordStore::open(storage, DOCTORS_KEY, config.doctor_ids, doctor_seed);

        Self {
            patients,
            doctors,
            config,
            data_dir: None,
        }
    }
}

impl<S: Storage> FrontDesk<S> {
    /// Directory holding `config.json`. Without one, `config` operations fail.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    pub fn settings(&self) -> &FrontdeskConfig {
        &self.config
    }

    pub fn patient_store(&self) -> &PatientStore<S> {
        &self.patients
    }

    pub fn doctor_store(&self) -> &DoctorStore<S> {
        &self.doctors
    }

    pub fn summary(&self) -> commands::CmdResult {
        commands::summary::run(self.patients.list(), self.doctors.list(), today())
    }

    pub fn open(&self, path: &str) -> Result<commands::CmdResult> {
        commands::navigate::open(
            path,
            &self.patients,
            &self.doctors,
            self.config.page_size(),
            today(),
        )
    }

    // Patients

    pub fn list_patients(&self, page: usize) -> commands::CmdResult {
        commands::patients::list(&self.patients, page, self.config.page_size())
    }

    pub fn search_patients(&self, term: &str) -> commands::CmdResult {
        commands::patients::search(&self.patients, term)
    }

    pub fn show_patient(&self, id: u32) -> Result<commands::CmdResult> {
        commands::patients::show(&self.patients, id)
    }

    pub fn add_patient(&mut self, values: FormValues) -> Result<commands::CmdResult> {
        commands::patients::add(&mut self.patients, PatientForm { values })
    }

    pub fn edit_patient(&mut self, id: u32, changes: &FormValues) -> Result<commands::CmdResult> {
        commands::patients::edit(&mut self.patients, id, changes)
    }

    pub fn delete_patient(&mut self, id: u32) -> Result<commands::CmdResult> {
        commands::patients::delete(&mut self.patients, id)
    }

    pub fn reset_patients(&mut self) -> commands::CmdResult {
        commands::patients::reset(&mut self.patients)
    }

    // Doctors

    pub fn list_doctors(&self, page: usize) -> commands::CmdResult {
        commands::doctors::list(&self.doctors, page, self.config.page_size())
    }

    pub fn search_doctors(&self, term: &str) -> commands::CmdResult {
        commands::doctors::search(&self.doctors, term)
    }

    pub fn show_doctor(&self, id: u32) -> Result<commands::CmdResult> {
        commands::doctors::show(&self.doctors, id)
    }

    pub fn register_doctor(&mut self, values: FormValues) -> Result<commands::CmdResult> {
        commands::doctors::register(&mut self.doctors, DoctorForm { values })
    }

    pub fn edit_doctor(&mut self, id: u32, changes: &FormValues) -> Result<commands::CmdResult> {
        commands::doctors::edit(&mut self.doctors, id, changes)
    }

    pub fn set_doctor_status(
        &mut self,
        id: u32,
        status: DoctorStatus,
    ) -> Result<commands::CmdResult> {
        commands::doctors::set_status(&mut self.doctors, id, status)
    }

    pub fn delete_doctor(&mut self, id: u32) -> Result<commands::CmdResult> {
        commands::doctors::delete(&mut self.doctors, id)
    }

    pub fn reset_doctors(&mut self) -> commands::CmdResult {
        commands::doctors::reset(&mut self.doctors)
    }

    /// Retries writing both collections.
    pub fn save(&mut self) -> Result<()> {
        self.patients.save()?;
        self.doctors.save()
    }

    pub fn is_dirty(&self) -> bool {
        self.patients.is_dirty() || self.doctors.is_dirty()
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let dir = self
            .data_dir
            .clone()
            .ok_or_else(|| FrontdeskError::Api("No data directory configured".to_string()))?;
        let result = commands::config::run(&dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, FormField, MessageLevel, PageInfo, Summary};

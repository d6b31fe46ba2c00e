use clap::{Args, Parser, Subcommand};
use frontdesk::forms::{doctor, patient};
use frontdesk::validation::FormValues;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "frontdesk", bin_name = "frontdesk", version)]
#[command(about = "Hospital front-office records for patients and doctors", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the record files and config.json
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage patient records
    #[command(subcommand, alias = "p", display_order = 1)]
    Patients(PatientCommands),

    /// Manage doctor records
    #[command(subcommand, alias = "d", display_order = 2)]
    Doctors(DoctorCommands),

    /// Show the screen for a path such as /patient-details/3
    #[command(display_order = 3)]
    Open { path: String },

    /// Get or set configuration
    #[command(display_order = 4)]
    Config {
        /// Configuration key (patient-ids, doctor-ids, rows-per-page, seed-on-empty)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PatientCommands {
    /// List patients
    #[command(alias = "ls")]
    List {
        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show one patient
    #[command(alias = "v")]
    Show { id: u32 },

    /// Add a patient
    #[command(alias = "n")]
    Add(PatientFields),

    /// Change fields of an existing patient
    #[command(alias = "e")]
    Edit {
        id: u32,

        #[command(flatten)]
        fields: PatientFields,
    },

    /// Delete a patient (remaining ids are renumbered under the renumber policy)
    #[command(alias = "rm")]
    Delete {
        id: u32,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Search by name, phone or email
    Search {
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Clear stored patients and restore the sample records
    Reset {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DoctorCommands {
    /// List doctors
    #[command(alias = "ls")]
    List {
        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show one doctor
    #[command(alias = "v")]
    Show { id: u32 },

    /// Register a doctor
    #[command(alias = "n")]
    Add(DoctorFields),

    /// Change fields of an existing doctor
    #[command(alias = "e")]
    Edit {
        id: u32,

        #[command(flatten)]
        fields: DoctorFields,
    },

    /// Delete a doctor
    #[command(alias = "rm")]
    Delete {
        id: u32,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Search by name, specialization, phone or email
    Search {
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Mark a doctor active
    Activate { id: u32 },

    /// Mark a doctor inactive
    Deactivate { id: u32 },

    /// Clear stored doctors and restore the sample records
    Reset {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Patient form fields as flags. Only the flags given are set.
#[derive(Args, Debug, Default)]
pub struct PatientFields {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub age: Option<String>,
    /// male, female or other
    #[arg(long)]
    pub gender: Option<String>,
    /// 10 digits
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    /// A+, A-, B+, B-, AB+, AB-, O+ or O-
    #[arg(long)]
    pub blood_type: Option<String>,
    #[arg(long)]
    pub medical_history: Option<String>,
    #[arg(long)]
    pub current_medications: Option<String>,
    #[arg(long)]
    pub allergies: Option<String>,
    #[arg(long)]
    pub insurance_info: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub last_visit: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub next_appointment: Option<String>,
    #[arg(long)]
    pub emergency_name: Option<String>,
    #[arg(long)]
    pub emergency_relationship: Option<String>,
    #[arg(long)]
    pub emergency_phone: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl PatientFields {
    pub fn into_values(self) -> FormValues {
        let mut values = FormValues::new();
        values.set_opt(patient::FIRST_NAME, self.first_name);
        values.set_opt(patient::LAST_NAME, self.last_name);
        values.set_opt(patient::AGE, self.age);
        values.set_opt(patient::GENDER, self.gender);
        values.set_opt(patient::PHONE, self.phone);
        values.set_opt(patient::EMAIL, self.email);
        values.set_opt(patient::ADDRESS, self.address);
        values.set_opt(patient::BLOOD_TYPE, self.blood_type);
        values.set_opt(patient::MEDICAL_HISTORY, self.medical_history);
        values.set_opt(patient::CURRENT_MEDICATIONS, self.current_medications);
        values.set_opt(patient::ALLERGIES, self.allergies);
        values.set_opt(patient::INSURANCE_INFO, self.insurance_info);
        values.set_opt(patient::LAST_VISIT, self.last_visit);
        values.set_opt(patient::NEXT_APPOINTMENT, self.next_appointment);
        values.set_opt(patient::EMERGENCY_NAME, self.emergency_name);
        values.set_opt(patient::EMERGENCY_RELATIONSHIP, self.emergency_relationship);
        values.set_opt(patient::EMERGENCY_PHONE, self.emergency_phone);
        values.set_opt(patient::NOTES, self.notes);
        values
    }
}

/// Doctor form fields as flags. Only the flags given are set.
#[derive(Args, Debug, Default)]
pub struct DoctorFields {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// 10 digits
    #[arg(long)]
    pub phone: Option<String>,
    /// male, female or other
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    /// e.g. Cardiology, "General Medicine"
    #[arg(long)]
    pub specialization: Option<String>,
    /// At least 6 uppercase letters or digits
    #[arg(long)]
    pub license_number: Option<String>,
    /// Years of experience
    #[arg(long)]
    pub experience: Option<String>,
    #[arg(long)]
    pub hospital: Option<String>,
    #[arg(long)]
    pub qualifications: Option<String>,
    #[arg(long)]
    pub working_days: Option<String>,
    #[arg(long)]
    pub working_hours: Option<String>,
    #[arg(long)]
    pub languages: Option<String>,
    #[arg(long)]
    pub insurance_accepted: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl DoctorFields {
    pub fn into_values(self) -> FormValues {
        let mut values = FormValues::new();
        values.set_opt(doctor::FIRST_NAME, self.first_name);
        values.set_opt(doctor::LAST_NAME, self.last_name);
        values.set_opt(doctor::EMAIL, self.email);
        values.set_opt(doctor::PHONE, self.phone);
        values.set_opt(doctor::GENDER, self.gender);
        values.set_opt(doctor::ADDRESS, self.address);
        values.set_opt(doctor::SPECIALIZATION, self.specialization);
        values.set_opt(doctor::LICENSE_NUMBER, self.license_number);
        values.set_opt(doctor::EXPERIENCE, self.experience);
        values.set_opt(doctor::HOSPITAL, self.hospital);
        values.set_opt(doctor::QUALIFICATIONS, self.qualifications);
        values.set_opt(doctor::WORKING_DAYS, self.working_days);
        values.set_opt(doctor::WORKING_HOURS, self.working_hours);
        values.set_opt(doctor::LANGUAGES, self.languages);
        values.set_opt(doctor::INSURANCE_ACCEPTED, self.insurance_accepted);
        values.set_opt(doctor::NOTES, self.notes);
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_naked_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["frontdesk"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["frontdesk", "patients", "list", "--data-dir", "/tmp/x", "-v"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn test_patient_flags_map_to_form_fields() {
        let cli = Cli::try_parse_from([
            "frontdesk",
            "patients",
            "add",
            "--first-name",
            "Ana",
            "--emergency-phone",
            "5550001111",
        ])
        .unwrap();
        let Some(Commands::Patients(PatientCommands::Add(fields))) = cli.command else {
            panic!("expected patients add");
        };
        let values = fields.into_values();
        assert_eq!(values.get(patient::FIRST_NAME), Some("Ana"));
        assert_eq!(values.get(patient::EMERGENCY_PHONE), Some("5550001111"));
        assert_eq!(values.get(patient::LAST_NAME), None);
    }

    #[test]
    fn test_edit_takes_id_and_fields() {
        let cli =
            Cli::try_parse_from(["frontdesk", "doctors", "edit", "2", "--hospital", "Eastgate"])
                .unwrap();
        let Some(Commands::Doctors(DoctorCommands::Edit { id, fields })) = cli.command else {
            panic!("expected doctors edit");
        };
        assert_eq!(id, 2);
        assert_eq!(
            fields.into_values().get(doctor::HOSPITAL),
            Some("Eastgate")
        );
    }
}

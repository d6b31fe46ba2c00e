//! # Rendering Module
//!
//! Styled terminal output from the templates in `templates/`, with automatic
//! terminal color detection.
//!
//! Layout calculations (width, truncation, padding) stay in Rust because they
//! need Unicode-aware processing. Templates pick styles by semantic name and
//! arrange lines.

use super::styles::{names, FRONTDESK_THEME};
use super::templates;
use chrono::{DateTime, Utc};
use console::Term;
use frontdesk::api::{CmdMessage, CmdResult, FormField, MessageLevel, PageInfo, Summary};
use frontdesk::config::{FrontdeskConfig, CONFIG_KEYS};
use frontdesk::forms::{DOCTOR_SCHEMA, PATIENT_SCHEMA};
use frontdesk::model::{Doctor, DoctorStatus, Patient, Record, RecordKind};
use frontdesk::routes::View;
use frontdesk::validation::ValidationErrors;
use minijinja::{Environment, Error, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 16;
const ID_WIDTH: usize = 6;
const NAME_WIDTH: usize = 28;
const STATUS_WIDTH: usize = 12;
const DETAILS_WIDTH: usize = LINE_WIDTH - ID_WIDTH - NAME_WIDTH - STATUS_WIDTH - TIME_WIDTH;
const LABEL_WIDTH: usize = 24;

#[derive(Serialize)]
struct ListRow {
    id: String,
    name: String,
    details: String,
    status: String,
    status_style: &'static str,
    updated: String,
}

#[derive(Serialize)]
struct ListData {
    header: String,
    rows: Vec<ListRow>,
    footer: String,
    empty_message: String,
}

#[derive(Serialize)]
struct DetailRow {
    label: String,
    value: String,
}

#[derive(Serialize)]
struct DetailSection {
    heading: &'static str,
    rows: Vec<DetailRow>,
}

#[derive(Serialize)]
struct DetailsData {
    title: String,
    status: String,
    status_style: &'static str,
    subtitle: String,
    sections: Vec<DetailSection>,
    updated: String,
}

#[derive(Serialize)]
struct Stat {
    label: String,
    value: usize,
}

#[derive(Serialize)]
struct SummaryData {
    title: &'static str,
    stats: Vec<Stat>,
    hints: Vec<&'static str>,
}

#[derive(Serialize)]
struct FormLine {
    label: String,
    marker: &'static str,
    value: String,
}

#[derive(Serialize)]
struct FormData {
    title: String,
    fields: Vec<FormLine>,
    hint: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
}

#[derive(Serialize)]
struct ConfigData {
    entries: Vec<ConfigEntry>,
}

#[derive(Serialize)]
struct NotFoundData {
    title: String,
    hint: String,
}

#[derive(Serialize)]
struct ValidationLine {
    label: String,
    message: String,
}

#[derive(Serialize)]
struct ValidationData {
    title: &'static str,
    errors: Vec<ValidationLine>,
}

/// Renders whatever view a command result points at, followed by its messages.
pub fn render_view(result: &CmdResult) -> String {
    render_view_internal(result, use_color())
}

fn render_view_internal(result: &CmdResult, color: bool) -> String {
    let mut output = match result.view {
        Some(View::Landing) => result
            .summary
            .as_ref()
            .map(|s| render_template("summary", &summary_data(s), color))
            .unwrap_or_default(),
        Some(View::Patients) => render_template(
            "list",
            &patient_list_data(&result.patients, result.page.as_ref()),
            color,
        ),
        Some(View::Doctors) => render_template(
            "list",
            &doctor_list_data(&result.doctors, result.page.as_ref()),
            color,
        ),
        Some(View::PatientDetails(_)) => result
            .patients
            .first()
            .map(|p| render_template("details", &patient_details_data(p), color))
            .unwrap_or_default(),
        Some(View::DoctorDetails(_)) => result
            .doctors
            .first()
            .map(|d| render_template("details", &doctor_details_data(d), color))
            .unwrap_or_default(),
        Some(view @ (View::AddPatient | View::EditPatient(_) | View::DoctorRegistration)) => {
            render_template("form", &form_data(view, &result.form), color)
        }
        None => result
            .config
            .as_ref()
            .map(|c| render_template("config", &config_data(c), color))
            .unwrap_or_default(),
    };
    output.push_str(&render_template(
        "messages",
        &messages_data(&result.messages),
        color,
    ));
    output
}

/// Renders command messages using the template system with themed styles.
pub fn render_messages(messages: &[CmdMessage]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    render_template("messages", &messages_data(messages), use_color())
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

pub fn render_not_found(kind: RecordKind, id: u32) -> String {
    render_template("not_found", &not_found_data(kind, id), use_color())
}

pub fn render_validation(errors: &ValidationErrors) -> String {
    let color = Term::stderr().features().colors_supported();
    render_template("validation", &validation_data(errors), color)
}

fn use_color() -> bool {
    Term::stdout().features().colors_supported()
}

fn environment(color: bool) -> Result<Environment<'static>, Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    for (name, source) in templates::ALL {
        env.add_template(name, source)?;
    }

    let theme = FRONTDESK_THEME.clone();
    env.add_filter("style", move |value: Value, name: String| -> String {
        let text = value.to_string();
        if color {
            theme.apply(&name, &text)
        } else {
            theme.apply_plain(&name, &text)
        }
    });
    Ok(env)
}

fn render_template<T: Serialize>(name: &str, data: &T, color: bool) -> String {
    environment(color)
        .and_then(|env| env.get_template(name)?.render(data))
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

fn list_id(id: u32) -> String {
    fit(&format!("{:>3}.", id), ID_WIDTH)
}

fn page_footer(page: Option<&PageInfo>, noun: &str) -> String {
    match page {
        Some(p) => format!(
            "Page {} of {}, {} {} in total",
            p.page, p.pages, p.total, noun
        ),
        None => String::new(),
    }
}

fn patient_list_data(patients: &[Patient], page: Option<&PageInfo>) -> ListData {
    let header = format!(
        "{}{}{}{}",
        fit("  #", ID_WIDTH),
        fit("Name", NAME_WIDTH),
        fit("Age  Gender  Phone       Email", DETAILS_WIDTH),
        fit("Next visit", STATUS_WIDTH),
    );
    let rows = patients
        .iter()
        .map(|p| ListRow {
            id: list_id(p.id),
            name: fit(&p.full_name(), NAME_WIDTH),
            details: fit(
                &format!(
                    "{:>3}  {:<7} {:<11} {}",
                    p.age,
                    p.gender.as_str(),
                    p.phone,
                    p.email
                ),
                DETAILS_WIDTH,
            ),
            status: fit(
                &p.next_appointment
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                STATUS_WIDTH,
            ),
            status_style: names::MUTED,
            updated: format_time_ago(p.updated_at),
        })
        .collect();

    ListData {
        header,
        rows,
        footer: page_footer(page, "patients"),
        empty_message: "No patients found.".to_string(),
    }
}

fn doctor_list_data(doctors: &[Doctor], page: Option<&PageInfo>) -> ListData {
    let header = format!(
        "{}{}{}{}",
        fit("  #", ID_WIDTH),
        fit("Name", NAME_WIDTH),
        fit("Specialization    Hospital", DETAILS_WIDTH),
        fit("Status", STATUS_WIDTH),
    );
    let rows = doctors
        .iter()
        .map(|d| ListRow {
            id: list_id(d.id),
            name: fit(&d.full_name(), NAME_WIDTH),
            details: fit(
                &format!("{:<17} {}", d.specialization.as_str(), d.hospital),
                DETAILS_WIDTH,
            ),
            status: fit(&d.status.to_string(), STATUS_WIDTH),
            status_style: status_style(d.status),
            updated: format_time_ago(d.updated_at),
        })
        .collect();

    ListData {
        header,
        rows,
        footer: page_footer(page, "doctors"),
        empty_message: "No doctors found.".to_string(),
    }
}

fn status_style(status: DoctorStatus) -> &'static str {
    match status {
        DoctorStatus::Active => names::ACTIVE,
        DoctorStatus::Inactive => names::INACTIVE,
    }
}

fn row(label: &str, value: Option<String>) -> Option<DetailRow> {
    value.filter(|v| !v.trim().is_empty()).map(|value| DetailRow {
        label: fit(label, LABEL_WIDTH),
        value,
    })
}

fn section(heading: &'static str, rows: Vec<Option<DetailRow>>) -> Option<DetailSection> {
    let rows: Vec<DetailRow> = rows.into_iter().flatten().collect();
    (!rows.is_empty()).then_some(DetailSection { heading, rows })
}

fn date(value: Option<chrono::NaiveDate>) -> Option<String> {
    value.map(|d| d.format("%Y-%m-%d").to_string())
}

fn updated_line(updated_at: DateTime<Utc>) -> String {
    if updated_at.timestamp() == 0 {
        String::new()
    } else {
        format!("Updated {}", format_time_ago(updated_at).trim())
    }
}

fn patient_details_data(p: &Patient) -> DetailsData {
    let contact = p.emergency_contact.as_ref();
    let sections = [
        section(
            "Contact",
            vec![
                row("Phone", Some(p.phone.clone())),
                row("Email", Some(p.email.clone())),
                row("Address", p.address.clone()),
            ],
        ),
        section(
            "Medical",
            vec![
                row("Blood type", p.blood_type.map(|b| b.to_string())),
                row("Medical history", p.medical_history.clone()),
                row("Current medications", p.current_medications.clone()),
                row("Allergies", p.allergies.clone()),
            ],
        ),
        section(
            "Visits",
            vec![
                row("Last visit", date(p.last_visit)),
                row("Next appointment", date(p.next_appointment)),
            ],
        ),
        section(
            "Insurance",
            vec![row("Insurance", p.insurance_info.clone())],
        ),
        section(
            "Emergency contact",
            vec![
                row("Name", contact.map(|c| c.name.clone())),
                row("Relationship", contact.map(|c| c.relationship.clone())),
                row("Phone", contact.map(|c| c.phone.clone())),
            ],
        ),
        section("Notes", vec![row("Notes", p.notes.clone())]),
    ];

    DetailsData {
        title: p.full_name(),
        status: String::new(),
        status_style: names::REGULAR,
        subtitle: format!("Patient #{} | {} years, {}", p.id, p.age, p.gender),
        sections: sections.into_iter().flatten().collect(),
        updated: updated_line(p.updated_at),
    }
}

fn doctor_details_data(d: &Doctor) -> DetailsData {
    let sections = [
        section(
            "Contact",
            vec![
                row("Email", Some(d.email.clone())),
                row("Phone", Some(d.phone.clone())),
                row("Gender", d.gender.map(|g| g.to_string())),
                row("Address", d.address.clone()),
            ],
        ),
        section(
            "Practice",
            vec![
                row("Hospital", Some(d.hospital.clone())),
                row("Experience", Some(format!("{} years", d.experience))),
                row("Qualifications", d.qualifications.clone()),
                row("Working days", d.working_days.clone()),
                row("Working hours", d.working_hours.clone()),
                row("Languages", d.languages.clone()),
                row("Insurance accepted", d.insurance_accepted.clone()),
            ],
        ),
        section("Notes", vec![row("Notes", d.notes.clone())]),
    ];

    DetailsData {
        title: d.full_name(),
        status: format!("  {}", d.status),
        status_style: status_style(d.status),
        subtitle: format!(
            "Doctor #{} | {} | License {}",
            d.id, d.specialization, d.license_number
        ),
        sections: sections.into_iter().flatten().collect(),
        updated: updated_line(d.updated_at),
    }
}

fn summary_data(summary: &Summary) -> SummaryData {
    let stat = |label: &str, value: usize| Stat {
        label: fit(label, LABEL_WIDTH),
        value,
    };
    SummaryData {
        title: "Front desk",
        stats: vec![
            stat("Patients", summary.patients),
            stat("Doctors", summary.doctors),
            stat("Active doctors", summary.active_doctors),
            stat("Upcoming appointments", summary.upcoming_appointments),
        ],
        hints: vec![
            "frontdesk patients list     browse patients",
            "frontdesk doctors list      browse doctors",
            "frontdesk open <path>       open a screen, e.g. /patient-details/1",
        ],
    }
}

fn form_data(view: View, fields: &[FormField]) -> FormData {
    let (title, hint) = match view {
        View::EditPatient(id) => (
            format!("Edit patient #{}", id),
            format!(
                "Change fields with `frontdesk patients edit {} --<field> <value>`.",
                id
            ),
        ),
        View::DoctorRegistration => (
            "Doctor registration".to_string(),
            "Fields marked * are required. Submit with `frontdesk doctors add`.".to_string(),
        ),
        _ => (
            "New patient".to_string(),
            "Fields marked * are required. Submit with `frontdesk patients add`.".to_string(),
        ),
    };
    let fields = fields
        .iter()
        .map(|f| FormLine {
            label: fit(f.label, LABEL_WIDTH - 2),
            marker: if f.required { "* " } else { "  " },
            value: f.value.clone().unwrap_or_default(),
        })
        .collect();
    FormData {
        title,
        fields,
        hint,
    }
}

fn messages_data(messages: &[CmdMessage]) -> MessagesData {
    MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect(),
    }
}

fn config_data(config: &FrontdeskConfig) -> ConfigData {
    ConfigData {
        entries: CONFIG_KEYS
            .iter()
            .map(|key| ConfigEntry {
                key,
                value: config.get(key).unwrap_or_default(),
            })
            .collect(),
    }
}

fn not_found_data(kind: RecordKind, id: u32) -> NotFoundData {
    let list = match kind {
        RecordKind::Patient => "frontdesk patients list",
        RecordKind::Doctor => "frontdesk doctors list",
    };
    NotFoundData {
        title: format!("{} not found: {}", kind, id),
        hint: format!("It may have been deleted or renumbered. See `{}`.", list),
    }
}

fn validation_data(errors: &ValidationErrors) -> ValidationData {
    ValidationData {
        title: "Please correct the following:",
        errors: errors
            .iter()
            .map(|e| {
                let label = PATIENT_SCHEMA
                    .field(e.field)
                    .or_else(|| DOCTOR_SCHEMA.field(e.field))
                    .map_or(e.field, |f| f.label);
                ValidationLine {
                    label: fit(label, LABEL_WIDTH),
                    message: e.message.clone(),
                }
            })
            .collect(),
    }
}

/// Truncates to `width` columns (with an ellipsis) and pads with spaces.
fn fit(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    // Legacy records without timestamps load as the epoch.
    if timestamp.timestamp() == 0 {
        return " ".repeat(TIME_WIDTH);
    }
    let duration = Utc::now().signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk::api::CmdResult;
    use frontdesk::seed;

    fn render<T: Serialize>(name: &str, data: &T) -> String {
        render_template(name, data, false)
    }

    #[test]
    fn test_render_patient_list() {
        let patients = seed::patients();
        let page = PageInfo {
            page: 1,
            pages: 1,
            per_page: 10,
            total: 3,
        };
        let output = render("list", &patient_list_data(&patients, Some(&page)));

        assert!(output.contains("Name"));
        assert!(output.contains("  1.  John Smith"));
        assert!(output.contains("2024-02-12"));
        assert!(output.contains("Page 1 of 1, 3 patients in total"));
        assert_eq!(output.lines().count(), 5);
    }

    #[test]
    fn test_render_empty_list() {
        let output = render("list", &patient_list_data(&[], None));
        assert_eq!(output.trim(), "No patients found.");
    }

    #[test]
    fn test_render_doctor_status() {
        let mut doctors = seed::doctors();
        doctors[1].status = DoctorStatus::Inactive;
        let output = render("list", &doctor_list_data(&doctors, None));

        assert!(output.contains("Dr. Kwame Osei"));
        assert!(output.contains("inactive"));
        assert!(output.contains("Pediatrics"));
    }

    #[test]
    fn test_list_lines_fit_line_width() {
        let mut patients = seed::patients();
        patients[0].email = "a-very-long-address-that-will-not-fit@example-hospital.example".into();
        let output = render("list", &patient_list_data(&patients, None));
        for line in output.lines() {
            assert!(line.width() <= LINE_WIDTH, "too wide: {:?}", line);
        }
        assert!(output.contains('…'));
    }

    #[test]
    fn test_details_skip_empty_fields() {
        let patients = seed::patients();
        let sara = &patients[1];
        let output = render("details", &patient_details_data(sara));

        assert!(output.starts_with("Sara Okafor\n"));
        assert!(output.contains("Patient #2 | 29 years, female"));
        assert!(output.contains("Chidi Okafor"));
        assert!(!output.contains("Address"));
        assert!(!output.contains("Insurance"));
    }

    #[test]
    fn test_legacy_doctor_has_no_updated_line() {
        let mut doctor = seed::doctors().remove(0);
        doctor.updated_at = DateTime::<Utc>::default();
        let output = render("details", &doctor_details_data(&doctor));

        assert!(output.contains("Dr. Meredith Grey  active"));
        assert!(output.contains("License NEU48213"));
        assert!(!output.contains("Updated"));
    }

    #[test]
    fn test_form_marks_required_fields() {
        let fields = vec![
            FormField {
                name: "firstName",
                label: "First name",
                required: true,
                value: Some("Ana".into()),
            },
            FormField {
                name: "notes",
                label: "Notes",
                required: false,
                value: None,
            },
        ];
        let output = render("form", &form_data(View::EditPatient(3), &fields));

        assert!(output.starts_with("Edit patient #3"));
        assert!(output.contains("First name"));
        assert!(output.contains("* Ana"));
        assert!(output.contains("frontdesk patients edit 3"));
    }

    #[test]
    fn test_validation_uses_field_labels() {
        let mut errors = ValidationErrors::new();
        errors.push("phone", "Please enter a valid 10-digit phone number");
        errors.push("emergencyContactPhone", "Please enter a valid 10-digit phone number");
        let output = render("validation", &validation_data(&errors));

        assert!(output.contains("Phone"));
        assert!(output.contains("Emergency phone"));
        assert_eq!(output.matches("10-digit").count(), 2);
    }

    #[test]
    fn test_not_found_names_list_command() {
        let output = render("not_found", &not_found_data(RecordKind::Doctor, 9));
        assert!(output.contains("Doctor not found: 9"));
        assert!(output.contains("frontdesk doctors list"));
    }

    #[test]
    fn test_config_lists_every_key() {
        let output = render("config", &config_data(&FrontdeskConfig::default()));
        assert!(output.contains("patient-ids = renumber"));
        assert!(output.contains("doctor-ids = stable"));
        assert!(output.contains("rows-per-page = 10"));
        assert!(output.contains("seed-on-empty = true"));
    }

    #[test]
    fn test_render_view_landing_with_messages() {
        let summary = Summary {
            patients: 3,
            doctors: 2,
            active_doctors: 1,
            upcoming_appointments: 0,
        };
        let mut result = CmdResult::default()
            .with_view(View::Landing)
            .with_summary(summary);
        result.add_message(CmdMessage::warning("careful"));

        let output = render_view_internal(&result, false);
        assert!(output.starts_with("Front desk"));
        assert!(output.contains("Active doctors"));
        assert!(output.trim_end().ends_with("careful"));
    }

    #[test]
    fn test_render_messages_empty() {
        assert!(render_messages(&[]).is_empty());
    }

    #[test]
    fn test_truncate_counts_display_width() {
        assert_eq!(truncate_to_width("Zoë", 10), "Zoë");
        assert_eq!(truncate_to_width("日本語のテキスト", 7), "日本語…");
        assert_eq!(fit("ab", 4), "ab  ");
    }
}

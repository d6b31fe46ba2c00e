use crate::config::FrontdeskConfig;
use crate::model::{Doctor, Patient};
use crate::routes::View;
use crate::validation::FormSchema;
use crate::validation::FormValues;
use serde::Serialize;

pub mod config;
pub mod doctors;
pub mod navigate;
pub mod patients;
pub mod summary;

pub use summary::Summary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Which slice of a list was returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// 1-based
    pub page: usize,
    pub pages: usize,
    pub per_page: usize,
    pub total: usize,
}

/// One field of a form as a view shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub value: Option<String>,
}

pub fn form_fields(schema: &FormSchema, values: &FormValues) -> Vec<FormField> {
    schema
        .fields()
        .iter()
        .map(|f| FormField {
            name: f.name,
            label: f.label,
            required: f.is_required(),
            value: values.text(f.name),
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub view: Option<View>,
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
    pub page: Option<PageInfo>,
    pub summary: Option<Summary>,
    pub form: Vec<FormField>,
    pub config: Option<FrontdeskConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_view(mut self, view: View) -> Self {
        self.view = Some(view);
        self
    }

    pub fn with_patients(mut self, patients: Vec<Patient>) -> Self {
        self.patients = patients;
        self
    }

    pub fn with_doctors(mut self, doctors: Vec<Doctor>) -> Self {
        self.doctors = doctors;
        self
    }

    pub fn with_page(mut self, page: PageInfo) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_summary(mut self, summary: Summary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_form(mut self, form: Vec<FormField>) -> Self {
        self.form = form;
        self
    }

    pub fn with_config(mut self, config: FrontdeskConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Slices `items` into page `page` (1-based, clamped to the last page).
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> (Vec<T>, PageInfo) {
    let per_page = per_page.max(1);
    let total = items.len();
    let pages = total.div_ceil(per_page).max(1);
    let page = page.clamp(1, pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total);

    let slice = items.get(start..end).unwrap_or_default().to_vec();
    (
        slice,
        PageInfo {
            page,
            pages,
            per_page,
            total,
        },
    )
}

/// Warning added after a mutation whose write to storage failed.
pub(crate) fn unsaved_warning() -> CmdMessage {
    CmdMessage::warning("Changes could not be written to storage and will be lost on exit.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginates_and_clamps() {
        let items: Vec<u32> = (1..=23).collect();

        let (first, info) = paginate(&items, 1, 10);
        assert_eq!(first, (1..=10).collect::<Vec<_>>());
        assert_eq!(info.pages, 3);
        assert_eq!(info.total, 23);

        let (last, info) = paginate(&items, 99, 10);
        assert_eq!(last, vec![21, 22, 23]);
        assert_eq!(info.page, 3);
    }

    #[test]
    fn empty_list_is_one_empty_page() {
        let items: Vec<u32> = vec![];
        let (slice, info) = paginate(&items, 0, 10);
        assert!(slice.is_empty());
        assert_eq!(info.page, 1);
        assert_eq!(info.pages, 1);
    }
}

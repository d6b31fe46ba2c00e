//! Declarative field validation.
//!
//! A [`FormSchema`] is an ordered list of fields, each with an ordered list of
//! [`Rule`]s. Checking a field stops at its first failing rule, so every field
//! reports at most one message. Checking a form visits every field and collects one
//! [`FieldError`] per failing field, in schema order.
//!
//! Empty values only ever trip [`Rule::Required`]; an empty optional field skips its
//! remaining rules.

use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Rule {
    Required(&'static str),
    Pattern { regex: Regex, message: &'static str },
    Integer(&'static str),
    Min { value: i64, message: &'static str },
    Max { value: i64, message: &'static str },
    OneOf {
        options: &'static [&'static str],
        message: &'static str,
    },
    Date(&'static str),
}

impl Rule {
    /// Build a pattern rule.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regex. Patterns are compile-time literals.
    pub fn pattern(pattern: &str, message: &'static str) -> Self {
        Rule::Pattern {
            regex: Regex::new(pattern).expect("invalid validation pattern"),
            message,
        }
    }

    fn check(&self, value: &str) -> Result<(), &'static str> {
        let ok = match self {
            Rule::Required(_) => !value.trim().is_empty(),
            Rule::Pattern { regex, .. } => regex.is_match(value.trim()),
            Rule::Integer(_) => value.trim().parse::<i64>().is_ok(),
            Rule::Min { value: min, .. } => value.trim().parse::<i64>().is_ok_and(|n| n >= *min),
            Rule::Max { value: max, .. } => value.trim().parse::<i64>().is_ok_and(|n| n <= *max),
            Rule::OneOf { options, .. } => options
                .iter()
                .any(|option| option.eq_ignore_ascii_case(value.trim())),
            Rule::Date(_) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_ok(),
        };
        if ok {
            Ok(())
        } else {
            Err(self.message())
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rule::Required(message)
            | Rule::Integer(message)
            | Rule::Date(message)
            | Rule::Pattern { message, .. }
            | Rule::Min { message, .. }
            | Rule::Max { message, .. }
            | Rule::OneOf { message, .. } => *message,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldRules {
    pub name: &'static str,
    pub label: &'static str,
    pub rules: Vec<Rule>,
}

impl FieldRules {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            rules: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, Rule::Required(_)))
    }

    /// First failing message for `value`, if any.
    pub fn check(&self, value: Option<&str>) -> Result<(), &'static str> {
        let value = value.unwrap_or("");
        if value.trim().is_empty() {
            return match self.rules.iter().find(|r| matches!(r, Rule::Required(_))) {
                Some(required) => Err(required.message()),
                None => Ok(()),
            };
        }
        self.rules.iter().try_for_each(|rule| rule.check(value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

/// Raw user input keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.0.insert(field.to_string(), value.into());
    }

    /// Sets `field` only when `value` is present.
    pub fn set_opt(&mut self, field: &str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.set(field, value);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn text(&self, field: &str) -> Option<String> {
        self.get(field)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }
}

#[derive(Debug, Clone)]
pub struct FormSchema {
    fields: Vec<FieldRules>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldRules>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldRules> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn validate(&self, values: &FormValues) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for field in &self.fields {
            if let Err(message) = field.check(values.get(field.name)) {
                errors.push(field.name, message);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

//! Project input form
//!
//! `ProjectInput` holds the three raw field values a user typed, checks them
//! against [`FormRules`] and hands accepted drafts to the store.

use crate::error::Error;
use crate::project::Project;
use crate::state::ProjectState;
use crate::validation::{FieldValue, Validatable, Violation};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Constraints applied to each form field
///
/// A `description_min_length` of 0 adds nothing beyond the description being
/// required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRules {
    pub title_required: bool,
    pub description_min_length: usize,
    pub description_max_length: Option<usize>,
    pub people_min: u32,
    pub people_max: u32,
}

impl Default for FormRules {
    fn default() -> Self {
        Self {
            title_required: true,
            description_min_length: 5,
            description_max_length: None,
            people_min: 1,
            people_max: 5,
        }
    }
}

impl FormRules {
    fn title(&self, value: &str) -> Validatable {
        let v = Validatable::new(value);
        if self.title_required { v.required() } else { v }
    }

    fn description(&self, value: &str) -> Validatable {
        let mut v = Validatable::new(value)
            .required()
            .min_length(self.description_min_length);
        v.max_length = self.description_max_length;
        v
    }

    fn people(&self, value: f64) -> Validatable {
        Validatable::new(value)
            .required()
            .min(f64::from(self.people_min))
            .max(f64::from(self.people_max))
    }
}

/// Parse the people field into a number
///
/// Blank input counts as zero. Anything that is not a whole number becomes
/// NaN, which fails both numeric bounds.
pub fn parse_people(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() && n.fract() == 0.0 => n,
        _ => f64::NAN,
    }
}

/// A validated set of field values, ready for the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub people: u32,
}

/// One field that failed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRejection {
    pub field: &'static str,
    pub value: FieldValue,
    pub violations: Vec<Violation>,
}

/// Why a form submission was refused
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub fields: Vec<FieldRejection>,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid input!")?;
        for (i, field) in self.fields.iter().enumerate() {
            let sep = if i == 0 { " " } else { "; " };
            let reasons: Vec<String> = field.violations.iter().map(|v| v.to_string()).collect();
            write!(f, "{}{} {}", sep, field.field, reasons.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for Rejection {}

impl From<Rejection> for Error {
    fn from(rejection: Rejection) -> Self {
        Error::InvalidInput(rejection.to_string())
    }
}

/// Result of gathering the form fields
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Accepted(ProjectDraft),
    Rejected(Rejection),
}

impl FormOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, FormOutcome::Accepted(_))
    }

    pub fn into_result(self) -> Result<ProjectDraft, Rejection> {
        match self {
            FormOutcome::Accepted(draft) => Ok(draft),
            FormOutcome::Rejected(rejection) => Err(rejection),
        }
    }
}

/// The project creation form
#[derive(Debug, Clone, Default)]
pub struct ProjectInput {
    rules: FormRules,
    pub title: String,
    pub description: String,
    pub people: String,
}

impl ProjectInput {
    /// Create an empty form checked against `rules`
    pub fn new(rules: FormRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Replace all three field values
    pub fn fill(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: impl Into<String>,
    ) {
        self.title = title.into();
        self.description = description.into();
        self.people = people.into();
    }

    pub fn rules(&self) -> &FormRules {
        &self.rules
    }

    /// Whether every field is empty
    pub fn is_clear(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.people.is_empty()
    }

    /// Validate the current field values
    pub fn gather(&self) -> FormOutcome {
        let people = parse_people(&self.people);
        let checks = [
            ("title", self.rules.title(&self.title)),
            ("description", self.rules.description(&self.description)),
            ("people", self.rules.people(people)),
        ];

        let fields: Vec<FieldRejection> = checks
            .into_iter()
            .filter_map(|(field, validatable)| {
                let violations = validatable.violations();
                if violations.is_empty() {
                    None
                } else {
                    Some(FieldRejection {
                        field,
                        value: validatable.value,
                        violations,
                    })
                }
            })
            .collect();

        if !fields.is_empty() {
            return FormOutcome::Rejected(Rejection { fields });
        }

        FormOutcome::Accepted(ProjectDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            // Bounds passed, so this is a whole number within u32 range.
            people: people as u32,
        })
    }

    /// Empty every field
    pub fn clear(&mut self) {
        self.people.clear();
        self.description.clear();
        self.title.clear();
    }

    /// Validate, add the project to `store` and clear the form
    ///
    /// On rejection the fields are left as typed.
    pub fn submit(&mut self, store: &ProjectState) -> Result<Project, Rejection> {
        match self.gather() {
            FormOutcome::Accepted(draft) => {
                let project = store.add_project(draft.title, draft.description, draft.people);
                self.clear();
                Ok(project)
            }
            FormOutcome::Rejected(rejection) => {
                debug!(fields = rejection.fields.len(), "{}", rejection);
                Err(rejection)
            }
        }
    }

    /// Build a submit callback bound to this form and `store`
    pub fn submit_handler(
        form: Rc<RefCell<ProjectInput>>,
        store: Rc<ProjectState>,
    ) -> impl Fn() -> Result<Project, Rejection> {
        move || {
            debug!("Form submitted");
            form.borrow_mut().submit(&store)
        }
    }
}

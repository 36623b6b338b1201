//! Declarative field validation.
//!
//! Entities describe their rules by implementing [`Validatable`]; the
//! [`validate`] engine executes the declarations and reports every
//! violation at once. The entities themselves never run checks, so an
//! instance can be mutated and used freely while invalid.

use iban::Iban;
use thiserror::Error;

use crate::country::is_valid_country_code;

/// One rule that a declared field value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// The value must be set and non-empty.
    NotBlank,
    /// A set value must not exceed this many characters.
    MaxLength(usize),
    /// A set value must be an assigned ISO 3166-1 alpha-2 country code.
    CountryCode,
    /// A set value must parse as an IBAN, ignoring spaces and case.
    Iban,
}

/// The declared rules for one field: its name, its current value and the
/// constraints to apply. `None` means the field is unset, which is
/// distinct from an empty string.
#[derive(Debug, Clone)]
pub struct FieldRules<'a> {
    pub field: &'static str,
    pub value: Option<&'a str>,
    pub constraints: &'static [Constraint],
}

impl<'a> FieldRules<'a> {
    pub fn new(
        field: &'static str,
        value: Option<&'a str>,
        constraints: &'static [Constraint],
    ) -> Self {
        Self {
            field,
            value,
            constraints,
        }
    }
}

/// Implemented by entities that expose validation rules.
///
/// Implementors only declare; the engine in this module executes. The
/// provided `violations`/`is_valid` helpers are shorthand for running
/// [`validate`] on the entity.
pub trait Validatable {
    /// The rule declarations for the entity's own fields.
    fn validation_rules(&self) -> Vec<FieldRules<'_>>;

    /// Named child entities whose declarations are checked recursively.
    fn nested(&self) -> Vec<(&'static str, &dyn Validatable)> {
        Vec::new()
    }

    fn violations(&self) -> Vec<Violation>
    where
        Self: Sized,
    {
        match validate(self) {
            Ok(()) => Vec::new(),
            Err(err) => err.violations,
        }
    }

    fn is_valid(&self) -> bool
    where
        Self: Sized,
    {
        validate(self).is_ok()
    }
}

/// A single reported rule violation.
///
/// `field` names the offending field; for nested entities it is a
/// dot-joined path such as `creditor.name`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct Violation {
    pub field: String,
    pub message: String,
}

/// The collected outcome of a failed validation run.
#[derive(Debug, Clone, Error)]
#[error("validation failed with {} violation(s)", .violations.len())]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

/// Executes the declared rules of `subject` and of its nested entities.
///
/// All declarations are checked; nothing aborts mid-walk. `Ok(())` means
/// zero violations, otherwise the error carries the complete list.
pub fn validate<T>(subject: &T) -> Result<(), ValidationError>
where
    T: Validatable + ?Sized,
{
    let mut violations = Vec::new();
    collect(subject, "", &mut violations);

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

fn collect<T>(subject: &T, path: &str, out: &mut Vec<Violation>)
where
    T: Validatable + ?Sized,
{
    for rules in subject.validation_rules() {
        for constraint in rules.constraints {
            if let Some(message) = check(*constraint, rules.value) {
                out.push(Violation {
                    field: join_path(path, rules.field),
                    message,
                });
            }
        }
    }

    for (name, child) in subject.nested() {
        let child_path = join_path(path, name);
        collect(child, &child_path, out);
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

/// Checks one constraint against one value, returning the message on
/// violation. Apart from `NotBlank`, constraints skip unset and empty
/// values so that a missing required field is reported exactly once.
fn check(constraint: Constraint, value: Option<&str>) -> Option<String> {
    match constraint {
        Constraint::NotBlank => match value {
            None => Some("must not be blank".to_string()),
            Some(v) if v.is_empty() => Some("must not be blank".to_string()),
            Some(_) => None,
        },
        Constraint::MaxLength(max) => value.and_then(|v| {
            let length = v.chars().count();
            if length > max {
                Some(format!("must not be longer than {max} characters, got {length}"))
            } else {
                None
            }
        }),
        Constraint::CountryCode => value.filter(|v| !v.is_empty()).and_then(|v| {
            if is_valid_country_code(v) {
                None
            } else {
                Some(format!("'{v}' is not an ISO 3166-1 alpha-2 country code"))
            }
        }),
        Constraint::Iban => value.filter(|v| !v.is_empty()).and_then(|v| {
            if is_valid_iban(v) {
                None
            } else {
                Some(format!("'{v}' is not a valid IBAN"))
            }
        }),
    }
}

/// Returns true if `value` parses as an IBAN after removing spaces and
/// upper-casing.
pub fn is_valid_iban(value: &str) -> bool {
    let cleaned = value.replace(' ', "").to_uppercase();

    if cleaned.is_empty() {
        return false;
    }

    cleaned.parse::<Iban>().is_ok()
}

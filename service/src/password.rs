//! Administrator password policy.
//!
//! Only the length rule blocks provisioning. The character-class rules
//! (uppercase, digit, special, prohibited) are advisory: they show up in the
//! validation report and are logged, but never fail the operation.

use std::fmt;

/// One failed policy rule, with a user-facing message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleViolation {
    Length { min: usize, max: usize },
    MissingUppercase,
    MissingDigit,
    MissingSpecial { allowed: String },
    ProhibitedCharacter { prohibited: String },
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { min, max } => {
                write!(f, "password length must be between {min} and {max} characters")
            }
            Self::MissingUppercase => write!(f, "password should contain an uppercase letter"),
            Self::MissingDigit => write!(f, "password should contain a digit"),
            Self::MissingSpecial { allowed } => {
                write!(f, "password should contain one of: {allowed}")
            }
            Self::ProhibitedCharacter { prohibited } => {
                write!(f, "password must not contain any of: {prohibited}")
            }
        }
    }
}

/// Itemized list of the rules that block an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<RuleViolation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of a policy check: blocking errors plus advisory findings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<RuleViolation>,
    pub advisories: Vec<RuleViolation>,
}

/// The fixed password policy for key provisioning.
#[derive(Clone, Debug)]
pub struct PasswordPolicy {
    pub min_len: usize,
    pub max_len: usize,
    pub special_characters: Vec<char>,
    pub prohibited_characters: Vec<char>,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_len: 5,
            max_len: 15,
            special_characters: vec!['_', '#', '%', '*', '@'],
            prohibited_characters: vec!['$', '&', '=', '!'],
        }
    }
}

impl PasswordPolicy {
    /// Run every rule and report the findings.
    pub fn check(&self, password: &str) -> ValidationReport {
        let mut report = ValidationReport::default();

        let length = password.chars().count();
        if length < self.min_len || length > self.max_len {
            report.errors.push(RuleViolation::Length {
                min: self.min_len,
                max: self.max_len,
            });
        }

        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            report.advisories.push(RuleViolation::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            report.advisories.push(RuleViolation::MissingDigit);
        }
        if !password
            .chars()
            .any(|c| self.special_characters.contains(&c))
        {
            report.advisories.push(RuleViolation::MissingSpecial {
                allowed: join_chars(&self.special_characters),
            });
        }
        if password
            .chars()
            .any(|c| self.prohibited_characters.contains(&c))
        {
            report.advisories.push(RuleViolation::ProhibitedCharacter {
                prohibited: join_chars(&self.prohibited_characters),
            });
        }

        report
    }

    /// Check the password, failing when any blocking rule is violated.
    pub fn validate(&self, password: &str) -> Result<ValidationReport, ValidationError> {
        let report = self.check(password);
        if report.errors.is_empty() {
            Ok(report)
        } else {
            Err(ValidationError {
                violations: report.errors,
            })
        }
    }
}

fn join_chars(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

//! # Field Rules
//!
//! Data-driven validation for request arguments. Every request type
//! declares a `const` table of [`FieldRule`]s, one per NVP field, each an
//! ordered list of [`Check`]s mirroring the remote API's documented
//! constraints. The rule engine here is shared by the whole request family;
//! request modules only declare their tables.
//!
//! ## Evaluation
//!
//! Checks run in declared order and the first failure is returned. An
//! absent value (`None`) fails [`Check::Required`] with
//! [`ValidationError::Missing`] and [`Check::Matches`] with
//! [`ValidationError::Malformed`]; it satisfies [`Check::MaxLength`]
//! vacuously. An absent value that passes every check means "omit the
//! field from the request".
//!
//! Lengths are counted in characters, not bytes.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@(?:[A-Za-z0-9\-]+\.)+[A-Za-z]{2,}$")
        .expect("email regex is a valid literal")
});

// Whitespace is the ASCII set only: space, \t, \n, \x0B, \f, \r.
static STREET_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-zA-Z \t\n\x0B\f\r\-,.'#\\]{1,35}$")
        .expect("street regex is a valid literal")
});

static TRANSACTION_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Za-z]+$").expect("transaction id regex is a valid literal")
});

static AMOUNT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]{2}$").expect("amount regex is a valid literal")
});

static CURRENCY_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("currency regex is a valid literal"));

/// Named character patterns accepted by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// `local@domain.tld` email address syntax.
    Email,
    /// First line of a postal address: ASCII alphanumerics, whitespace and
    /// `- , . ' # \`, 1 to 35 characters.
    Street,
    /// PayPal transaction identifier: ASCII alphanumerics.
    TransactionId,
    /// Monetary amount with `.` as separator and exactly two decimals.
    Amount,
    /// ISO 4217 currency code: three uppercase ASCII letters.
    CurrencyCode,
}

impl Pattern {
    /// The compiled regular expression for this pattern.
    pub fn regex(self) -> &'static Regex {
        match self {
            Self::Email => &*EMAIL_REGEX,
            Self::Street => &*STREET_REGEX,
            Self::TransactionId => &*TRANSACTION_ID_REGEX,
            Self::Amount => &*AMOUNT_REGEX,
            Self::CurrencyCode => &*CURRENCY_CODE_REGEX,
        }
    }

    /// Human-readable description used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Email => "a valid email address",
            Self::Street => "1-35 alphanumeric characters, whitespace or - , . ' # \\",
            Self::TransactionId => "alphanumeric characters only",
            Self::Amount => "digits with a '.' and two decimal places",
            Self::CurrencyCode => "a three-letter uppercase currency code",
        }
    }

    /// Whether `value` matches the whole pattern.
    pub fn is_match(self, value: &str) -> bool {
        self.regex().is_match(value)
    }
}

/// A single constraint on a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// The value must be supplied.
    Required,
    /// The value may be at most this many characters long.
    MaxLength(usize),
    /// The value must match the pattern.
    Matches(Pattern),
}

/// Validation rule for one NVP field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// NVP key the value is sent under.
    pub key: &'static str,
    /// Checks, evaluated in order.
    pub checks: &'static [Check],
}

impl FieldRule {
    /// Declare a rule for `key`.
    pub const fn new(key: &'static str, checks: &'static [Check]) -> Self {
        Self { key, checks }
    }

    /// Validate `value` against this rule.
    ///
    /// Returns the value to send (`None` if an optional field was not
    /// supplied). The value is returned verbatim; no trimming or case
    /// folding is applied.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] of the first failing check.
    pub fn apply(&self, value: Option<&str>) -> Result<Option<String>, ValidationError> {
        for check in self.checks {
            match (*check, value) {
                (Check::Required, None) => {
                    return Err(ValidationError::Missing { field: self.key });
                }
                (Check::Required, Some(_)) | (Check::MaxLength(_), None) => {}
                (Check::MaxLength(max), Some(v)) => {
                    let actual = v.chars().count();
                    if actual > max {
                        return Err(ValidationError::TooLong {
                            field: self.key,
                            max,
                            actual,
                        });
                    }
                }
                (Check::Matches(pattern), v) => {
                    if !v.is_some_and(|v| pattern.is_match(v)) {
                        return Err(ValidationError::Malformed {
                            field: self.key,
                            expected: pattern.describe(),
                        });
                    }
                }
            }
        }
        Ok(value.map(str::to_owned))
    }
}

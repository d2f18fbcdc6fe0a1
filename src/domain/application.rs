use crate::error::{LoanError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identifier assigned to an application when it is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(Uuid);

impl ApplicationId {
    /// Generates a fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApplicationId {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| LoanError::ValidationError(format!("'{s}' is not a valid application id")))
    }
}

/// Requested loan amount.
///
/// Always non-negative. Persisted as a decimal string, accepted as either a
/// string or a JSON number when read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct LoanAmount(Decimal);

impl LoanAmount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            Err(LoanError::ValidationError(
                "Loan amount must not be negative".to_string(),
            ))
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for LoanAmount {
    type Error = LoanError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<LoanAmount> for Decimal {
    fn from(amount: LoanAmount) -> Self {
        amount.0
    }
}

impl FromStr for LoanAmount {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LoanError::ValidationError(
                "Loan amount is required".to_string(),
            ));
        }
        let invalid =
            || LoanError::ValidationError(format!("Loan amount '{trimmed}' is not a valid number"));
        if !is_plain_decimal(trimmed) {
            return Err(invalid());
        }
        let value = Decimal::from_str(trimmed).map_err(|_| invalid())?;
        Self::new(value)
    }
}

/// Optional sign, digits, and at most one `.` followed by digits.
///
/// `Decimal::from_str` alone also takes `_` separators and exponents.
fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    match fraction {
        None => !whole.is_empty() && all_digits(whole),
        Some(fraction) => !fraction.is_empty() && all_digits(fraction) && all_digits(whole),
    }
}

impl fmt::Display for LoanAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Applicant credit score, conventionally within 300..=900.
///
/// Persisted as a string to stay compatible with blobs written by the mobile
/// client; numbers are accepted on read as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CreditScore(u32);

impl CreditScore {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl FromStr for CreditScore {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LoanError::ValidationError(
                "Credit score is required".to_string(),
            ));
        }
        trimmed.parse::<u32>().map(Self).map_err(|_| {
            LoanError::ValidationError(format!("Credit score '{trimmed}' is not a whole number"))
        })
    }
}

impl fmt::Display for CreditScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for CreditScore {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CreditScore {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawScore {
            Number(u32),
            Text(String),
        }

        match RawScore::deserialize(deserializer)? {
            RawScore::Number(value) => Ok(Self(value)),
            RawScore::Text(text) => text.parse().map_err(<D::Error as serde::de::Error>::custom),
        }
    }
}

/// Decision status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl Status {
    /// `Approved` and `Rejected` are final.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Pending)
    }

    /// Re-applying the current status is always allowed so that repeated
    /// evaluations stay idempotent.
    pub fn can_transition_to(self, next: Status) -> bool {
        self == next || (self == Status::Pending && next.is_terminal())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Pending => "Pending",
            Status::Approved => "Approved",
            Status::Rejected => "Rejected",
        };
        f.write_str(label)
    }
}

/// Raw form input as typed by the applicant, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoanSubmission {
    pub full_name: String,
    pub loan_amount: String,
    pub purpose: String,
    pub credit_score: String,
}

/// A submitted loan request together with its decision status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    id: ApplicationId,
    full_name: String,
    loan_amount: LoanAmount,
    purpose: String,
    credit_score: CreditScore,
    #[serde(default)]
    status: Status,
}

impl LoanApplication {
    /// Validates a submission and turns it into a `Pending` application with a
    /// fresh id.
    ///
    /// Every field is checked; the returned `ValidationError` lists all
    /// problems found, separated by `"; "`.
    pub fn submit(submission: LoanSubmission) -> Result<Self> {
        let mut problems = Vec::new();

        let full_name = required_text("Full name", &submission.full_name, &mut problems);
        let loan_amount = collect(submission.loan_amount.parse::<LoanAmount>(), &mut problems);
        let purpose = required_text("Purpose", &submission.purpose, &mut problems);
        let credit_score = collect(submission.credit_score.parse::<CreditScore>(), &mut problems);

        match (full_name, loan_amount, purpose, credit_score) {
            (Some(full_name), Some(loan_amount), Some(purpose), Some(credit_score)) => Ok(Self {
                id: ApplicationId::generate(),
                full_name,
                loan_amount,
                purpose,
                credit_score,
                status: Status::Pending,
            }),
            _ => Err(LoanError::ValidationError(problems.join("; "))),
        }
    }

    pub fn id(&self) -> ApplicationId {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn loan_amount(&self) -> LoanAmount {
        self.loan_amount
    }

    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    pub fn credit_score(&self) -> CreditScore {
        self.credit_score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Checks the invariants that deserialization alone cannot enforce.
    pub(crate) fn check_invariants(&self) -> Result<()> {
        if self.full_name.trim().is_empty() {
            return Err(LoanError::ValidationError(format!(
                "application {} has an empty full name",
                self.id
            )));
        }
        if self.purpose.trim().is_empty() {
            return Err(LoanError::ValidationError(format!(
                "application {} has an empty purpose",
                self.id
            )));
        }
        Ok(())
    }
}

fn required_text(label: &str, value: &str, problems: &mut Vec<String>) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        problems.push(format!("{label} is required"));
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn collect<T>(parsed: Result<T>, problems: &mut Vec<String>) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(LoanError::ValidationError(message)) => {
            problems.push(message);
            None
        }
        Err(other) => {
            problems.push(other.to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn submission(name: &str, amount: &str, purpose: &str, score: &str) -> LoanSubmission {
        LoanSubmission {
            full_name: name.to_string(),
            loan_amount: amount.to_string(),
            purpose: purpose.to_string(),
            credit_score: score.to_string(),
        }
    }

    #[test]
    fn test_submit_valid_application() {
        let application =
            LoanApplication::submit(submission("John Doe", "10000", "Home Renovation", "720"))
                .unwrap();

        assert_eq!(application.full_name(), "John Doe");
        assert_eq!(application.loan_amount().value(), dec!(10000));
        assert_eq!(application.purpose(), "Home Renovation");
        assert_eq!(application.credit_score(), CreditScore::new(720));
        assert_eq!(application.status(), Status::Pending);
    }

    #[test]
    fn test_submit_trims_input() {
        let application =
            LoanApplication::submit(submission("  Jane Smith ", " 5000.50 ", " Car ", " 650 "))
                .unwrap();

        assert_eq!(application.full_name(), "Jane Smith");
        assert_eq!(application.loan_amount().value(), dec!(5000.50));
        assert_eq!(application.purpose(), "Car");
        assert_eq!(application.credit_score().value(), 650);
    }

    #[test]
    fn test_submit_assigns_distinct_ids() {
        let a = LoanApplication::submit(submission("A", "1", "x", "600")).unwrap();
        let b = LoanApplication::submit(submission("A", "1", "x", "600")).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_submit_reports_every_missing_field() {
        let err = LoanApplication::submit(submission("", " ", "", "")).unwrap_err();
        match err {
            LoanError::ValidationError(message) => {
                assert!(message.contains("Full name is required"));
                assert!(message.contains("Loan amount is required"));
                assert!(message.contains("Purpose is required"));
                assert!(message.contains("Credit score is required"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_submit_rejects_malformed_numbers() {
        assert!(matches!(
            LoanApplication::submit(submission("A", "ten", "x", "600")),
            Err(LoanError::ValidationError(_))
        ));
        assert!(matches!(
            LoanApplication::submit(submission("A", "-1", "x", "600")),
            Err(LoanError::ValidationError(_))
        ));
        assert!(matches!(
            LoanApplication::submit(submission("A", "100", "x", "6.5")),
            Err(LoanError::ValidationError(_))
        ));
        assert!(matches!(
            LoanApplication::submit(submission("A", "100", "x", "-600")),
            Err(LoanError::ValidationError(_))
        ));
        for amount in ["1_000", "1e5", "1E5", "1.5.0", "10.", "+", ".", "0x10", "1 000"] {
            assert!(
                matches!(
                    LoanApplication::submit(submission("A", amount, "x", "600")),
                    Err(LoanError::ValidationError(_))
                ),
                "amount {amount:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_plain_decimal_forms_are_accepted() {
        for (amount, expected) in [
            ("1000", dec!(1000)),
            ("1000.25", dec!(1000.25)),
            ("007", dec!(7)),
        ] {
            let application =
                LoanApplication::submit(submission("A", amount, "x", "600")).unwrap();
            assert_eq!(application.loan_amount().value(), expected, "amount {amount:?}");
        }
    }

    #[test]
    fn test_zero_amount_is_allowed() {
        let application = LoanApplication::submit(submission("A", "0", "x", "600")).unwrap();
        assert_eq!(application.loan_amount().value(), dec!(0));
    }

    #[test]
    fn test_status_transitions() {
        assert!(Status::Pending.can_transition_to(Status::Approved));
        assert!(Status::Pending.can_transition_to(Status::Rejected));
        assert!(Status::Approved.can_transition_to(Status::Approved));
        assert!(!Status::Approved.can_transition_to(Status::Rejected));
        assert!(!Status::Rejected.can_transition_to(Status::Pending));
        assert!(!Status::Pending.is_terminal());
    }

    #[test]
    fn test_application_json_layout() {
        let application =
            LoanApplication::submit(submission("John Doe", "10000", "Home", "720")).unwrap();
        let json = serde_json::to_value(&application).unwrap();

        assert_eq!(json["id"], application.id().to_string());
        assert_eq!(json["fullName"], "John Doe");
        assert_eq!(json["loanAmount"], "10000");
        assert_eq!(json["purpose"], "Home");
        assert_eq!(json["creditScore"], "720");
        assert_eq!(json["status"], "Pending");
    }

    #[test]
    fn test_application_accepts_numeric_fields() {
        let json = r#"{
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "fullName": "Alice Johnson",
            "loanAmount": 20000,
            "purpose": "Debt Consolidation",
            "creditScore": 610,
            "status": "Rejected"
        }"#;
        let application: LoanApplication = serde_json::from_str(json).unwrap();

        assert_eq!(application.loan_amount().value(), dec!(20000));
        assert_eq!(application.credit_score().value(), 610);
        assert_eq!(application.status(), Status::Rejected);
    }

    #[test]
    fn test_application_rejects_negative_amount_on_read() {
        let json = r#"{
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "fullName": "Alice Johnson",
            "loanAmount": "-5",
            "purpose": "Debt Consolidation",
            "creditScore": "610",
            "status": "Pending"
        }"#;
        assert!(serde_json::from_str::<LoanApplication>(json).is_err());
    }

    #[test]
    fn test_application_id_parsing() {
        let id = ApplicationId::generate();
        assert_eq!(id.to_string().parse::<ApplicationId>().unwrap(), id);
        assert!("not-an-id".parse::<ApplicationId>().is_err());
    }
}

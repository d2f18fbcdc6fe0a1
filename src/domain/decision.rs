use crate::domain::application::{LoanApplication, Status};
use crate::error::{LoanError, Result};
use rust_decimal::Decimal;
use std::fmt;

/// Largest amount approved under the default policy (100 000).
pub const DEFAULT_MAX_LOAN_AMOUNT: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);
pub const DEFAULT_MIN_CREDIT_SCORE: u32 = 500;
pub const DEFAULT_MAX_CREDIT_SCORE: u32 = 800;

/// Thresholds the engine approves against. All bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionPolicy {
    max_loan_amount: Decimal,
    min_credit_score: u32,
    max_credit_score: u32,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            max_loan_amount: DEFAULT_MAX_LOAN_AMOUNT,
            min_credit_score: DEFAULT_MIN_CREDIT_SCORE,
            max_credit_score: DEFAULT_MAX_CREDIT_SCORE,
        }
    }
}

impl DecisionPolicy {
    pub fn new(
        max_loan_amount: Decimal,
        min_credit_score: u32,
        max_credit_score: u32,
    ) -> Result<Self> {
        if max_loan_amount < Decimal::ZERO {
            return Err(LoanError::ConfigError(
                "maximum loan amount must not be negative".to_string(),
            ));
        }
        if min_credit_score > max_credit_score {
            return Err(LoanError::ConfigError(format!(
                "minimum credit score {min_credit_score} exceeds maximum {max_credit_score}"
            )));
        }
        Ok(Self {
            max_loan_amount,
            min_credit_score,
            max_credit_score,
        })
    }

    pub fn max_loan_amount(&self) -> Decimal {
        self.max_loan_amount
    }

    pub fn min_credit_score(&self) -> u32 {
        self.min_credit_score
    }

    pub fn max_credit_score(&self) -> u32 {
        self.max_credit_score
    }
}

/// A single rule an application failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    AmountAboveLimit { limit: Decimal },
    CreditScoreBelowMinimum { minimum: u32 },
    CreditScoreAboveMaximum { maximum: u32 },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::AmountAboveLimit { limit } => {
                write!(f, "loan amount exceeds the limit of {limit}")
            }
            RejectionReason::CreditScoreBelowMinimum { minimum } => {
                write!(f, "credit score is below the minimum of {minimum}")
            }
            RejectionReason::CreditScoreAboveMaximum { maximum } => {
                write!(f, "credit score is above the maximum of {maximum}")
            }
        }
    }
}

/// Outcome of an evaluation, with the rules that were violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub status: Status,
    pub reasons: Vec<RejectionReason>,
}

/// Approves an application when its amount is within the limit and its
/// credit score lies inside the accepted band; rejects it otherwise.
///
/// Evaluation is pure: it reads the application snapshot and returns a
/// status, leaving any state change to the caller.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    policy: DecisionPolicy,
}

impl DecisionEngine {
    pub fn new(policy: DecisionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }

    /// Returns the status the application should move to.
    pub fn evaluate(&self, application: &LoanApplication) -> Status {
        self.assess(application).status
    }

    /// Evaluates the application and reports every rule it failed.
    pub fn assess(&self, application: &LoanApplication) -> Assessment {
        let amount = application.loan_amount().value();
        let score = application.credit_score().value();
        let mut reasons = Vec::new();

        if amount > self.policy.max_loan_amount {
            reasons.push(RejectionReason::AmountAboveLimit {
                limit: self.policy.max_loan_amount,
            });
        }
        if score < self.policy.min_credit_score {
            reasons.push(RejectionReason::CreditScoreBelowMinimum {
                minimum: self.policy.min_credit_score,
            });
        }
        if score > self.policy.max_credit_score {
            reasons.push(RejectionReason::CreditScoreAboveMaximum {
                maximum: self.policy.max_credit_score,
            });
        }

        let status = if reasons.is_empty() {
            Status::Approved
        } else {
            Status::Rejected
        };
        Assessment { status, reasons }
    }
}

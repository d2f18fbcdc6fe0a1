use crate::domain::application::{LoanApplication, Status};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

const HEADER: [&str; 6] = [
    "id",
    "full_name",
    "loan_amount",
    "purpose",
    "credit_score",
    "status",
];

#[derive(Serialize)]
struct ApplicationRow<'a> {
    id: String,
    full_name: &'a str,
    loan_amount: Decimal,
    purpose: &'a str,
    credit_score: u32,
    status: Status,
}

impl<'a> From<&'a LoanApplication> for ApplicationRow<'a> {
    fn from(application: &'a LoanApplication) -> Self {
        Self {
            id: application.id().to_string(),
            full_name: application.full_name(),
            loan_amount: application.loan_amount().value(),
            purpose: application.purpose(),
            credit_score: application.credit_score().value(),
            status: application.status(),
        }
    }
}

/// Writes applications as CSV, header first, in the order given.
pub struct ApplicationWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ApplicationWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    pub fn write_applications(&mut self, applications: &[LoanApplication]) -> Result<()> {
        self.writer.write_record(HEADER)?;
        for application in applications {
            self.writer.serialize(ApplicationRow::from(application))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

use crate::domain::application::LoanSubmission;
use crate::error::{LoanError, Result};
use std::io::Read;

/// Reads raw loan submissions from a CSV source.
///
/// Expects the header `full_name, loan_amount, purpose, credit_score`.
/// Fields are trimmed and short rows are tolerated; a row missing a column
/// comes back as an error for that row only.
pub struct SubmissionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> SubmissionReader<R> {
    /// Creates a new `SubmissionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes submissions.
    pub fn submissions(self) -> impl Iterator<Item = Result<LoanSubmission>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LoanError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_valid_stream() {
        let data = "full_name, loan_amount, purpose, credit_score\n\
                    John Doe, 10000, Home Renovation, 720\n\
                    Jane Smith, 5000, Car Purchase, 650";
        let reader = SubmissionReader::new(data.as_bytes());
        let results: Vec<Result<LoanSubmission>> = reader.submissions().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.full_name, "John Doe");
        assert_eq!(first.loan_amount, "10000");
        assert_eq!(first.purpose, "Home Renovation");
        assert_eq!(first.credit_score, "720");
    }

    #[test]
    fn test_reader_keeps_empty_fields_for_validation() {
        let data = "full_name, loan_amount, purpose, credit_score\n, 10000, Home, ";
        let reader = SubmissionReader::new(data.as_bytes());
        let results: Vec<Result<LoanSubmission>> = reader.submissions().collect();

        let row = results[0].as_ref().unwrap();
        assert!(row.full_name.is_empty());
        assert!(row.credit_score.is_empty());
    }

    #[test]
    fn test_reader_short_row() {
        let data = "full_name, loan_amount, purpose, credit_score\nJohn Doe, 10000";
        let reader = SubmissionReader::new(data.as_bytes());
        let results: Vec<Result<LoanSubmission>> = reader.submissions().collect();

        assert!(matches!(results[0], Err(LoanError::CsvError(_))));
    }
}

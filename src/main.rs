use clap::{Parser, Subcommand};
use loan_origination::application::store::ApplicationStore;
use loan_origination::config::{AppConfig, DEFAULT_DATA_DIR, StorageConfig};
use loan_origination::domain::application::{ApplicationId, LoanSubmission, Status};
use loan_origination::domain::decision::{DecisionEngine, DecisionPolicy};
use loan_origination::domain::ports::BlobStorageBox;
use loan_origination::domain::user::User;
use loan_origination::error::LoanError;
use loan_origination::interfaces::csv::application_writer::ApplicationWriter;
use loan_origination::interfaces::csv::submission_reader::SubmissionReader;
use loan_origination::telemetry::{self, TelemetryConfig};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the persisted applications
    #[arg(long, env = "LOAN_DATA_DIR", default_value = DEFAULT_DATA_DIR, global = true)]
    data_dir: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "LOAN_DB_PATH", global = true)]
    db_path: Option<PathBuf>,

    /// Largest loan amount that can be approved
    #[arg(long, env = "LOAN_MAX_AMOUNT", default_value = "100000", global = true)]
    max_amount: Decimal,

    /// Lowest credit score that can be approved
    #[arg(long, env = "LOAN_MIN_CREDIT_SCORE", default_value_t = 500, global = true)]
    min_credit_score: u32,

    /// Highest credit score that can be approved
    #[arg(long, env = "LOAN_MAX_CREDIT_SCORE", default_value_t = 800, global = true)]
    max_credit_score: u32,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, env = "LOAN_LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a session for the given username
    Login { username: String },
    /// Submit a new loan application
    Submit {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        purpose: String,
        #[arg(long)]
        credit_score: String,
    },
    /// Submit every row of a CSV file (full_name, loan_amount, purpose, credit_score)
    Import { input: PathBuf },
    /// Print all applications as CSV
    List,
    /// Show one application and how it would be decided
    Show { id: ApplicationId },
    /// Evaluate an application and record the decision
    Decide { id: ApplicationId },
    /// Evaluate every pending application
    DecideAll,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let telemetry_config = TelemetryConfig {
        log_level: cli.log_level.clone(),
    };
    telemetry::init(&telemetry_config).into_diagnostic()?;

    let config = AppConfig {
        storage: StorageConfig::resolve(cli.data_dir.clone(), cli.db_path.clone()),
        policy: DecisionPolicy::new(cli.max_amount, cli.min_credit_score, cli.max_credit_score)
            .into_diagnostic()?,
        telemetry: telemetry_config,
    };

    let engine = DecisionEngine::new(config.policy);
    let mut store = ApplicationStore::with_storage(config.storage.open().into_diagnostic()?);
    store.load();

    match cli.command {
        Command::Login { username } => {
            let user = User::sign_in(&username).into_diagnostic()?;
            println!("Signed in as {} ({})", user.username(), user.id());
        }
        Command::Submit {
            full_name,
            amount,
            purpose,
            credit_score,
        } => {
            let submission = LoanSubmission {
                full_name,
                loan_amount: amount,
                purpose,
                credit_score,
            };
            let id = store.add(submission).into_diagnostic()?.id();
            store.save().into_diagnostic()?;
            println!("{id}");
        }
        Command::Import { input } => import(&mut store, input)?,
        Command::List => {
            let stdout = io::stdout();
            let mut writer = ApplicationWriter::new(stdout.lock());
            writer.write_applications(store.all()).into_diagnostic()?;
        }
        Command::Show { id } => {
            let application = store
                .get(id)
                .ok_or(LoanError::NotFoundError(id))
                .into_diagnostic()?;
            let assessment = engine.assess(application);
            println!("Id: {}", application.id());
            println!("Applicant: {}", application.full_name());
            println!("Amount: {}", application.loan_amount());
            println!("Purpose: {}", application.purpose());
            println!("Credit Score: {}", application.credit_score());
            println!("Status: {}", application.status());
            println!("Assessment: {}", assessment.status);
            for reason in &assessment.reasons {
                println!("  - {reason}");
            }
        }
        Command::Decide { id } => {
            let status = store.decide(id, &engine).into_diagnostic()?.status();
            store.save().into_diagnostic()?;
            println!("{id},{status}");
        }
        Command::DecideAll => {
            let pending: Vec<ApplicationId> = store
                .all()
                .iter()
                .filter(|a| a.status() == Status::Pending)
                .map(|a| a.id())
                .collect();
            for id in pending {
                let status = store.decide(id, &engine).into_diagnostic()?.status();
                println!("{id},{status}");
            }
            store.save().into_diagnostic()?;
        }
    }

    Ok(())
}

fn import(store: &mut ApplicationStore<BlobStorageBox>, input: PathBuf) -> Result<()> {
    let file = File::open(input).into_diagnostic()?;
    let reader = SubmissionReader::new(file);
    let mut imported = 0usize;
    for submission in reader.submissions() {
        match submission {
            Ok(submission) => match store.add(submission) {
                Ok(_) => imported += 1,
                Err(e) => eprintln!("Error submitting application: {}", e),
            },
            Err(e) => {
                eprintln!("Error reading submission: {}", e);
            }
        }
    }
    store.save().into_diagnostic()?;
    println!("Imported {imported} applications");
    Ok(())
}

use std::io::{self, BufRead, Write};
use std::time::Duration;

use chrono::NaiveDate;
use clap::Parser;

use crate::connector::ChatClientConfig;
use crate::domain::{DomainError, ExpiryAnswer};

pub const ITEM_PROMPT: &str = "Enter the name of the item: ";

#[derive(Debug, Parser)]
#[command(name = "shelflife")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Grocery items to look up; asks on standard input when none are given
    pub items: Vec<String>,

    #[arg(short, long)]
    pub verbose: bool,

    /// Also print days left and an urgency band when the answer is a date
    #[arg(long)]
    pub status: bool,

    /// Override API_BASE_URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override API_MODEL
    #[arg(long)]
    pub model: Option<String>,

    /// Override API_TIMEOUT_SECS
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Answer every lookup with this text instead of calling the API
    #[arg(long, hide = true)]
    pub mock_reply: Option<String>,
}

impl Cli {
    pub fn apply_overrides(&self, mut config: ChatClientConfig) -> ChatClientConfig {
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

/// Ask for an item name on `output` and read one line from `input`.
///
/// Returns `None` at end of input. Only the line terminator is removed.
pub fn read_item_name<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<String>> {
    write!(output, "{ITEM_PROMPT}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

/// The text printed for one answered lookup.
///
/// `label` prefixes the line when several items are looked up in one run.
pub fn format_report(
    label: Option<&str>,
    answer: &ExpiryAnswer,
    today: NaiveDate,
    with_status: bool,
) -> String {
    let mut report = match label {
        Some(label) => format!("{label}: Expiry Date: {answer}"),
        None => format!("Expiry Date: {answer}"),
    };

    if with_status {
        if let (Some(days), Some(status)) = (answer.days_left(today), answer.status(today)) {
            report.push_str(&format!("\nDays Left: {days} ({status})"));
        }
    }

    report
}

/// Exit code for a failed run: the first [`DomainError`] in the chain decides, otherwise 1.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<DomainError>())
        .map(DomainError::exit_code)
        .unwrap_or(1)
}

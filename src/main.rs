use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use multiomics_survey::{
    ClientConfig, Keyword, MultiomicsSurvey, PubMedClient, SurveyConfig, YearEndPolicy,
};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "multiomics-survey",
    about = "Count PubMed studies tagged with two or more omics keywords, per year",
    long_about = "Searches PubMed for every combination of two or more omics keywords \
                  (\"Other Term\" field) and reports the number of unique studies per \
                  publication year"
)]
struct Cli {
    /// First publication date to survey (YYYY-MM-DD)
    #[arg(long, default_value = "2000-01-01")]
    from: NaiveDate,

    /// Last publication date to survey (YYYY-MM-DD)
    #[arg(long, default_value = "2018-12-31")]
    until: NaiveDate,

    /// Keyword to combine; repeat to build the list (default: all omics keywords)
    #[arg(short, long = "keyword")]
    keywords: Vec<Keyword>,

    /// End the last year at --until instead of December 31
    #[arg(long)]
    clamp_year_end: bool,

    /// HTTP request timeout in seconds
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// API key for NCBI E-utilities (increases rate limit)
    #[arg(long, env = "NCBI_API_KEY")]
    api_key: Option<String>,

    /// Email for NCBI requests (recommended)
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,

    /// Tool name for NCBI requests
    #[arg(long, env = "NCBI_TOOL", default_value = "qbic")]
    tool: String,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new()
            .with_tool(&self.tool)
            .with_timeout(Duration::from_secs(self.timeout));
        if let Some(api_key) = &self.api_key {
            config = config.with_api_key(api_key);
        }
        if let Some(email) = &self.email {
            config = config.with_email(email);
        }
        config
    }

    fn survey_config(&self) -> SurveyConfig {
        let mut config = SurveyConfig::new().with_date_range(self.from, self.until);
        if !self.keywords.is_empty() {
            config = config.with_keywords(self.keywords.clone());
        }
        if self.clamp_year_end {
            config = config.with_year_end(YearEndPolicy::ClampToUntil);
        }
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let client =
        PubMedClient::with_config(cli.client_config()).context("Failed to create PubMed client")?;
    let survey = MultiomicsSurvey::new(client, cli.survey_config())
        .context("Invalid survey configuration")?;

    info!(
        combinations = survey.combinations().len(),
        "Starting multiomics survey"
    );

    let reports = survey
        .run(&mut std::io::stdout())
        .await
        .context("Survey aborted")?;

    let total: usize = reports.iter().map(|r| r.unique_studies).sum();
    info!(years = reports.len(), total, "Done");

    Ok(())
}

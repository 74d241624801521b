//! Year-by-year multiomics survey
//!
//! For each calendar year every keyword combination is searched and the
//! returned PMIDs are merged into one set, so a study matching several
//! combinations is counted once. Queries run strictly one after another;
//! the rate limiter, not the CPU, bounds throughput.

use std::collections::HashSet;
use std::io::Write;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, instrument};

use crate::config::SurveyConfig;
use crate::error::Result;
use crate::keywords::{KeywordCombination, keyword_combinations};
use crate::pubmed::PubMedClient;
use crate::query::{DateRange, format_pubmed_date};

/// Where each surveyed year ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearEndPolicy {
    /// Always December 31, even past the overall end date
    #[default]
    CalendarYear,
    /// December 31, or the overall end date if that comes first
    ClampToUntil,
}

/// Unique multiomics studies found for one year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearReport {
    pub range: DateRange,
    pub unique_studies: usize,
}

/// Split `[from, until)` into per-year ranges
///
/// The first range starts at `from`, later ones on January 1. A year is only
/// surveyed while its start lies strictly before `until`, so `from == until`
/// yields no ranges.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use multiomics_survey::survey::{year_ranges, YearEndPolicy};
///
/// let from = NaiveDate::from_ymd_opt(2000, 6, 1).unwrap();
/// let until = NaiveDate::from_ymd_opt(2001, 3, 31).unwrap();
///
/// let ranges = year_ranges(from, until, YearEndPolicy::CalendarYear)?;
/// assert_eq!(ranges.len(), 2);
/// assert_eq!(ranges[1].until(), NaiveDate::from_ymd_opt(2001, 12, 31).unwrap());
/// # Ok::<(), multiomics_survey::PubMedError>(())
/// ```
pub fn year_ranges(
    from: NaiveDate,
    until: NaiveDate,
    policy: YearEndPolicy,
) -> Result<Vec<DateRange>> {
    let mut ranges = Vec::new();
    let mut current = from;

    while current < until {
        let Some(year_end) = NaiveDate::from_ymd_opt(current.year(), 12, 31) else {
            break;
        };
        let end = match policy {
            YearEndPolicy::CalendarYear => year_end,
            YearEndPolicy::ClampToUntil => year_end.min(until),
        };
        ranges.push(DateRange::new(current, end)?);

        match NaiveDate::from_ymd_opt(current.year() + 1, 1, 1) {
            Some(next) => current = next,
            None => break,
        }
    }

    Ok(ranges)
}

/// Counts multiomics studies per year
pub struct MultiomicsSurvey {
    client: PubMedClient,
    config: SurveyConfig,
    combinations: Vec<KeywordCombination>,
}

impl MultiomicsSurvey {
    /// Validate the configuration and precompute keyword combinations
    pub fn new(client: PubMedClient, config: SurveyConfig) -> Result<Self> {
        config.validate()?;
        let combinations = keyword_combinations(&config.keywords);
        info!(
            keywords = config.keywords.len(),
            combinations = combinations.len(),
            "Prepared keyword combinations"
        );

        Ok(Self {
            client,
            config,
            combinations,
        })
    }

    pub fn combinations(&self) -> &[KeywordCombination] {
        &self.combinations
    }

    pub fn year_ranges(&self) -> Result<Vec<DateRange>> {
        year_ranges(
            self.config.date_from,
            self.config.date_until,
            self.config.year_end,
        )
    }

    /// Survey every year, writing progress lines to `out`
    ///
    /// The first failing query aborts the run; years already reported stay
    /// written to `out`.
    #[instrument(skip_all, fields(from = %self.config.date_from, until = %self.config.date_until))]
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<Vec<YearReport>> {
        let mut reports = Vec::new();
        for range in self.year_ranges()? {
            reports.push(self.survey_year(&range, out).await?);
        }
        info!(years = reports.len(), "Survey finished");
        Ok(reports)
    }

    /// Search all combinations for one year and report the unique total
    pub async fn survey_year<W: Write>(
        &self,
        range: &DateRange,
        out: &mut W,
    ) -> Result<YearReport> {
        let from = format_pubmed_date(range.from());
        let until = format_pubmed_date(range.until());
        writeln!(out, "Finding multiomics studies between {from} and {until}")?;

        let mut studies: HashSet<String> = HashSet::new();
        for combination in &self.combinations {
            let outcome = self.client.search_combination(combination, range).await?;
            debug!(
                keywords = %combination,
                ids_returned = outcome.ids.len(),
                "Combination searched"
            );
            studies.extend(outcome.ids);
        }

        writeln!(
            out,
            "From {from} to {until} there were {} multiomics studies",
            studies.len()
        )?;
        info!(range = %range, unique_studies = studies.len(), "Year surveyed");

        Ok(YearReport {
            range: *range,
            unique_studies: studies.len(),
        })
    }
}

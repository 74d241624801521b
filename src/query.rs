//! ESearch URL construction
//!
//! Builds the publication-date range filter plus one `[Other Term]` filter
//! per keyword. PubMed treats the `AND`-joined filters conjunctively.

use std::fmt;

use chrono::NaiveDate;

use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::keywords::KeywordCombination;

const DATE_FORMAT: &str = "%Y/%m/%d";

/// Inclusive range of publication dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    from: NaiveDate,
    until: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `from > until`
    pub fn new(from: NaiveDate, until: NaiveDate) -> Result<Self> {
        if from > until {
            return Err(PubMedError::InvalidDateRange { from, until });
        }
        Ok(Self { from, until })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn until(&self) -> NaiveDate {
        self.until
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.from.format(DATE_FORMAT),
            self.until.format(DATE_FORMAT)
        )
    }
}

/// Format a date the way PubMed expects it (`YYYY/MM/DD`)
pub fn format_pubmed_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Plain-text search term for a combination and date range
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use multiomics_survey::keywords::{keyword_combinations, Keyword};
/// use multiomics_survey::query::{build_search_term, DateRange};
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2000, 12, 31).unwrap(),
/// )?;
/// let combinations = keyword_combinations(&[Keyword::Genomics, Keyword::Proteomics]);
/// let combination = &combinations[0];
///
/// assert_eq!(
///     build_search_term(combination, &range),
///     "2000/01/01[Date - Publication]:2000/12/31[Date - Publication] \
///      AND genomics[Other Term] AND proteomics[Other Term]"
/// );
/// # Ok::<(), multiomics_survey::PubMedError>(())
/// ```
pub fn build_search_term(combination: &KeywordCombination, range: &DateRange) -> String {
    let mut term = format!(
        "{}[Date - Publication]:{}[Date - Publication]",
        format_pubmed_date(range.from),
        format_pubmed_date(range.until)
    );
    for keyword in combination.keywords() {
        term.push_str(" AND ");
        term.push_str(keyword.as_str());
        term.push_str("[Other Term]");
    }
    term
}

/// Full ESearch URL for one keyword combination over `range`
///
/// Identification parameters are percent-encoded. The term keeps `/`, `[`,
/// `]` and `:` literal and encodes spaces as `+`, matching how the query is
/// usually written against E-utilities.
pub fn build_query_url(
    config: &ClientConfig,
    combination: &KeywordCombination,
    range: &DateRange,
) -> String {
    let mut url = format!(
        "{}/esearch.fcgi?db=pubmed&retmax={}",
        config.effective_base_url(),
        config.retmax
    );

    for (key, value) in config.build_api_params() {
        url.push('&');
        url.push_str(&key);
        url.push('=');
        url.push_str(&urlencoding::encode(&value));
    }

    url.push_str("&term=");
    url.push_str(&build_search_term(combination, range).replace(' ', "+"));
    url
}

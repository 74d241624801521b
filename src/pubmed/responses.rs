//! ESearch XML response types
//!
//! Only the top-level `Count`, `RetMax` and `IdList` are needed. Nested
//! `Count` elements inside `TranslationStack` are not direct children of
//! `eSearchResult` and are ignored by the deserializer.

use quick_xml::de::from_str;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{PubMedError, Result};
use crate::pubmed::models::SearchOutcome;

#[derive(Debug, Deserialize)]
pub(crate) struct ESearchResult {
    #[serde(rename = "Count", default)]
    pub count: Option<u64>,
    #[serde(rename = "RetMax", default)]
    pub ret_max: Option<u64>,
    #[serde(rename = "RetStart", default)]
    pub ret_start: Option<u64>,
    #[serde(rename = "IdList", default)]
    pub id_list: IdList,
    #[serde(rename = "QueryTranslation", default)]
    pub query_translation: Option<String>,
    #[serde(rename = "ERROR", default)]
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct IdList {
    #[serde(rename = "Id", default)]
    pub ids: Vec<String>,
}

/// Parse an ESearch XML body into a [`SearchOutcome`]
///
/// # Errors
///
/// * `PubMedError::XmlError` - malformed XML, or `Count`/`RetMax` missing
/// * `PubMedError::ApiError` - the body carries an `ERROR` element
///
/// # Example
///
/// ```
/// use multiomics_survey::pubmed::parse_search_outcome;
///
/// let xml = "<eSearchResult><Count>2</Count><RetMax>2</RetMax>\
///            <IdList><Id>12465651</Id><Id> 12159840 </Id></IdList></eSearchResult>";
/// let outcome = parse_search_outcome(xml)?;
/// assert_eq!(outcome.ids, vec!["12465651", "12159840"]);
/// # Ok::<(), multiomics_survey::PubMedError>(())
/// ```
#[instrument(skip(xml), fields(xml_size = xml.len()))]
pub fn parse_search_outcome(xml: &str) -> Result<SearchOutcome> {
    let result: ESearchResult = from_str(xml)
        .map_err(|e| PubMedError::XmlError(format!("Failed to deserialize ESearch XML: {e}")))?;

    // NCBI reports some failures with HTTP 200 and an ERROR element
    if let Some(message) = result.error {
        return Err(PubMedError::ApiError {
            status: 200,
            message: format!("NCBI ESearch API error: {}", message.trim()),
        });
    }

    let count = result
        .count
        .ok_or_else(|| PubMedError::XmlError("ESearch response has no Count".to_string()))?;
    let ret_max = result
        .ret_max
        .ok_or_else(|| PubMedError::XmlError("ESearch response has no RetMax".to_string()))?;

    debug!(
        count,
        ret_max,
        ret_start = ?result.ret_start,
        query_translation = ?result.query_translation,
        "Parsed ESearch response"
    );

    let ids = result
        .id_list
        .ids
        .into_iter()
        .map(|id| id.trim().to_string())
        .collect();

    Ok(SearchOutcome {
        count,
        ret_max,
        ids,
    })
}

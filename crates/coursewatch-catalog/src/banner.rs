//! Banner self-service search client.
//!
//! Talks to an Ellucian Banner "StudentRegistrationSsb" deployment the way
//! a browser session does: pick up cookies on the term-selection page,
//! submit the term-search form, then read the JSON search results. The
//! search endpoints only answer within a term-scoped session, which is why
//! the three steps must happen in order on one cookie jar.

use crate::{CatalogError, CatalogResult, CatalogSource};
use async_trait::async_trait;
use coursewatch_model::{Offering, Snapshot};
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

/// Restricts which sections are kept for offerings whose course number
/// starts with a given prefix. Offerings outside the prefix pass through
/// unfiltered.
#[derive(Debug, Clone)]
pub struct SectionFilter {
    /// Course-number prefix the filter applies to (e.g. `"4"`).
    pub number_prefix: String,
    /// Sections kept for matching numbers.
    pub keep_sections: Vec<String>,
}

impl SectionFilter {
    fn keeps(&self, offering: &Offering) -> bool {
        !offering.number.starts_with(&self.number_prefix)
            || self.keep_sections.iter().any(|section| *section == offering.section)
    }
}

/// Configuration for [`BannerCatalog`].
#[derive(Debug, Clone)]
pub struct BannerConfig {
    /// Base URL of the StudentRegistrationSsb deployment, without a
    /// trailing slash.
    pub base_url: String,
    /// Term code to search (e.g. `"202330"`).
    pub term: String,
    /// Subject code (e.g. `"COSC"`).
    pub subject: String,
    /// Inclusive course-number range submitted with the search.
    pub number_low: String,
    pub number_high: String,
    /// Optional section restriction applied to the results.
    pub section_filter: Option<SectionFilter>,
    /// Maximum results requested per search.
    pub page_size: u32,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://bn-reg.uis.georgetown.edu/StudentRegistrationSsb".to_string(),
            term: "202330".to_string(),
            subject: "COSC".to_string(),
            number_low: "4000".to_string(),
            number_high: "6999".to_string(),
            section_filter: None,
            page_size: 500,
        }
    }
}

/// Client for a Banner-style self-service search.
pub struct BannerCatalog {
    config: BannerConfig,
    client: Client,
}

impl BannerCatalog {
    /// Creates a client for the given deployment.
    ///
    /// Fails only if the underlying HTTP client cannot be constructed.
    pub fn new(config: BannerConfig) -> CatalogResult<Self> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self { config, client })
    }

    /// Opens the term-selection page to pick up session cookies, and
    /// generates the client-side search id Banner expects alongside them.
    async fn establish_session(&self) -> CatalogResult<String> {
        let url = format!("{}/ssb/term/termSelection?mode=search", self.config.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::Session(format!(
                "term selection returned {}",
                response.status()
            )));
        }

        let session_id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(18)
            .map(char::from)
            .collect();
        debug!(%session_id, "search session established");
        Ok(session_id)
    }

    /// Submits the term-search form, scoping the session to the term.
    async fn select_term(&self, session_id: &str) -> CatalogResult<()> {
        let url = format!("{}/ssb/term/search?mode=search", self.config.base_url);
        let form = [
            ("term", self.config.term.as_str()),
            ("studyPath", ""),
            ("studyPathText", ""),
            ("startDatepicker", ""),
            ("endDatepicker", ""),
            ("uniqueSessionId", session_id),
        ];
        let response = self.client.post(&url).form(&form).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::Session(format!(
                "term search returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Runs the course search and returns the raw result entries.
    async fn search(&self, session_id: &str) -> CatalogResult<Vec<SearchEntry>> {
        let url = format!("{}/ssb/searchResults/searchResults", self.config.base_url);
        let page_size = self.config.page_size.to_string();
        let results: SearchResults = self
            .client
            .get(&url)
            .query(&[
                ("txt_subject", self.config.subject.as_str()),
                ("txt_course_number_range", self.config.number_low.as_str()),
                ("txt_course_number_range_to", self.config.number_high.as_str()),
                ("txt_term", self.config.term.as_str()),
                ("uniqueSessionId", session_id),
                ("pageMaxSize", page_size.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // Banner answers 200 with a null data field when the session was
        // not accepted.
        results.data.ok_or_else(|| {
            CatalogError::Payload("search results carried no data array".to_string())
        })
    }
}

#[async_trait]
impl CatalogSource for BannerCatalog {
    fn source_name(&self) -> &'static str {
        "banner"
    }

    async fn fetch(&self) -> CatalogResult<Snapshot> {
        let session_id = self.establish_session().await?;
        self.select_term(&session_id).await?;
        let entries = self.search(&session_id).await?;
        info!(count = entries.len(), term = %self.config.term, "catalog search returned");

        let mut snapshot = Snapshot::new();
        for entry in entries {
            let offering = entry.into_offering()?;
            if let Some(filter) = &self.config.section_filter {
                if !filter.keeps(&offering) {
                    continue;
                }
            }
            snapshot.insert(offering);
        }
        Ok(snapshot)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    data: Option<Vec<SearchEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchEntry {
    // Banner serves record ids as numbers; everything downstream is
    // string-keyed, so the conversion happens here.
    id: Value,
    course_number: String,
    sequence_number: String,
    course_title: String,
    course_reference_number: String,
}

impl SearchEntry {
    fn into_offering(self) -> CatalogResult<Offering> {
        let id = match self.id {
            Value::String(id) => id,
            Value::Number(id) => id.to_string(),
            other => {
                return Err(CatalogError::Payload(format!(
                    "record id is neither string nor number: {other}"
                )));
            }
        };
        Ok(Offering {
            id,
            number: self.course_number,
            section: self.sequence_number,
            name: self.course_title.trim().to_string(),
            crn: self.course_reference_number,
        })
    }
}

//! # Query Filter
//!
//! Caller-side pagination, sort, date-range and search options for list
//! endpoints, flattened into the key/value map sent as the query string.
//!
//! Only the options a caller actually set are emitted; the server applies its
//! own defaults for the rest. Accessors on [`QueryFilter`] report the effective
//! value (set or default) so callers never have to repeat the defaults.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::error::FrameworkError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 250;

pub const PAGE_KEY: &str = "page";
pub const LIMIT_KEY: &str = "limit";
pub const SORT_KEY: &str = "sort";
pub const CREATED_AFTER_KEY: &str = "createdAfter";
pub const CREATED_BEFORE_KEY: &str = "createdBefore";
pub const UPDATED_AFTER_KEY: &str = "updatedAfter";
pub const UPDATED_BEFORE_KEY: &str = "updatedBefore";
pub const INCLUDE_ARCHIVED_KEY: &str = "includeArchived";
pub const SEARCH_KEY: &str = "search";

/// Order in which list results are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = FrameworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            other => Err(FrameworkError::InvalidFilter(format!(
                "unknown sort direction `{other}`"
            ))),
        }
    }
}

/// Immutable set of list-endpoint parameters.
///
/// Built with [`QueryFilter::builder`]; `QueryFilter::default()` sets nothing
/// and therefore serializes to an empty map.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryFilter {
    page: Option<u32>,
    limit: Option<u32>,
    sort: Option<SortDirection>,
    created_after: Option<DateTime<Utc>>,
    created_before: Option<DateTime<Utc>>,
    updated_after: Option<DateTime<Utc>>,
    updated_before: Option<DateTime<Utc>>,
    include_archived: Option<bool>,
    search: Option<String>,
}

impl QueryFilter {
    pub fn builder() -> QueryFilterBuilder {
        QueryFilterBuilder::default()
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    pub fn sort(&self) -> SortDirection {
        self.sort.unwrap_or_default()
    }

    pub fn created_after(&self) -> Option<DateTime<Utc>> {
        self.created_after
    }

    pub fn created_before(&self) -> Option<DateTime<Utc>> {
        self.created_before
    }

    pub fn updated_after(&self) -> Option<DateTime<Utc>> {
        self.updated_after
    }

    pub fn updated_before(&self) -> Option<DateTime<Utc>> {
        self.updated_before
    }

    pub fn include_archived(&self) -> bool {
        self.include_archived.unwrap_or(false)
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Same filter pointed at another page (clamped to at least 1).
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: Some(page.max(DEFAULT_PAGE)),
            ..self.clone()
        }
    }

    /// Flat parameter map holding only the options that were set.
    pub fn as_record(&self) -> BTreeMap<String, String> {
        let mut record = BTreeMap::new();
        let mut put = |key: &str, value: String| {
            record.insert(key.to_string(), value);
        };

        if let Some(page) = self.page {
            put(PAGE_KEY, page.to_string());
        }
        if let Some(limit) = self.limit {
            put(LIMIT_KEY, limit.to_string());
        }
        if let Some(sort) = self.sort {
            put(SORT_KEY, sort.to_string());
        }
        if let Some(ts) = self.created_after {
            put(CREATED_AFTER_KEY, format_timestamp(ts));
        }
        if let Some(ts) = self.created_before {
            put(CREATED_BEFORE_KEY, format_timestamp(ts));
        }
        if let Some(ts) = self.updated_after {
            put(UPDATED_AFTER_KEY, format_timestamp(ts));
        }
        if let Some(ts) = self.updated_before {
            put(UPDATED_BEFORE_KEY, format_timestamp(ts));
        }
        if let Some(include) = self.include_archived {
            put(INCLUDE_ARCHIVED_KEY, include.to_string());
        }
        if let Some(search) = &self.search {
            put(SEARCH_KEY, search.clone());
        }

        record
    }

    /// Recovers a filter from a parameter map, validating strictly.
    ///
    /// Unknown keys are ignored so a full query string can be passed through.
    pub fn from_record<I, K, V>(record: I) -> Result<Self, FrameworkError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut builder = QueryFilter::builder();
        for (key, value) in record {
            let value = value.as_ref();
            builder = match key.as_ref() {
                PAGE_KEY => builder.page(parse_number(PAGE_KEY, value)?),
                LIMIT_KEY => builder.limit(parse_number(LIMIT_KEY, value)?),
                SORT_KEY => builder.sort(value.parse()?),
                CREATED_AFTER_KEY => builder.created_after(parse_timestamp(CREATED_AFTER_KEY, value)?),
                CREATED_BEFORE_KEY => {
                    builder.created_before(parse_timestamp(CREATED_BEFORE_KEY, value)?)
                }
                UPDATED_AFTER_KEY => builder.updated_after(parse_timestamp(UPDATED_AFTER_KEY, value)?),
                UPDATED_BEFORE_KEY => {
                    builder.updated_before(parse_timestamp(UPDATED_BEFORE_KEY, value)?)
                }
                INCLUDE_ARCHIVED_KEY => builder.include_archived(parse_bool(value)?),
                SEARCH_KEY => builder.search(value),
                _ => builder,
            };
        }
        builder.try_build()
    }

    /// Appends the set parameters to `url`'s query string.
    pub fn append_to(&self, url: &mut Url) {
        let record = self.as_record();
        if record.is_empty() {
            return;
        }
        url.query_pairs_mut().extend_pairs(record.iter());
    }
}

/// Builder for [`QueryFilter`].
///
/// [`build`](QueryFilterBuilder::build) clamps out-of-range page and limit
/// values; [`try_build`](QueryFilterBuilder::try_build) rejects them.
#[derive(Debug, Clone, Default)]
pub struct QueryFilterBuilder {
    filter: QueryFilter,
}

impl QueryFilterBuilder {
    pub fn page(mut self, page: u32) -> Self {
        self.filter.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.filter.limit = Some(limit);
        self
    }

    pub fn sort(mut self, sort: SortDirection) -> Self {
        self.filter.sort = Some(sort);
        self
    }

    pub fn created_after(mut self, ts: DateTime<Utc>) -> Self {
        self.filter.created_after = Some(ts);
        self
    }

    pub fn created_before(mut self, ts: DateTime<Utc>) -> Self {
        self.filter.created_before = Some(ts);
        self
    }

    pub fn updated_after(mut self, ts: DateTime<Utc>) -> Self {
        self.filter.updated_after = Some(ts);
        self
    }

    pub fn updated_before(mut self, ts: DateTime<Utc>) -> Self {
        self.filter.updated_before = Some(ts);
        self
    }

    pub fn include_archived(mut self, include: bool) -> Self {
        self.filter.include_archived = Some(include);
        self
    }

    /// Sets the free-text term; blank terms leave search unset.
    pub fn search(mut self, term: impl AsRef<str>) -> Self {
        let term = term.as_ref().trim();
        self.filter.search = (!term.is_empty()).then(|| term.to_string());
        self
    }

    /// Builds the filter, clamping page to ≥ 1 and limit to `1..=MAX_LIMIT`.
    pub fn build(self) -> QueryFilter {
        let mut filter = self.filter;

        if let Some(page) = filter.page {
            if page < DEFAULT_PAGE {
                warn!(page, "Clamping page to 1");
                filter.page = Some(DEFAULT_PAGE);
            }
        }
        if let Some(limit) = filter.limit {
            let clamped = limit.clamp(1, MAX_LIMIT);
            if clamped != limit {
                warn!(limit, clamped, "Clamping limit");
                filter.limit = Some(clamped);
            }
        }

        filter
    }

    /// Builds the filter, rejecting page < 1 or limit outside `1..=MAX_LIMIT`.
    pub fn try_build(self) -> Result<QueryFilter, FrameworkError> {
        if let Some(page) = self.filter.page {
            if page < DEFAULT_PAGE {
                return Err(FrameworkError::InvalidFilter(format!(
                    "page must be at least 1, got {page}"
                )));
            }
        }
        if let Some(limit) = self.filter.limit {
            if !(1..=MAX_LIMIT).contains(&limit) {
                return Err(FrameworkError::InvalidFilter(format!(
                    "limit must be between 1 and {MAX_LIMIT}, got {limit}"
                )));
            }
        }
        Ok(self.filter)
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_timestamp(key: &str, value: &str) -> Result<DateTime<Utc>, FrameworkError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| FrameworkError::InvalidFilter(format!("{key}: {e}")))
}

fn parse_number(key: &str, value: &str) -> Result<u32, FrameworkError> {
    value
        .parse()
        .map_err(|e| FrameworkError::InvalidFilter(format!("{key}: {e}")))
}

fn parse_bool(value: &str) -> Result<bool, FrameworkError> {
    value
        .parse()
        .map_err(|e| FrameworkError::InvalidFilter(format!("{INCLUDE_ARCHIVED_KEY}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn page_and_limit_only() {
        let filter = QueryFilter::builder().page(2).limit(10).build();
        assert_eq!(filter.as_record(), record(&[("page", "2"), ("limit", "10")]));
    }

    #[test]
    fn default_filter_is_empty_but_reports_defaults() {
        let filter = QueryFilter::default();
        assert!(filter.as_record().is_empty());
        assert_eq!(filter.page(), DEFAULT_PAGE);
        assert_eq!(filter.limit(), DEFAULT_LIMIT);
        assert_eq!(filter.sort(), SortDirection::Ascending);
        assert!(!filter.include_archived());
    }

    #[test]
    fn every_option_is_stringified() {
        let after = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let before = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let filter = QueryFilter::builder()
            .page(3)
            .limit(50)
            .sort(SortDirection::Descending)
            .created_after(after)
            .created_before(before)
            .include_archived(true)
            .search("  pasta ")
            .build();

        assert_eq!(
            filter.as_record(),
            record(&[
                ("page", "3"),
                ("limit", "50"),
                ("sort", "desc"),
                ("createdAfter", "2024-01-02T03:04:05Z"),
                ("createdBefore", "2024-06-01T00:00:00Z"),
                ("includeArchived", "true"),
                ("search", "pasta"),
            ])
        );
    }

    #[test]
    fn blank_search_is_omitted() {
        let filter = QueryFilter::builder().search("   ").build();
        assert!(filter.search().is_none());
        assert!(!filter.as_record().contains_key(SEARCH_KEY));
    }

    #[test]
    fn build_clamps_out_of_range_values() {
        let filter = QueryFilter::builder().page(0).limit(1000).build();
        assert_eq!(filter.page(), 1);
        assert_eq!(filter.limit(), MAX_LIMIT);

        let filter = QueryFilter::builder().limit(0).build();
        assert_eq!(filter.limit(), 1);
    }

    #[test]
    fn try_build_rejects_out_of_range_values() {
        assert!(matches!(
            QueryFilter::builder().page(0).try_build(),
            Err(FrameworkError::InvalidFilter(_))
        ));
        assert!(matches!(
            QueryFilter::builder().limit(MAX_LIMIT + 1).try_build(),
            Err(FrameworkError::InvalidFilter(_))
        ));
        assert!(QueryFilter::builder().limit(MAX_LIMIT).try_build().is_ok());
    }

    #[test]
    fn record_round_trips() {
        let filter = QueryFilter::builder()
            .page(7)
            .limit(25)
            .sort(SortDirection::Descending)
            .updated_after(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap())
            .updated_before(Utc.timestamp_opt(1_700_000_000, 123_000_000).unwrap())
            .include_archived(false)
            .search("tomato soup")
            .build();

        let parsed = QueryFilter::from_record(filter.as_record()).unwrap();
        assert_eq!(parsed, filter);
    }

    #[test]
    fn from_record_rejects_garbage() {
        assert!(QueryFilter::from_record(record(&[("page", "two")])).is_err());
        assert!(QueryFilter::from_record(record(&[("sort", "sideways")])).is_err());
        assert!(QueryFilter::from_record(record(&[("createdAfter", "yesterday")])).is_err());
        assert!(QueryFilter::from_record(record(&[("limit", "0")])).is_err());
    }

    #[test]
    fn from_record_ignores_unknown_keys() {
        let parsed = QueryFilter::from_record(record(&[("q", "soup"), ("page", "4")])).unwrap();
        assert_eq!(parsed, QueryFilter::builder().page(4).build());
    }

    #[test]
    fn building_twice_is_idempotent() {
        let build = || {
            QueryFilter::builder()
                .page(2)
                .limit(10)
                .search("pasta")
                .build()
                .as_record()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn with_page_keeps_other_options() {
        let filter = QueryFilter::builder().limit(10).search("rice").build();
        let next = filter.with_page(2);
        assert_eq!(next.page(), 2);
        assert_eq!(next.limit(), 10);
        assert_eq!(next.search(), Some("rice"));
        assert_eq!(filter.with_page(0).page(), 1);
    }

    #[test]
    fn append_to_url_encodes_values() {
        let mut url = Url::parse("https://api.example.com/api/v1/recipes").unwrap();
        QueryFilter::builder().page(2).search("mac & cheese").build().append_to(&mut url);
        assert_eq!(url.query(), Some("page=2&search=mac+%26+cheese"));
    }
}

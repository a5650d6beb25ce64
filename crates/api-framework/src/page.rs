//! # Query Filtered Result
//!
//! One page of entities from a list endpoint, assembled from the envelope's
//! payload and pagination block.

use serde::Serialize;
use tracing::debug;

use crate::envelope::{ApiResponse, Pagination};
use crate::error::FrameworkError;
use crate::query::{QueryFilter, DEFAULT_PAGE};

const LEFT_EDGE: u32 = 2;
const LEFT_CURRENT: u32 = 2;
const RIGHT_CURRENT: u32 = 4;
const RIGHT_EDGE: u32 = 2;

/// A page of `T` plus the counts needed to paginate further.
///
/// Invariant: `data.len() <= limit`, `page >= 1`, `limit >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFilteredResult<T> {
    data: Vec<T>,
    page: u32,
    limit: u32,
    total_count: u64,
    filtered_count: u64,
}

impl<T> QueryFilteredResult<T> {
    /// Assembles a page, recovering absent or inconsistent pagination.
    ///
    /// Without pagination both counts equal the number of entities, the page is
    /// 1 and the limit is the number of entities (at least 1). A missing
    /// `filteredCount` falls back to `totalCount`.
    pub fn new(data: Vec<T>, pagination: Option<Pagination>) -> Self {
        let len = data.len() as u64;
        let len_limit = u32::try_from(data.len()).unwrap_or(u32::MAX).max(1);

        let Some(p) = pagination else {
            return Self {
                data,
                page: DEFAULT_PAGE,
                limit: len_limit,
                total_count: len,
                filtered_count: len,
            };
        };

        let page = p.page.max(DEFAULT_PAGE);
        let limit = p.limit.max(len_limit);
        let total_count = p.total_count.max(len);
        let filtered_count = match p.filtered_count {
            Some(filtered) => filtered.max(len),
            None => total_count,
        };
        if page != p.page || limit != p.limit || total_count != p.total_count {
            debug!(?p, page, limit, total_count, "Recovered malformed pagination");
        }

        Self {
            data,
            page,
            limit,
            total_count,
            filtered_count,
        }
    }

    /// Builds the page from a checked envelope; a missing payload is an empty page.
    pub fn from_envelope(envelope: ApiResponse<Vec<T>>) -> Result<Self, FrameworkError> {
        let envelope = envelope.into_checked()?;
        Ok(Self::new(envelope.data.unwrap_or_default(), envelope.pagination))
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn filtered_count(&self) -> u64 {
        self.filtered_count
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn into_inner(self) -> Vec<T> {
        self.data
    }

    /// Number of pages needed for all filtered entities (0 when there are none).
    pub fn total_pages(&self) -> u32 {
        let pages = self.filtered_count.div_ceil(u64::from(self.limit));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    /// `filter` moved to the following page, or `None` on the last page.
    pub fn next_filter(&self, filter: &QueryFilter) -> Option<QueryFilter> {
        self.has_next_page()
            .then(|| filter.with_page(self.page.saturating_add(1)))
    }

    /// Page numbers for pagination controls; `None` marks a gap.
    ///
    /// Shows the first and last two pages plus two before and four after the
    /// current one.
    pub fn page_window(&self) -> Vec<Option<u32>> {
        let last = self.total_pages();
        window(last, self.page.min(last))
    }

    /// Converts every entity, keeping the counts.
    pub fn map<U, F>(self, f: F) -> QueryFilteredResult<U>
    where
        F: FnMut(T) -> U,
    {
        QueryFilteredResult {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total_count: self.total_count,
            filtered_count: self.filtered_count,
        }
    }
}

impl<T> IntoIterator for QueryFilteredResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a QueryFilteredResult<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

fn window(last: u32, current: u32) -> Vec<Option<u32>> {
    if last == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + LEFT_EDGE).min(last.saturating_add(1));
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current.saturating_sub(LEFT_CURRENT));
    let mid_end = current
        .saturating_add(RIGHT_CURRENT + 1)
        .min(last.saturating_add(1));
    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last.saturating_sub(RIGHT_EDGE) + 1);
    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last).map(Some));

    pages
}

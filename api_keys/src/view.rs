//! Derivation of the visible key list from the full record set.
//!
//! Everything here is pure: the same records and list state always yield
//! the same page.
use db::models::key::{ApiKey, KeyStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn matches(&self, status: KeyStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == KeyStatus::Active,
            StatusFilter::Inactive => status == KeyStatus::Inactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyPage<'a> {
    pub visible_page: Vec<&'a ApiKey>,
    pub total_pages: usize,
    pub effective_page: usize,
    pub total_filtered: usize,
}

/// Case-insensitive substring match on name, description or key.
pub fn matches_search(record: &ApiKey, search_term: &str) -> bool {
    if search_term.is_empty() {
        return true;
    }
    let needle = search_term.to_lowercase();
    [&record.name, &record.description, &record.key]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Records passing both the search and the status predicate, in their
/// original order.
pub fn filter<'a>(
    records: &'a [ApiKey],
    search_term: &str,
    status_filter: StatusFilter,
) -> Vec<&'a ApiKey> {
    records
        .iter()
        .filter(|r| matches_search(r, search_term) && status_filter.matches(r.status))
        .collect()
}

pub fn total_pages(filtered: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    filtered.div_ceil(page_size)
}

pub fn derive<'a>(
    records: &'a [ApiKey],
    search_term: &str,
    status_filter: StatusFilter,
    page: usize,
    page_size: usize,
) -> KeyPage<'a> {
    let filtered = filter(records, search_term, status_filter);
    let effective_page = page.max(1);
    let start = (effective_page - 1).saturating_mul(page_size);

    KeyPage {
        total_pages: total_pages(filtered.len(), page_size),
        total_filtered: filtered.len(),
        visible_page: filtered.into_iter().skip(start).take(page_size).collect(),
        effective_page,
    }
}

/// Search term, status filter and page of the key list.
///
/// The page goes back to 1 whenever the search term or the status filter
/// changes, and whenever the owner calls `reset_page` after the record set
/// changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListState {
    search_term: String,
    status_filter: StatusFilter,
    page: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            status_filter: StatusFilter::All,
            page: 1,
        }
    }
}

impl ListState {
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_search_term(&mut self, search_term: impl Into<String>) {
        let search_term = search_term.into();
        if search_term != self.search_term {
            self.search_term = search_term;
            self.reset_page();
        }
    }

    pub fn set_status_filter(&mut self, status_filter: StatusFilter) {
        if status_filter != self.status_filter {
            self.status_filter = status_filter;
            self.reset_page();
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page = self.page.saturating_add(1).min(total_pages).max(1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn derive<'a>(&self, records: &'a [ApiKey], page_size: usize) -> KeyPage<'a> {
        derive(
            records,
            &self.search_term,
            self.status_filter,
            self.page,
            page_size,
        )
    }
}

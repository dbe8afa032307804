//! Search, filter and pagination state for list pages.
//!
//! [`ListQueryState::derive`] is a pure function of the state and a record
//! slice: filters apply in a fixed order (category, status, free text), the
//! source order is preserved, and the current page is cut from the result.

use std::num::NonZeroUsize;

use shared::{
    domain::{Filter, Record},
    protocol::{ListParams, SortSpec},
};

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(size) => size,
    None => panic!("default page size must be non-zero"),
};

/// Why a derived page has no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The collection itself is empty.
    NoRecords,
    /// Records exist, but none pass the current filters.
    NoMatches,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a, R> {
    pub visible: Vec<&'a R>,
    pub total_count: usize,
    pub total_pages: usize,
    /// Effective page index after clamping.
    pub page: usize,
    pub source_count: usize,
}

impl<R> DerivedView<'_, R> {
    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.source_count == 0 {
            Some(EmptyState::NoRecords)
        } else if self.total_count == 0 {
            Some(EmptyState::NoMatches)
        } else {
            None
        }
    }
}

/// `max(1, ceil(total / page_size))`.
pub fn total_pages(total_count: usize, page_size: NonZeroUsize) -> usize {
    total_count.div_ceil(page_size.get()).max(1)
}

fn last_page(total_pages: usize) -> usize {
    total_pages.max(1) - 1
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListQueryState<R: Record> {
    search_text: String,
    category: Filter<R::Category>,
    status: Filter<R::Status>,
    page: usize,
    page_size: NonZeroUsize,
    sort: Option<SortSpec>,
    search_fields: Vec<R::Field>,
}

impl<R: Record> Default for ListQueryState<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> ListQueryState<R> {
    pub fn new() -> Self {
        Self {
            search_text: String::new(),
            category: Filter::All,
            status: Filter::All,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            search_fields: R::DEFAULT_SEARCH_FIELDS.to_vec(),
        }
    }

    pub fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Replaces the record kind's default searchable fields.
    pub fn with_search_fields(mut self, fields: &[R::Field]) -> Self {
        self.search_fields = fields.to_vec();
        self
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn category_filter(&self) -> Filter<R::Category> {
        self.category
    }

    pub fn status_filter(&self) -> Filter<R::Status> {
        self.status
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn search_fields(&self) -> &[R::Field] {
        &self.search_fields
    }

    pub fn is_filtering(&self) -> bool {
        !self.search_text.is_empty() || !self.category.is_all() || !self.status.is_all()
    }

    /// Stores the trimmed text. Returns whether the query changed; a change
    /// resets the page.
    pub fn set_search_text(&mut self, text: &str) -> bool {
        let text = text.trim();
        if self.search_text == text {
            return false;
        }
        self.search_text = text.to_string();
        self.page = 0;
        true
    }

    pub fn set_category_filter(&mut self, filter: Filter<R::Category>) -> bool {
        if self.category == filter {
            return false;
        }
        self.category = filter;
        self.page = 0;
        true
    }

    pub fn set_status_filter(&mut self, filter: Filter<R::Status>) -> bool {
        if self.status == filter {
            return false;
        }
        self.status = filter;
        self.page = 0;
        true
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) -> bool {
        if self.page_size == page_size {
            return false;
        }
        self.page_size = page_size;
        self.page = 0;
        true
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> bool {
        if self.sort == sort {
            return false;
        }
        self.sort = sort;
        self.page = 0;
        true
    }

    /// Clears search text and both filters; keeps page size and sort.
    pub fn clear_filters(&mut self) -> bool {
        let changed = self.is_filtering() || self.page != 0;
        self.search_text.clear();
        self.category = Filter::All;
        self.status = Filter::All;
        self.page = 0;
        changed
    }

    /// Moves to `page`, clamped to `[0, total_pages - 1]`.
    pub fn set_page(&mut self, page: usize, total_pages: usize) -> bool {
        let page = page.min(last_page(total_pages));
        if self.page == page {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next_page(&mut self, total_pages: usize) -> bool {
        if self.page >= last_page(total_pages) {
            return false;
        }
        self.page += 1;
        true
    }

    /// Steps back from the visible page, which may sit below a stored index
    /// left over from a larger collection. Returns whether the visible page
    /// moved.
    pub fn prev_page(&mut self, total_pages: usize) -> bool {
        let visible = self.page.min(last_page(total_pages));
        if visible == 0 {
            self.page = 0;
            return false;
        }
        self.page = visible - 1;
        true
    }

    /// Pulls the page index back into range for `total_count` records.
    pub fn clamp_page(&mut self, total_count: usize) -> usize {
        self.page = self.page.min(last_page(total_pages(total_count, self.page_size)));
        self.page
    }

    pub fn matches(&self, record: &R) -> bool {
        if !self.category.matches(record.category()) {
            return false;
        }
        if !self.status.matches(record.status()) {
            return false;
        }
        if self.search_text.is_empty() {
            return true;
        }
        let needle = self.search_text.to_lowercase();
        self.search_fields.iter().any(|field| {
            record
                .field_text(*field)
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
    }

    pub fn derive<'a>(&self, records: &'a [R]) -> DerivedView<'a, R> {
        let filtered: Vec<&'a R> = records.iter().filter(|record| self.matches(record)).collect();
        let total_count = filtered.len();
        let total_pages = total_pages(total_count, self.page_size);
        let page = self.page.min(total_pages - 1);
        let visible = filtered
            .into_iter()
            .skip(page * self.page_size.get())
            .take(self.page_size.get())
            .collect();

        DerivedView {
            visible,
            total_count,
            total_pages,
            page,
            source_count: records.len(),
        }
    }

    /// Parameters for a backend that filters and paginates itself.
    pub fn list_params(&self) -> ListParams {
        ListParams {
            page: Some(self.page),
            size: Some(self.page_size.get()),
            search: (!self.search_text.is_empty()).then(|| self.search_text.clone()),
            category: None,
            status: None,
            sort: self.sort.clone(),
        }
        .with_filters(&self.category, &self.status)
    }
}

#[cfg(test)]
#[path = "tests/list_query_tests.rs"]
mod tests;

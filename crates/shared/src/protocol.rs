use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Filter;

/// One page of a remote list call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// A single page holding every record, for backends without pagination.
    pub fn single(content: Vec<T>) -> Self {
        let total_elements = content.len() as u64;
        Self {
            content,
            total_elements,
            total_pages: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// `field,direction`, the form list endpoints accept in `sort`.
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.field, self.direction.as_str())
    }
}

/// Parameters of a remote list call. Categorical filters travel as their wire
/// spelling; `None` means no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListParams {
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub sort: Option<SortSpec>,
}

impl ListParams {
    pub fn with_filters<C: ToString, S: ToString>(
        mut self,
        category: &Filter<C>,
        status: &Filter<S>,
    ) -> Self {
        if let Filter::Only(value) = category {
            self.category = Some(value.to_string());
        }
        if let Filter::Only(value) = status {
            self.status = Some(value.to_string());
        }
        self
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.to_query_value()));
        }
        pairs
    }
}

/// Aggregate counters for a collection, keyed by counter name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceStats(pub BTreeMap<String, u64>);

impl ResourceStats {
    pub fn get(&self, counter: &str) -> Option<u64> {
        self.0.get(counter).copied()
    }

    /// The `total` counter, falling back to the sum of every other counter.
    pub fn total(&self) -> u64 {
        self.get("total")
            .unwrap_or_else(|| self.0.values().sum())
    }
}

//! The paginated, searchable, sortable listing protocol.
//!
//! A [`ListingQuery`] is the normalized descriptor of one listing request;
//! [`run`] turns a descriptor plus the full record set into a bounded
//! [`UserPage`]. Both sides of the wire share these types: the server
//! answers with a serialized `UserPage`, the client keys its result cache
//! on the descriptor itself.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Upper bound on `pageSize`.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Sanity ceiling on `page`.
pub const MAX_PAGE: i64 = 1_000_000;

/// Fields the listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Email,
    Group,
}

impl SortField {
    /// Parse a raw `sortBy` parameter. Anything unrecognized degrades to
    /// `None` (unsorted) rather than an error.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw {
            Some("name") => Some(Self::Name),
            Some("email") => Some(Self::Email),
            Some("group") => Some(Self::Group),
            _ => None,
        }
    }

    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Group => "group",
        }
    }
}

/// Sort direction. Anything other than `desc` is ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A normalized listing descriptor.
///
/// Derives `Eq + Hash`: the descriptor itself is the client cache key, so
/// structurally equal requests always share an entry regardless of how
/// they were built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingQuery {
    /// 1-based page number.
    pub page: i64,
    pub page_size: i64,
    /// Trimmed, lower-cased search text; empty means no filter.
    pub search: String,
    pub sort_by: Option<SortField>,
    pub sort_dir: SortDir,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            sort_by: None,
            sort_dir: SortDir::Asc,
        }
    }
}

impl ListingQuery {
    /// Build a descriptor from raw request parameters.
    ///
    /// Invalid values are clamped or degraded, never rejected: `page` is
    /// clamped to `[1, MAX_PAGE]`, `pageSize` to `[1, MAX_PAGE_SIZE]`,
    /// search text is trimmed and lower-cased, and an unrecognized
    /// `sortBy` falls back to unsorted.
    pub fn from_params(
        page: Option<i64>,
        page_size: Option<i64>,
        search: Option<&str>,
        sort_by: Option<&str>,
        sort_dir: Option<&str>,
    ) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, MAX_PAGE),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            search: search.unwrap_or("").trim().to_lowercase(),
            sort_by: SortField::parse(sort_by),
            sort_dir: SortDir::parse(sort_dir),
        }
    }

    /// The same filter and sort, pointed at another page.
    pub fn with_page(&self, page: i64) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

/// One page of listing results, echoing the descriptor it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub items: Vec<User>,
    pub page: i64,
    pub page_size: i64,
    /// Filtered set size before pagination.
    pub total: i64,
    pub total_pages: i64,
    pub sort_by: Option<SortField>,
    pub sort_dir: SortDir,
    pub search: String,
}

/// Run a listing query over the full record set.
///
/// `records` must be in insertion (id) order; filtering and the stable
/// sort preserve that order among equal keys. Defined for every
/// descriptor — a page beyond the last yields an empty slice, an empty
/// result set still reports one page.
pub fn run(records: &[User], query: &ListingQuery) -> UserPage {
    let mut rows: Vec<&User> = records
        .iter()
        .filter(|user| query.search.is_empty() || matches_search(user, &query.search))
        .collect();

    if let Some(field) = query.sort_by {
        rows.sort_by(|a, b| {
            let ordering = sort_key(a, field).cmp(&sort_key(b, field));
            match query.sort_dir {
                SortDir::Asc => ordering,
                SortDir::Desc => ordering.reverse(),
            }
        });
    }

    let total = rows.len() as i64;
    let start = ((query.page - 1) * query.page_size) as usize;
    let items: Vec<User> = rows
        .into_iter()
        .skip(start)
        .take(query.page_size as usize)
        .cloned()
        .collect();

    UserPage {
        items,
        page: query.page,
        page_size: query.page_size,
        total,
        total_pages: total_pages(total, query.page_size),
        sort_by: query.sort_by,
        // When unsorted the direction is meaningless; the protocol echoes
        // ascending in that case.
        sort_dir: if query.sort_by.is_some() {
            query.sort_dir
        } else {
            SortDir::Asc
        },
        search: query.search.clone(),
    }
}

/// `max(1, ceil(total / page_size))` — an empty set is still one page.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    ((total + page_size - 1) / page_size).max(1)
}

/// Case-insensitive substring containment over name, email, and group,
/// with a missing group matching as the empty string.
fn matches_search(user: &User, needle: &str) -> bool {
    user.name.to_lowercase().contains(needle)
        || user.email.to_lowercase().contains(needle)
        || user
            .group
            .as_deref()
            .unwrap_or("")
            .to_lowercase()
            .contains(needle)
}

/// Case-insensitive sort key; a missing group sorts as the empty string,
/// so differently-cased equal values compare equal.
fn sort_key(user: &User, field: SortField) -> String {
    match field {
        SortField::Name => user.name.to_lowercase(),
        SortField::Email => user.email.to_lowercase(),
        SortField::Group => user.group.as_deref().unwrap_or("").to_lowercase(),
    }
}

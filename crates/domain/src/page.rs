//! Offset-based paging: requests, sorting, and the result envelope.

use serde::Serialize;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Sortable device attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Name,
    Brand,
    State,
    #[default]
    CreatedAt,
    UpdatedAt,
}

/// The supplied text does not name a sortable attribute.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort field: {0}")]
pub struct UnknownSortFieldError(pub String);

impl std::str::FromStr for SortField {
    type Err = UnknownSortFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "brand" => Ok(Self::Brand),
            "state" => Ok(Self::State),
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            other => Err(UnknownSortFieldError(other.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// The supplied text is neither `asc` nor `desc`.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort direction: {0}")]
pub struct UnknownSortDirectionError(pub String);

impl std::str::FromStr for SortDirection {
    type Err = UnknownSortDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(UnknownSortDirectionError(s.to_string()))
        }
    }
}

/// A sort request: attribute plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Caller-supplied paging parameters. The page index is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

impl PageRequest {
    /// Create a request with the default sort. A size of zero falls back to
    /// [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: if size == 0 { DEFAULT_PAGE_SIZE } else { size },
            sort: Sort::default(),
        }
    }

    /// Replace the sort request.
    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Number of records to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// The paged-result envelope.
///
/// Serializes as `{content, page, size, totalElements, totalPages}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Assemble a page from a content slice and the total record count.
    #[must_use]
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = request.size.max(1);
        let total_pages =
            u32::try_from(total_elements.div_ceil(u64::from(size))).unwrap_or(u32::MAX);
        Self {
            content,
            page: request.page,
            size,
            total_elements,
            total_pages,
        }
    }
}

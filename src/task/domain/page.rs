//! Paging over the visible task set.

use super::{Task, TaskDomainError};

/// One-based page selection for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Creates a validated page request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPageNumber`] or
    /// [`TaskDomainError::InvalidPageSize`] when either value is zero.
    pub const fn new(page: u32, page_size: u32) -> Result<Self, TaskDomainError> {
        if page == 0 {
            return Err(TaskDomainError::InvalidPageNumber);
        }
        if page_size == 0 {
            return Err(TaskDomainError::InvalidPageSize);
        }
        Ok(Self { page, page_size })
    }

    /// Returns the first page with the given size, clamping a zero size to
    /// one.
    #[must_use]
    pub const fn first(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: if page_size == 0 { 1 } else { page_size },
        }
    }

    /// Returns a copy whose page size does not exceed `max_page_size`.
    #[must_use]
    pub const fn clamped(self, max_page_size: u32) -> Self {
        if max_page_size == 0 || self.page_size <= max_page_size {
            return self;
        }
        Self {
            page: self.page,
            page_size: max_page_size,
        }
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(self) -> u32 {
        self.page_size
    }

    /// Returns the number of visible tasks preceding this page.
    #[must_use]
    pub const fn offset(self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }
}

/// A page of visible tasks together with the visible-set total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    items: Vec<Task>,
    total: u64,
    request: PageRequest,
}

impl TaskPage {
    /// Assembles a page from repository results.
    #[must_use]
    pub const fn new(items: Vec<Task>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    /// Returns the tasks on this page, newest first.
    #[must_use]
    pub fn items(&self) -> &[Task] {
        &self.items
    }

    /// Consumes the page, returning its tasks.
    #[must_use]
    pub fn into_items(self) -> Vec<Task> {
        self.items
    }

    /// Returns the number of tasks in the whole visible set.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns the request this page answers.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Returns `true` when more visible tasks follow this page.
    #[must_use]
    pub fn has_next(&self) -> bool {
        let shown = u64::try_from(self.items.len()).unwrap_or(u64::MAX);
        self.request.offset().saturating_add(shown) < self.total
    }

    /// Returns `true` when this is not the first page.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.request.page > 1
    }
}

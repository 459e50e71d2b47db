//! Error types for task domain validation.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// No title was supplied where one is required.
    #[error("this field is required")]
    MissingTitle,

    /// A field that cannot be cleared was sent as an explicit `null`.
    #[error("this field may not be null")]
    NullField(&'static str),

    /// The task title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the storage limit.
    #[error("title must be at most {max} characters, got {length}")]
    TitleTooLong {
        /// Character count of the trimmed title.
        length: usize,
        /// Maximum permitted character count.
        max: usize,
    },

    /// The page number is not a positive integer.
    #[error("page must be a positive integer")]
    InvalidPageNumber,

    /// The page size is not a positive integer.
    #[error("page size must be a positive integer")]
    InvalidPageSize,

    /// The task has been deleted and accepts no further mutation.
    #[error("task {0} has been deleted")]
    TaskDeleted(TaskId),
}

impl TaskDomainError {
    /// Returns the request field that caused the error, when the error
    /// originates from caller input.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingTitle | Self::EmptyTitle | Self::TitleTooLong { .. } => Some("title"),
            Self::NullField(field) => Some(*field),
            Self::InvalidPageNumber => Some("page"),
            Self::InvalidPageSize => Some("page_size"),
            Self::TaskDeleted(_) => None,
        }
    }
}

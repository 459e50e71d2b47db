//! The visibility predicate shared by every task operation.

use super::Task;
use crate::identity::domain::UserId;

/// The set of tasks a caller may observe or affect: those it owns that have
/// not been deleted.
///
/// Repositories translate this scope into their native query predicate so
/// that filtering, ordering, counting and paging all happen over the visible
/// set. There is no unscoped lookup on the repository port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisibilityScope {
    owner: UserId,
}

impl VisibilityScope {
    /// Builds the scope for an authenticated caller.
    #[must_use]
    pub const fn for_caller(caller: UserId) -> Self {
        Self { owner: caller }
    }

    /// Returns the owner every visible task must match.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns `true` when `task` lies inside this scope.
    #[must_use]
    pub fn admits(&self, task: &Task) -> bool {
        task.owner() == self.owner && !task.is_deleted()
    }
}

//! Finalized-goal use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for creating and reading finalized goals.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Service layer remains storage-agnostic.

use crate::model::goal::{Goal, GoalId};
use crate::progress::GoalQuota;
use crate::repo::goal_repo::{GoalListQuery, GoalRepository, RepoError, RepoResult};
use log::{error, info};

/// Use-case service wrapper for finalized goals.
pub struct GoalService<R: GoalRepository> {
    repo: R,
}

impl<R: GoalRepository> GoalService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a goal produced by `GoalComposer::finalize`.
    pub fn create_goal(&self, goal: &Goal) -> RepoResult<GoalId> {
        match self.repo.create_goal(goal) {
            Ok(id) => {
                info!(
                    "event=goal_create module=service status=ok goal_id={} task_count={}",
                    id,
                    goal.tasks.len()
                );
                Ok(id)
            }
            Err(err) => {
                error!(
                    "event=goal_create module=service status=error goal_id={} error={}",
                    goal.uuid, err
                );
                Err(err)
            }
        }
    }

    pub fn get_goal(&self, id: GoalId) -> RepoResult<Option<Goal>> {
        self.repo.get_goal(id)
    }

    /// Like `get_goal`, but a missing goal is `RepoError::NotFound`.
    pub fn require_goal(&self, id: GoalId) -> RepoResult<Goal> {
        self.repo.get_goal(id)?.ok_or(RepoError::NotFound(id))
    }

    pub fn list_goals(&self, query: &GoalListQuery) -> RepoResult<Vec<Goal>> {
        self.repo.list_goals(query)
    }

    /// Created-goal count against a tier limit.
    pub fn quota(&self, limit: usize) -> RepoResult<GoalQuota> {
        Ok(GoalQuota {
            used: self.repo.count_goals()?,
            limit,
        })
    }
}

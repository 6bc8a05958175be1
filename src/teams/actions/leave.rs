use chrono::Utc;

use crate::PaddockError;
use crate::events::{WorkspaceEvent, dispatch};
use crate::identity::{TeamId, UserId};
use crate::teams::{Team, TeamDirectory};

/// Action to leave a team.
///
/// The leaving member's admin status and overrides are dropped with them.
/// The owner cannot leave, which keeps the owner on the member list.
pub struct LeaveTeamAction<D: TeamDirectory> {
    directory: D,
}

impl<D: TeamDirectory> LeaveTeamAction<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Removes `user` from the team and returns the updated record.
    ///
    /// # Returns
    ///
    /// - `Err(PaddockError::TeamNotFound)` - No such team, or the user is not on it
    /// - `Err(PaddockError::OwnerCannotLeave)` - The user owns the team
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "leave_team", skip_all, err)
    )]
    pub async fn execute(&self, team_id: &TeamId, user: &UserId) -> Result<Team, PaddockError> {
        let team = self
            .directory
            .find_by_id(team_id)
            .await?
            .filter(|t| t.is_member(user))
            .ok_or(PaddockError::TeamNotFound)?;

        if team.is_owner(user) {
            return Err(PaddockError::OwnerCannotLeave);
        }

        let team = self.directory.remove_member(team_id, user).await.inspect_err(|e| {
            log::error!(target: "paddock", "msg=\"team leave failed\", error=\"{e}\"");
        })?;

        dispatch(WorkspaceEvent::MemberLeft {
            team_id: team.id.clone(),
            user_id: user.clone(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "paddock",
            "msg=\"team left\", team_id=\"{team_id}\", user_id=\"{user}\""
        );

        Ok(team)
    }
}

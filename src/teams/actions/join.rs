use chrono::Utc;

use crate::PaddockError;
use crate::config::TeamConfig;
use crate::events::{WorkspaceEvent, dispatch};
use crate::identity::UserId;
use crate::teams::{Team, TeamDirectory};
use crate::validators::{ValidationError, normalize_join_code, validate_join_code};

/// Action to join a team by its shareable code.
///
/// Membership only changes when every check passes. Joining is a set union
/// on the member list, so a retried request never writes a duplicate.
pub struct JoinTeamAction<D: TeamDirectory> {
    directory: D,
    config: TeamConfig,
}

impl<D: TeamDirectory> JoinTeamAction<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            config: TeamConfig::default(),
        }
    }

    pub fn with_config(directory: D, config: TeamConfig) -> Self {
        Self { directory, config }
    }

    /// Adds `user` to the team whose join code is `code`.
    ///
    /// The code is trimmed and upper-cased first. Its length is not checked
    /// against the configured one, so teams created under an older setting
    /// can still be joined.
    ///
    /// # Returns
    ///
    /// - `Ok(team)` - The team record with the user added
    /// - `Err(PaddockError::TeamLimitReached { .. })` - User already at the cap
    /// - `Err(PaddockError::InvalidJoinCode)` - Malformed code or no team with that code
    /// - `Err(PaddockError::AlreadyMember)` - User already on the team
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "join_team", skip_all, err)
    )]
    pub async fn execute(&self, code: &str, user: &UserId) -> Result<Team, PaddockError> {
        let code = normalize_join_code(code);
        validate_join_code(&code).map_err(|err| match err {
            ValidationError::JoinCodeEmpty => PaddockError::Validation(err),
            _ => PaddockError::InvalidJoinCode,
        })?;

        let current = self.directory.find_by_member(user).await?;
        if current.len() >= self.config.max_teams_per_user {
            log::warn!(
                target: "paddock",
                "msg=\"team limit reached\", user_id=\"{user}\", teams={}",
                current.len()
            );
            return Err(PaddockError::TeamLimitReached {
                max: self.config.max_teams_per_user,
            });
        }

        let Some(team) = self.directory.find_by_code(&code).await? else {
            log::warn!(target: "paddock", "msg=\"join failed, unknown code\", user_id=\"{user}\"");
            return Err(PaddockError::InvalidJoinCode);
        };

        if team.is_member(user) {
            log::warn!(
                target: "paddock",
                "msg=\"join failed, already a member\", team_id=\"{}\", user_id=\"{user}\"",
                team.id
            );
            return Err(PaddockError::AlreadyMember);
        }

        let team = self.directory.add_member(&team.id, user).await.inspect_err(|e| {
            log::error!(target: "paddock", "msg=\"team join failed\", error=\"{e}\"");
        })?;

        dispatch(WorkspaceEvent::MemberJoined {
            team_id: team.id.clone(),
            user_id: user.clone(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "paddock",
            "msg=\"team joined\", team_id=\"{}\", user_id=\"{user}\"",
            team.id
        );

        Ok(team)
    }
}

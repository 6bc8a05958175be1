use chrono::Utc;

use crate::PaddockError;
use crate::config::TeamConfig;
use crate::crypto::generate_join_code;
use crate::events::{WorkspaceEvent, dispatch};
use crate::identity::UserId;
use crate::teams::{CreateTeam, Team, TeamDirectory};
use crate::validators::{validate_team_color, validate_team_name};

/// Input data for creating a team.
#[derive(Debug, Clone)]
pub struct CreateTeamInput {
    pub name: String,
    pub color: String,
    pub created_by: UserId,
}

/// Action to create a team owned by the calling user.
///
/// This action:
/// 1. Validates the name and badge color
/// 2. Refuses the request when the user is already at the team cap
/// 3. Generates a join code, unique across the directory when configured
/// 4. Stores the team with the creator as its only member and admin
pub struct CreateTeamAction<D: TeamDirectory> {
    directory: D,
    config: TeamConfig,
}

impl<D: TeamDirectory> CreateTeamAction<D> {
    /// Creates a new `CreateTeamAction` with default configuration.
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            config: TeamConfig::default(),
        }
    }

    /// Creates a new `CreateTeamAction` with custom configuration.
    pub fn with_config(directory: D, config: TeamConfig) -> Self {
        Self { directory, config }
    }

    /// Creates the team.
    ///
    /// # Returns
    ///
    /// - `Ok(team)` - The stored team record
    /// - `Err(PaddockError::Validation(_))` - Name or color rejected
    /// - `Err(PaddockError::TeamLimitReached { .. })` - User already at the cap, nothing written
    /// - `Err(PaddockError::JoinCodeExhausted)` - No free join code found
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_team", skip_all, err)
    )]
    pub async fn execute(&self, input: CreateTeamInput) -> Result<Team, PaddockError> {
        let name = input.name.trim().to_owned();
        validate_team_name(&name)?;
        validate_team_color(&input.color)?;

        let owned = self.directory.find_by_member(&input.created_by).await?;
        if owned.len() >= self.config.max_teams_per_user {
            log::warn!(
                target: "paddock",
                "msg=\"team limit reached\", user_id=\"{}\", teams={}",
                input.created_by,
                owned.len()
            );
            return Err(PaddockError::TeamLimitReached {
                max: self.config.max_teams_per_user,
            });
        }

        let code = self.next_join_code().await?;

        let team = self
            .directory
            .create(CreateTeam {
                name,
                color: input.color,
                code,
                created_by: input.created_by,
            })
            .await
            .inspect_err(|e| {
                log::error!(target: "paddock", "msg=\"team create failed\", error=\"{e}\"");
            })?;

        dispatch(WorkspaceEvent::TeamCreated {
            team_id: team.id.clone(),
            user_id: team.created_by.clone(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "paddock",
            "msg=\"team created\", team_id=\"{}\", user_id=\"{}\"",
            team.id,
            team.created_by
        );

        Ok(team)
    }

    async fn next_join_code(&self) -> Result<String, PaddockError> {
        if !self.config.unique_join_codes {
            return Ok(generate_join_code(self.config.join_code_length));
        }

        for _ in 0..self.config.join_code_attempts {
            let code = generate_join_code(self.config.join_code_length);
            if self.directory.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }
            log::debug!(target: "paddock", "msg=\"join code collision\", code=\"{code}\"");
        }

        log::error!(
            target: "paddock",
            "msg=\"join code attempts exhausted\", attempts={}",
            self.config.join_code_attempts
        );
        Err(PaddockError::JoinCodeExhausted)
    }
}

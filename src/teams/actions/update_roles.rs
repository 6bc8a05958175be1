use chrono::Utc;

use crate::PaddockError;
use crate::events::{WorkspaceEvent, dispatch};
use crate::teams::{RoleEditor, Team, TeamDirectory};

/// Action to commit a [`RoleEditor`]'s staged edits.
///
/// Admins and overrides are written together in one directory update. The
/// editor is only borrowed, so on failure the staged edits are still there
/// for the user to retry.
pub struct UpdateTeamRolesAction<D: TeamDirectory> {
    directory: D,
}

impl<D: TeamDirectory> UpdateTeamRolesAction<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Writes the editor's admin list and override map.
    ///
    /// Entries for users who left the team since the editor was opened are
    /// dropped. A clean editor returns the stored record without writing.
    ///
    /// # Returns
    ///
    /// - `Err(PaddockError::TeamNotFound)` - The team no longer exists
    /// - `Err(PaddockError::Forbidden)` - The actor is not an admin of the stored team
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "update_team_roles", skip_all, err)
    )]
    pub async fn execute(&self, editor: &RoleEditor) -> Result<Team, PaddockError> {
        let team = self
            .directory
            .find_by_id(editor.team_id())
            .await?
            .ok_or(PaddockError::TeamNotFound)?;

        if !team.is_admin(editor.actor()) {
            log::warn!(
                target: "paddock",
                "msg=\"role update refused\", team_id=\"{}\", user_id=\"{}\"",
                team.id,
                editor.actor()
            );
            return Err(PaddockError::Forbidden);
        }

        if !editor.is_dirty() {
            log::debug!(
                target: "paddock",
                "msg=\"no staged role changes\", team_id=\"{}\"",
                team.id
            );
            return Ok(team);
        }

        let mut update = editor.changes();
        update.admins.retain(|a| team.is_member(a));
        let departed: Vec<_> = update
            .permissions
            .members()
            .filter(|m| !team.is_member(m))
            .cloned()
            .collect();
        for member in &departed {
            update.permissions.clear_member(member);
        }

        let team = self
            .directory
            .update_roles(&team.id, &update)
            .await
            .inspect_err(|e| {
                log::error!(
                    target: "paddock",
                    "msg=\"role update failed\", team_id=\"{}\", error=\"{e}\"",
                    editor.team_id()
                );
            })?;

        dispatch(WorkspaceEvent::RolesUpdated {
            team_id: team.id.clone(),
            updated_by: editor.actor().clone(),
            admin_count: team.admins.len(),
            at: Utc::now(),
        })
        .await;

        log::info!(
            target: "paddock",
            "msg=\"team roles updated\", team_id=\"{}\", user_id=\"{}\", admins={}",
            team.id,
            editor.actor(),
            team.admins.len()
        );

        Ok(team)
    }
}

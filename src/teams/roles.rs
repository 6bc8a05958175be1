//! Staged role and permission edits for one team.
//!
//! The management view edits a local copy of the team's admin list and
//! override map; nothing reaches the directory until the whole set of edits
//! is committed with [`UpdateTeamRolesAction`](super::UpdateTeamRolesAction).

use super::types::{MemberRole, Team, merge_owner};
use super::{PermissionOverrides, RoleUpdate};
use crate::identity::{ModuleId, TeamId, UserId};

/// Result of a staged edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Ignored(IgnoreReason),
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Why a staged edit was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Only the owner can change admin status.
    NotOwner,
    /// Only admins can change module access.
    NotAdmin,
    /// The owner's admin status cannot change.
    OwnerImmutable,
    /// Admins are not subject to module overrides.
    TargetIsAdmin,
    /// The target is not on the team.
    NotAMember,
}

/// Local, uncommitted copy of a team's roles.
#[derive(Debug, Clone)]
pub struct RoleEditor {
    team_id: TeamId,
    owner: UserId,
    actor: UserId,
    members: Vec<UserId>,
    admins: Vec<UserId>,
    permissions: PermissionOverrides,
    dirty: bool,
}

impl RoleEditor {
    /// Opens an editor on `team` for `actor`.
    ///
    /// A team without an admin list starts with the owner as its only admin.
    pub fn open(team: &Team, actor: &UserId) -> Self {
        let admins = if team.admins.is_empty() {
            vec![team.created_by.clone()]
        } else {
            team.admins.clone()
        };

        Self {
            team_id: team.id.clone(),
            owner: team.created_by.clone(),
            actor: actor.clone(),
            members: team.members.clone(),
            admins,
            permissions: team.permissions.clone(),
            dirty: false,
        }
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn actor(&self) -> &UserId {
        &self.actor
    }

    pub fn members(&self) -> &[UserId] {
        &self.members
    }

    /// True when there are staged edits not yet committed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn can_edit_roles(&self) -> bool {
        self.actor == self.owner
    }

    pub fn can_edit_permissions(&self) -> bool {
        self.member_is_admin(&self.actor)
    }

    pub fn member_is_admin(&self, member: &UserId) -> bool {
        *member == self.owner || self.admins.contains(member)
    }

    pub fn member_role(&self, member: &UserId) -> MemberRole {
        if *member == self.owner {
            MemberRole::Owner
        } else if self.admins.contains(member) {
            MemberRole::Admin
        } else {
            MemberRole::Member
        }
    }

    /// Whether the member can use a module under the staged edits.
    ///
    /// Admins always can; otherwise only an explicit `false` denies.
    pub fn member_has_access(&self, member: &UserId, module: &ModuleId) -> bool {
        if self.member_is_admin(member) {
            return true;
        }
        !self.permissions.is_denied(member, module)
    }

    /// Promotes a member to admin or demotes an admin to member.
    ///
    /// Promotion drops the member's overrides; demotion leaves them with
    /// none, so they start out with access to everything.
    pub fn toggle_admin(&mut self, member: &UserId) -> EditOutcome {
        if !self.can_edit_roles() {
            return EditOutcome::Ignored(IgnoreReason::NotOwner);
        }
        if *member == self.owner {
            return EditOutcome::Ignored(IgnoreReason::OwnerImmutable);
        }
        if !self.members.contains(member) {
            return EditOutcome::Ignored(IgnoreReason::NotAMember);
        }

        if self.admins.contains(member) {
            self.admins.retain(|a| a != member);
        } else {
            self.admins.push(member.clone());
        }
        self.permissions.clear_member(member);
        self.dirty = true;

        EditOutcome::Applied
    }

    /// Stages an allow/deny flag for one member and module.
    pub fn set_module_permission(
        &mut self,
        member: &UserId,
        module: &ModuleId,
        allowed: bool,
    ) -> EditOutcome {
        if let Some(reason) = self.permission_edit_blocked(member) {
            return EditOutcome::Ignored(reason);
        }

        self.permissions.set(member.clone(), module.clone(), allowed);
        self.dirty = true;

        EditOutcome::Applied
    }

    /// Flips the member's current access to a module.
    pub fn toggle_module_permission(&mut self, member: &UserId, module: &ModuleId) -> EditOutcome {
        let current = self.permissions.get(member, module).unwrap_or(true);
        self.set_module_permission(member, module, !current)
    }

    /// The single write that commits every staged edit.
    ///
    /// The owner is always merged into the admin list.
    pub fn changes(&self) -> RoleUpdate {
        RoleUpdate {
            admins: merge_owner(&self.admins, &self.owner),
            permissions: self.permissions.clone(),
        }
    }

    /// Re-bases the editor on a freshly committed or pushed team record.
    pub fn reset(&mut self, team: &Team) {
        let actor = self.actor.clone();
        *self = Self::open(team, &actor);
    }

    fn permission_edit_blocked(&self, member: &UserId) -> Option<IgnoreReason> {
        if !self.can_edit_permissions() {
            return Some(IgnoreReason::NotAdmin);
        }
        if !self.members.contains(member) {
            return Some(IgnoreReason::NotAMember);
        }
        if self.member_is_admin(member) {
            return Some(IgnoreReason::TargetIsAdmin);
        }
        None
    }
}

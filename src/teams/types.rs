//! Core types for team management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PermissionOverrides;
use crate::identity::{TeamId, UserId};

/// A team record as stored in the team directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Document id.
    pub id: TeamId,
    /// Human-readable team name.
    pub name: String,
    /// Hex color used for the team badge.
    pub color: String,
    /// Shareable join code.
    pub code: String,
    /// The owner. Always a member and always an admin.
    pub created_by: UserId,
    /// Member ids; order is not meaningful.
    pub members: Vec<UserId>,
    /// Admin ids. The owner counts as admin even when missing here.
    #[serde(default)]
    pub admins: Vec<UserId>,
    /// Per-member module overrides.
    #[serde(default)]
    pub permissions: PermissionOverrides,
    /// When the team was created.
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn is_owner(&self, user: &UserId) -> bool {
        self.created_by == *user
    }

    pub fn is_member(&self, user: &UserId) -> bool {
        self.members.contains(user)
    }

    /// Owner or listed admin.
    pub fn is_admin(&self, user: &UserId) -> bool {
        self.is_owner(user) || self.admins.contains(user)
    }

    /// Admin list with the owner merged in, without duplicates.
    pub fn effective_admins(&self) -> Vec<UserId> {
        merge_owner(&self.admins, &self.created_by)
    }

    /// The role a member holds, or `None` for non-members.
    pub fn role_of(&self, user: &UserId) -> Option<MemberRole> {
        if self.is_owner(user) {
            return Some(MemberRole::Owner);
        }
        if !self.is_member(user) {
            return None;
        }
        if self.admins.contains(user) {
            Some(MemberRole::Admin)
        } else {
            Some(MemberRole::Member)
        }
    }
}

/// Union of an admin list and the owner, keeping first-seen order.
pub(crate) fn merge_owner(admins: &[UserId], owner: &UserId) -> Vec<UserId> {
    let mut merged: Vec<UserId> = Vec::with_capacity(admins.len() + 1);
    for admin in admins.iter().chain(std::iter::once(owner)) {
        if !merged.contains(admin) {
            merged.push(admin.clone());
        }
    }
    merged
}

/// A member's standing within one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Admin,
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(Self::Owner),
            "admin" => Some(Self::Admin),
            "member" => Some(Self::Member),
            _ => None,
        }
    }

    /// Label shown in the member list.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Admin => "Admin",
            Self::Member => "Member",
        }
    }

    /// Owners and admins bypass per-module overrides.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }
}

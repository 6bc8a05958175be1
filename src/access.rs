//! Module access resolution.
//!
//! Decides whether a module can be used by a user in the selected workspace.
//! The checks run in a fixed order and the first one that decides wins:
//!
//! 1. the module must exist in the registry and be enabled (deny otherwise)
//! 2. locked modules are always granted
//! 3. no user, or the personal workspace, is granted
//! 4. team owners and admins are granted
//! 5. an explicit `false` override denies; anything else grants
//!
//! Steps 1 and 2 fail closed, step 5 fails open, so a team that never
//! configured overrides does not lock its members out.

use crate::identity::{CurrentUser, ModuleId};
use crate::modules::{ModuleDescriptor, ModuleRegistry};
use crate::teams::Team;

/// Outcome of an access check, with the rule that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted(GrantReason),
    Denied(DenialReason),
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantReason {
    LockedModule,
    PersonalWorkspace,
    TeamAdmin,
    NoOverride,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    UnknownModule,
    ModuleDisabled,
    DeniedByTeam,
}

/// What the router should do with a module route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    Redirect(String),
}

/// Runs the ordered access checks for one module.
///
/// `module` is `None` when the id did not resolve in the registry.
pub fn resolve(
    user: Option<&CurrentUser>,
    team: Option<&Team>,
    module: Option<&ModuleDescriptor>,
) -> AccessDecision {
    let Some(module) = module else {
        return AccessDecision::Denied(DenialReason::UnknownModule);
    };
    if !module.enabled {
        return AccessDecision::Denied(DenialReason::ModuleDisabled);
    }
    if module.locked {
        return AccessDecision::Granted(GrantReason::LockedModule);
    }

    let (Some(user), Some(team)) = (user, team) else {
        return AccessDecision::Granted(GrantReason::PersonalWorkspace);
    };

    if team.is_admin(&user.uid) {
        return AccessDecision::Granted(GrantReason::TeamAdmin);
    }

    if team.permissions.is_denied(&user.uid, &module.id) {
        return AccessDecision::Denied(DenialReason::DeniedByTeam);
    }

    AccessDecision::Granted(GrantReason::NoOverride)
}

/// Boolean form of [`resolve`].
pub fn can_access_module(
    user: Option<&CurrentUser>,
    team: Option<&Team>,
    module: Option<&ModuleDescriptor>,
) -> bool {
    resolve(user, team, module).is_granted()
}

/// Resolves access against a module registry.
pub struct AccessResolver<'a> {
    registry: &'a ModuleRegistry,
    home_path: &'a str,
}

impl<'a> AccessResolver<'a> {
    pub fn new(registry: &'a ModuleRegistry, home_path: &'a str) -> Self {
        Self {
            registry,
            home_path,
        }
    }

    pub fn check(
        &self,
        user: Option<&CurrentUser>,
        team: Option<&Team>,
        module_id: &ModuleId,
    ) -> AccessDecision {
        resolve(user, team, self.registry.get(module_id.as_str()))
    }

    /// Render the module, or send the user back to the dashboard home.
    pub fn route(
        &self,
        user: Option<&CurrentUser>,
        team: Option<&Team>,
        module_id: &ModuleId,
    ) -> RouteDecision {
        match self.check(user, team, module_id) {
            AccessDecision::Granted(_) => RouteDecision::Render,
            AccessDecision::Denied(reason) => {
                log::debug!(
                    target: "paddock",
                    "msg=\"module route redirected\", module=\"{module_id}\", reason={reason:?}"
                );
                RouteDecision::Redirect(self.home_path.to_owned())
            }
        }
    }

    /// Sidebar entries the user can open, in registry order.
    pub fn visible_modules(
        &self,
        user: Option<&CurrentUser>,
        team: Option<&Team>,
    ) -> Vec<&'a ModuleDescriptor> {
        self.registry
            .iter()
            .filter(|m| can_access_module(user, team, Some(*m)))
            .collect()
    }
}

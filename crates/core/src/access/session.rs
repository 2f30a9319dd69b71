//! Navigation state for a signed-in user.

use log::debug;

use super::{Role, Tab};
use crate::errors::{Error, Result};

/// The tab a freshly opened dashboard shows.
pub const DEFAULT_TAB: Tab = Tab::Ingredients;

/// Role plus the currently active tab.
///
/// The active tab only changes through [`DashboardSession::navigate`], which
/// consults the capability table first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSession {
    role: Role,
    active: Tab,
}

impl DashboardSession {
    pub fn new(role: Role) -> Self {
        let active = if role.can_access(DEFAULT_TAB) {
            DEFAULT_TAB
        } else {
            role.allowed_tabs().first().copied().unwrap_or(DEFAULT_TAB)
        };
        Self { role, active }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn active_tab(&self) -> Tab {
        self.active
    }

    /// Tabs to render in the tab bar.
    pub fn visible_tabs(&self) -> &'static [Tab] {
        self.role.allowed_tabs()
    }

    /// Switch to `tab`, leaving the active tab untouched when access is denied.
    pub fn navigate(&mut self, tab: Tab) -> Result<Tab> {
        if !self.role.can_access(tab) {
            debug!("Navigation to '{}' denied for role '{}'", tab, self.role);
            return Err(Error::access_denied(self.role, tab));
        }
        self.active = tab;
        Ok(tab)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_on_ingredients() {
        for role in Role::ALL {
            assert_eq!(DashboardSession::new(role).active_tab(), Tab::Ingredients);
        }
    }

    #[test]
    fn test_navigate_allowed() {
        let mut session = DashboardSession::new(Role::Manager);
        assert_eq!(session.navigate(Tab::Reports), Ok(Tab::Reports));
        assert_eq!(session.active_tab(), Tab::Reports);
    }

    #[test]
    fn test_navigate_denied_keeps_active_tab() {
        let mut session = DashboardSession::new(Role::Cook);
        session.navigate(Tab::Notifications).unwrap();

        let err = session.navigate(Tab::Users).unwrap_err();
        assert_eq!(
            err,
            Error::AccessDenied {
                role: Role::Cook,
                tab: Tab::Users
            }
        );
        assert_eq!(session.active_tab(), Tab::Notifications);
    }

    #[test]
    fn test_manager_cannot_serve() {
        let mut session = DashboardSession::new(Role::Manager);
        assert!(session.navigate(Tab::ServeMeal).is_err());
        assert!(!session.visible_tabs().contains(&Tab::ServeMeal));
    }
}

//! Roles, tabs and the capability table that joins them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Account role as issued by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Cook,
    Admin,
    Manager,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Cook, Role::Admin, Role::Manager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Cook => "cook",
            Role::Admin => "admin",
            Role::Manager => "manager",
        }
    }

    /// Tabs this role may open, in display order.
    pub fn allowed_tabs(&self) -> &'static [Tab] {
        match self {
            Role::Cook => &[
                Tab::Ingredients,
                Tab::Meals,
                Tab::ServeMeal,
                Tab::PortionEstimation,
                Tab::Notifications,
            ],
            Role::Admin => &Tab::ALL,
            Role::Manager => &[
                Tab::Ingredients,
                Tab::Meals,
                Tab::PortionEstimation,
                Tab::Notifications,
                Tab::Reports,
            ],
        }
    }

    pub fn can_access(&self, tab: Tab) -> bool {
        self.allowed_tabs().contains(&tab)
    }

    /// Whether the role may create and delete ingredients and meals.
    pub fn can_manage_catalog(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cook" => Ok(Role::Cook),
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            other => Err(Error::unknown_role(other)),
        }
    }
}

/// Dashboard tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    Ingredients,
    Meals,
    ServeMeal,
    PortionEstimation,
    Notifications,
    Reports,
    Users,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Ingredients,
        Tab::Meals,
        Tab::ServeMeal,
        Tab::PortionEstimation,
        Tab::Notifications,
        Tab::Reports,
        Tab::Users,
    ];

    /// Stable identifier used in navigation.
    pub fn id(&self) -> &'static str {
        match self {
            Tab::Ingredients => "ingredients",
            Tab::Meals => "meals",
            Tab::ServeMeal => "serve-meal",
            Tab::PortionEstimation => "portion-estimation",
            Tab::Notifications => "notifications",
            Tab::Reports => "reports",
            Tab::Users => "users",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Ingredients => "Ingredients",
            Tab::Meals => "Meals",
            Tab::ServeMeal => "Serve Meal",
            Tab::PortionEstimation => "Portion Estimation",
            Tab::Notifications => "Notifications",
            Tab::Reports => "Reports",
            Tab::Users => "User Management",
        }
    }

    /// Whether the tab is backed by a live feed rather than plain requests.
    pub fn is_live(&self) -> bool {
        matches!(self, Tab::PortionEstimation | Tab::Notifications)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id() == s.trim())
            .ok_or_else(|| Error::UnknownTab(s.to_string()))
    }
}

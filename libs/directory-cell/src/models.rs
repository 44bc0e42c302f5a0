use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use shared_models::{Person, PersonId, PersonStatus, Role};

/// Status partition offered as a tab on a list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabKey {
    #[default]
    All,
    Active,
    Inactive,
    Critical,
    OnLeave,
}

impl TabKey {
    pub const PATIENT_TABS: [TabKey; 5] = [
        TabKey::All,
        TabKey::Active,
        TabKey::Inactive,
        TabKey::Critical,
        TabKey::OnLeave,
    ];

    pub const DOCTOR_TABS: [TabKey; 4] = [
        TabKey::All,
        TabKey::Active,
        TabKey::Inactive,
        TabKey::OnLeave,
    ];

    pub fn for_role(role: Role) -> &'static [TabKey] {
        match role {
            Role::Patient => &Self::PATIENT_TABS,
            Role::Doctor => &Self::DOCTOR_TABS,
        }
    }

    /// Status a record must carry to appear under this tab. `None` for `All`.
    pub fn status(self) -> Option<PersonStatus> {
        match self {
            TabKey::All => None,
            TabKey::Active => Some(PersonStatus::Active),
            TabKey::Inactive => Some(PersonStatus::Inactive),
            TabKey::Critical => Some(PersonStatus::Critical),
            TabKey::OnLeave => Some(PersonStatus::OnLeave),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TabKey::All => "all",
            TabKey::Active => "active",
            TabKey::Inactive => "inactive",
            TabKey::Critical => "critical",
            TabKey::OnLeave => "on-leave",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TabKey::All => "All",
            TabKey::Active => "Active",
            TabKey::Inactive => "Inactive",
            TabKey::Critical => "Critical",
            TabKey::OnLeave => "On Leave",
        }
    }
}

impl fmt::Display for TabKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TabKey {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TabKey::All),
            "active" => Ok(TabKey::Active),
            "inactive" => Ok(TabKey::Inactive),
            "critical" => Ok(TabKey::Critical),
            "on-leave" => Ok(TabKey::OnLeave),
            other => Err(DirectoryError::UnknownTab(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewFilter {
    pub tab: TabKey,
    pub query: String,
}

impl ViewFilter {
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }
}

/// Badge numbers shown next to each tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TabCounts {
    pub all: usize,
    pub active: usize,
    pub inactive: usize,
    pub critical: usize,
    pub on_leave: usize,
}

impl TabCounts {
    pub fn get(&self, tab: TabKey) -> usize {
        match tab {
            TabKey::All => self.all,
            TabKey::Active => self.active,
            TabKey::Inactive => self.inactive,
            TabKey::Critical => self.critical,
            TabKey::OnLeave => self.on_leave,
        }
    }
}

/// Where a list screen gets its records from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenSource {
    /// Admin directory of every record with this role.
    All(Role),
    /// A doctor's own patients.
    AssignedTo { doctor_id: PersonId },
}

impl ScreenSource {
    pub fn role(&self) -> Role {
        match self {
            ScreenSource::All(role) => *role,
            ScreenSource::AssignedTo { .. } => Role::Patient,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// A newer request was issued or the screen was unmounted before this one resolved.
    Discarded,
}

/// Render-ready snapshot of a list screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenView {
    pub loading: bool,
    pub error: Option<String>,
    pub tab: TabKey,
    pub query: String,
    pub visible: Vec<Person>,
    pub counts: TabCounts,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("Unknown tab: {0}")]
    UnknownTab(String),
}

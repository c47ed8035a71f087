//! Member account records.
use crate::community::roles::{resolve_privileges, UserPrivileges, UserRole};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Banned,
    Suspended,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Banned => "banned",
            AccountStatus::Suspended => "suspended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessInfo {
    pub business_name: String,
    pub business_type: String,
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub reputation: f64,
    pub join_date: NaiveDate,
    #[serde(default)]
    pub total_posts: u32,
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_info: Option<BusinessInfo>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Privileges for the account's role and reputation, ignoring status.
    pub fn privileges(&self) -> UserPrivileges {
        resolve_privileges(self.role, self.reputation)
    }

    /// Banned and suspended accounts keep their role but can do nothing.
    pub fn effective_privileges(&self) -> UserPrivileges {
        if self.is_active() {
            self.privileges()
        } else {
            UserPrivileges::NONE
        }
    }
}

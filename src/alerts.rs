//! Deal alert preferences and the alert inbox.
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

/// Which deal alerts a member wants and how they are delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPreferences {
    pub electronics: bool,
    pub food: bool,
    pub clothing: bool,
    pub home: bool,
    pub automotive: bool,
    pub services: bool,
    pub near_me: bool,
    pub weekly_digest: bool,
    pub push_notifications: bool,
    pub email_notifications: bool,
}

impl Default for AlertPreferences {
    fn default() -> Self {
        Self {
            electronics: true,
            food: false,
            clothing: true,
            home: false,
            automotive: false,
            services: true,
            near_me: true,
            weekly_digest: false,
            push_notifications: true,
            email_notifications: false,
        }
    }
}

impl AlertPreferences {
    pub const KEYS: [&'static str; 10] = [
        "electronics",
        "food",
        "clothing",
        "home",
        "automotive",
        "services",
        "near_me",
        "weekly_digest",
        "push_notifications",
        "email_notifications",
    ];

    fn slot(&mut self, key: &str) -> Option<&mut bool> {
        Some(match key {
            "electronics" => &mut self.electronics,
            "food" => &mut self.food,
            "clothing" => &mut self.clothing,
            "home" => &mut self.home,
            "automotive" => &mut self.automotive,
            "services" => &mut self.services,
            "near_me" => &mut self.near_me,
            "weekly_digest" => &mut self.weekly_digest,
            "push_notifications" => &mut self.push_notifications,
            "email_notifications" => &mut self.email_notifications,
            _ => return None,
        })
    }

    /// Flip one preference and return its new value, or `None` for an unknown key.
    pub fn toggle(&mut self, key: &str) -> Option<bool> {
        let slot = self.slot(key)?;
        *slot = !*slot;
        let value = *slot;
        info!("{} notifications {}", key, if value { "enabled" } else { "disabled" });
        Some(value)
    }

    pub fn values(&self) -> [bool; 10] {
        [
            self.electronics,
            self.food,
            self.clothing,
            self.home,
            self.automotive,
            self.services,
            self.near_me,
            self.weekly_digest,
            self.push_notifications,
            self.email_notifications,
        ]
    }

    /// Number of preferences switched on.
    pub fn active_count(&self) -> usize {
        self.values().iter().filter(|v| **v).count()
    }

    /// Whether a new deal in `category` should raise an alert.
    pub fn wants_category(&self, category: &str) -> bool {
        match category {
            "electronics" => self.electronics,
            "food" => self.food,
            "clothing" => self.clothing,
            "home" => self.home,
            "automotive" => self.automotive,
            "services" => self.services,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealAlert {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub received_at: DateTime<Utc>,
    pub is_read: bool,
    /// A deal category, or `digest` for summaries.
    pub category: String,
}

#[derive(Debug, Clone, Default)]
pub struct AlertInbox {
    alerts: Vec<DealAlert>,
}

impl AlertInbox {
    pub fn new(alerts: Vec<DealAlert>) -> Self {
        AlertInbox { alerts }
    }

    pub fn alerts(&self) -> &[DealAlert] {
        &self.alerts
    }

    pub fn unread_count(&self) -> usize {
        self.alerts.iter().filter(|a| !a.is_read).count()
    }

    /// Mark an alert read and return it for display.
    pub fn mark_read(&mut self, id: u64) -> Option<&DealAlert> {
        let alert = self.alerts.iter_mut().find(|a| a.id == id)?;
        alert.is_read = true;
        Some(alert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preferences_count() {
        assert_eq!(AlertPreferences::default().active_count(), 5);
    }

    #[test]
    fn toggle_known_and_unknown() {
        let mut p = AlertPreferences::default();
        assert_eq!(p.toggle("food"), Some(true));
        assert!(p.wants_category("food"));
        assert_eq!(p.toggle("food"), Some(false));
        assert_eq!(p.toggle("pets"), None);
        for key in AlertPreferences::KEYS {
            assert!(p.toggle(key).is_some(), "{} should be toggleable", key);
        }
    }

    #[test]
    fn inbox_mark_read() {
        let mut inbox = AlertInbox::new(crate::seed::builtin_alerts().unwrap());
        assert_eq!(inbox.unread_count(), 1);
        assert_eq!(inbox.mark_read(1).map(|a| a.is_read), Some(true));
        assert_eq!(inbox.unread_count(), 0);
        assert!(inbox.mark_read(99).is_none());
    }
}

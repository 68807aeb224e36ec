use crate::catalog::{categories, Category};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One logged observation. `bible_verse` is copied from the catalog when the
/// entry is created and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub date: NaiveDate,
    pub category: Category,
    pub metric: u64,
    pub reflection: String,
    pub bible_verse: String,
}

impl Entry {
    pub fn new(date: NaiveDate, category: Category, metric: u64, reflection: impl Into<String>) -> Self {
        Self {
            date,
            category,
            metric,
            reflection: reflection.into(),
            bible_verse: category.verse().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrackingData {
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub daily_reminder_time: String,
    pub enable_notifications: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            daily_reminder_time: "08:00".to_string(),
            enable_notifications: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub goals: BTreeMap<Category, String>,
    pub notification_settings: NotificationSettings,
}

impl Configuration {
    pub fn goal(&self, category: Category) -> Option<&str> {
        self.goals.get(&category).map(String::as_str)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            goals: categories()
                .iter()
                .map(|category| (*category, category.default_goal().to_string()))
                .collect(),
            notification_settings: NotificationSettings::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewEntryRequest {
    pub date: Option<NaiveDate>,
    pub category: String,
    pub metric: u64,
    #[serde(default)]
    pub reflection: String,
}

#[derive(Debug, Deserialize)]
pub struct LogEntryForm {
    pub date: NaiveDate,
    pub category: String,
    pub metric: u64,
    #[serde(default)]
    pub reflection: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct FilterQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ReportQuery {
    pub granularity: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub name: Category,
    pub verse: &'static str,
}

/// One aggregated point. `category` is only set when the report was not
/// filtered to a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub metric: u64,
}

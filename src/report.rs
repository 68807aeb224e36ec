use crate::catalog::{Category, CategoryFilter};
use crate::errors::TrackerError;
use crate::models::{Entry, ReportRow};
use chrono::NaiveDate;
use std::{collections::BTreeMap, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Weekly, Granularity::Monthly, Granularity::Yearly];

    pub fn name(self) -> &'static str {
        match self {
            Granularity::Weekly => "Weekly",
            Granularity::Monthly => "Monthly",
            Granularity::Yearly => "Yearly",
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Granularity::ALL
            .into_iter()
            .find(|granularity| granularity.name() == s)
            .ok_or_else(|| format!("granularity must be one of Weekly, Monthly, Yearly (got '{s}')"))
    }
}

/// Bucket label for a date. Weeks start on Sunday; days before the first
/// Sunday of the year fall into week 00.
pub fn period_label(date: NaiveDate, granularity: Granularity) -> String {
    let pattern = match granularity {
        Granularity::Weekly => "%Y-W%U",
        Granularity::Monthly => "%Y-%m",
        Granularity::Yearly => "%Y",
    };
    date.format(pattern).to_string()
}

/// Sums metrics per period (and per category when unfiltered).
///
/// Rows come out ordered by period label, then by category name.
pub fn aggregate(entries: &[Entry], granularity: Granularity, filter: CategoryFilter) -> Vec<ReportRow> {
    let mut groups: BTreeMap<(String, Option<&'static str>), (Option<Category>, u64)> = BTreeMap::new();

    for entry in entries.iter().filter(|entry| filter.matches(entry.category)) {
        let category = match filter {
            CategoryFilter::All => Some(entry.category),
            CategoryFilter::Only(_) => None,
        };
        let key = (period_label(entry.date, granularity), category.map(Category::name));
        let (_, sum) = groups.entry(key).or_insert((category, 0));
        *sum = sum.saturating_add(entry.metric);
    }

    groups
        .into_iter()
        .map(|((period, _), (category, metric))| ReportRow {
            period,
            category,
            metric,
        })
        .collect()
}

pub fn filter_entries(entries: &[Entry], filter: CategoryFilter) -> Vec<Entry> {
    entries
        .iter()
        .filter(|entry| filter.matches(entry.category))
        .cloned()
        .collect()
}

/// Newest first; entries sharing a date keep their append order.
pub fn sort_by_date_desc(entries: &[Entry]) -> Vec<Entry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

pub fn parse_filter(raw: Option<&str>) -> Result<CategoryFilter, TrackerError> {
    match raw {
        None | Some("") => Ok(CategoryFilter::All),
        Some(value) => value.parse(),
    }
}

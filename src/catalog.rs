//! The fixed set of practice categories and the scripture reference tied to each.

use crate::errors::TrackerError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Love & Service")]
    LoveAndService,
    #[serde(rename = "Evangelism & Discipleship")]
    EvangelismAndDiscipleship,
    #[serde(rename = "Faithfulness in Trials")]
    FaithfulnessInTrials,
    #[serde(rename = "Generosity & Giving")]
    GenerosityAndGiving,
    #[serde(rename = "Holiness & Obedience")]
    HolinessAndObedience,
    #[serde(rename = "Use of Talents for God's Glory")]
    UseOfTalents,
    #[serde(rename = "Heart & Motivation Check")]
    HeartAndMotivationCheck,
}

static CATEGORIES: [Category; 7] = [
    Category::LoveAndService,
    Category::EvangelismAndDiscipleship,
    Category::FaithfulnessInTrials,
    Category::GenerosityAndGiving,
    Category::HolinessAndObedience,
    Category::UseOfTalents,
    Category::HeartAndMotivationCheck,
];

/// All categories in display order.
pub fn categories() -> &'static [Category] {
    &CATEGORIES
}

/// Looks up the verse for a category by its display name.
pub fn verse_for(name: &str) -> Result<&'static str, TrackerError> {
    name.parse::<Category>().map(Category::verse)
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::LoveAndService => "Love & Service",
            Category::EvangelismAndDiscipleship => "Evangelism & Discipleship",
            Category::FaithfulnessInTrials => "Faithfulness in Trials",
            Category::GenerosityAndGiving => "Generosity & Giving",
            Category::HolinessAndObedience => "Holiness & Obedience",
            Category::UseOfTalents => "Use of Talents for God's Glory",
            Category::HeartAndMotivationCheck => "Heart & Motivation Check",
        }
    }

    pub fn verse(self) -> &'static str {
        match self {
            Category::LoveAndService => "Matthew 25:35-40",
            Category::EvangelismAndDiscipleship => "Matthew 28:19-20",
            Category::FaithfulnessInTrials => "James 1:12",
            Category::GenerosityAndGiving => "2 Corinthians 9:7",
            Category::HolinessAndObedience => "1 Peter 1:15-16",
            Category::UseOfTalents => "Matthew 25:14-30",
            Category::HeartAndMotivationCheck => "Matthew 6:1-4",
        }
    }

    /// Goal text used when no configuration has been saved yet.
    pub fn default_goal(self) -> &'static str {
        match self {
            Category::LoveAndService => "Serve at least 5 people weekly",
            Category::EvangelismAndDiscipleship => "Share the Gospel or mentor 3 people weekly",
            Category::FaithfulnessInTrials => "Journal one instance per trial of trust in God",
            Category::GenerosityAndGiving => "Give 10% of income/time to ministry",
            Category::HolinessAndObedience => "Engage in daily Bible study and prayer",
            Category::UseOfTalents => "Identify and use your talents weekly for ministry",
            Category::HeartAndMotivationCheck => "Complete a monthly questionnaire on your intentions",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATEGORIES
            .iter()
            .copied()
            .find(|category| category.name() == s)
            .ok_or_else(|| TrackerError::UnknownCategory(s.to_string()))
    }
}

/// Category selection used by the entry table and the reports page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "All" {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

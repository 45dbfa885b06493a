//! Sort/filter options for the question list

use crate::error::{NavbarError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordering applied to the question list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortFilter {
    /// Newest questions first
    #[default]
    #[serde(rename = "latest-created")]
    LatestCreated,
    /// Most recently edited first
    #[serde(rename = "latest-edited")]
    LatestEdited,
    /// Most voted during the last week
    #[serde(rename = "week")]
    VotedLastWeek,
    /// Most voted during the last month
    #[serde(rename = "month")]
    VotedLastMonth,
}

/// One entry of the filter dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    /// Localization key for the visible label
    pub label: &'static str,
    /// Value sent to the filter-change callback
    pub value: &'static str,
}

impl SortFilter {
    /// All options in dropdown order
    pub const ALL: [SortFilter; 4] = [
        SortFilter::LatestCreated,
        SortFilter::LatestEdited,
        SortFilter::VotedLastWeek,
        SortFilter::VotedLastMonth,
    ];

    pub fn value(self) -> &'static str {
        match self {
            SortFilter::LatestCreated => "latest-created",
            SortFilter::LatestEdited => "latest-edited",
            SortFilter::VotedLastWeek => "week",
            SortFilter::VotedLastMonth => "month",
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            SortFilter::LatestCreated => "latest-created",
            SortFilter::LatestEdited => "latest-edited",
            SortFilter::VotedLastWeek => "voted-in-the-last-week",
            SortFilter::VotedLastMonth => "voted-in-the-last-month",
        }
    }

    pub fn option(self) -> FilterOption {
        FilterOption {
            label: self.label_key(),
            value: self.value(),
        }
    }

    /// Dropdown entries in display order
    pub fn options() -> Vec<FilterOption> {
        Self::ALL.iter().map(|f| f.option()).collect()
    }
}

impl FromStr for SortFilter {
    type Err = NavbarError;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.value() == value)
            .ok_or_else(|| NavbarError::UnknownFilter(value.to_string()))
    }
}

impl fmt::Display for SortFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

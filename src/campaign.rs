//! Campaign-goal derivation and classification.
//!
//! Ad-set names encode the campaign goal by convention ("LC Conversion -
//! 10/03/2024 - BR"), but years of manual entry left the convention loose:
//! spacing drifts, separators mix `-` and `–`, some names carry a launch date
//! and some do not. [`campaign_goal`] normalizes all of that into a single
//! goal label per ad set, and [`classify_goal`] buckets those labels into the
//! three coarse groups reports aggregate by.

use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::column_map::standard;
use crate::error::PipelineResult;
use crate::types::{Table, Value};

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}/\d{2}/\d{4}").expect("valid date pattern"));

static SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[-–]\s*").expect("valid separator pattern"));

/// Derive the campaign-goal label from an ad-set name.
///
/// Rules are checked in order; the first match wins:
///
/// 1. Names containing "LC Cart-Conversion" or the misspelled
///    "LC Cart- Conversion" are "LC Cart-Conversion".
/// 2. Names containing "LC Conversion" are "LC Conversion".
/// 3. Names containing "Viewed" or "View 1 Day" are "Viewed".
/// 4. Names containing a `dd/mm/yyyy` date keep everything before the date,
///    with surrounding whitespace and any dangling separator removed.
/// 5. Otherwise the goal is the first `-`/`–`-separated segment.
///
/// ```
/// use campaign_report_pipeline::campaign::campaign_goal;
///
/// assert_eq!(campaign_goal("LC Cart- Conversion - 12/03/2024"), "LC Cart-Conversion");
/// assert_eq!(campaign_goal("Brand Awareness - 05/02/2024"), "Brand Awareness");
/// assert_eq!(campaign_goal("Instagram Post – BR"), "Instagram Post");
/// ```
pub fn campaign_goal(ad_set_name: &str) -> String {
    if ad_set_name.contains("LC Cart-Conversion") || ad_set_name.contains("LC Cart- Conversion") {
        return "LC Cart-Conversion".to_string();
    }
    if ad_set_name.contains("LC Conversion") {
        return "LC Conversion".to_string();
    }
    if ad_set_name.contains("Viewed") || ad_set_name.contains("View 1 Day") {
        return "Viewed".to_string();
    }
    if let Some(date) = DATE_RE.find(ad_set_name) {
        return ad_set_name[..date.start()]
            .trim()
            .trim_end_matches(['-', '–'])
            .trim_end()
            .to_string();
    }
    SEGMENT_RE
        .split(ad_set_name)
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}

/// Coarse report bucket for a campaign goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassifiedGoal {
    /// Goals that drive purchases.
    Conversion,
    /// Goals that drive engagement or views.
    EngagementView,
    /// Everything else.
    Other,
}

impl ClassifiedGoal {
    /// Portuguese report label written into output tables.
    pub fn as_str(self) -> &'static str {
        match self {
            ClassifiedGoal::Conversion => "Conversão",
            ClassifiedGoal::EngagementView => "Engajamento/Visualização",
            ClassifiedGoal::Other => "Outros",
        }
    }
}

impl fmt::Display for ClassifiedGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which goal labels belong to which [`ClassifiedGoal`] bucket.
///
/// The default lists cover the goals that occur in practice; deployments with
/// other naming conventions load their own lists from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Goals classified as [`ClassifiedGoal::Conversion`].
    pub conversion_goals: Vec<String>,
    /// Goals classified as [`ClassifiedGoal::EngagementView`].
    pub engagement_goals: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            conversion_goals: vec![
                "LC Checkout-Conversion".to_string(),
                "LC Conversion".to_string(),
                "LC Cart-Conversion".to_string(),
                "LC Purchase-Conversion".to_string(),
                "RL Cart-Conversion".to_string(),
                "Add to cart".to_string(),
            ],
            engagement_goals: vec![
                "Viewed".to_string(),
                "LC Engagement".to_string(),
                "Instagram Post".to_string(),
            ],
        }
    }
}

impl ClassifierConfig {
    /// Load goal lists from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Classify a goal label into its report bucket.
///
/// Conversion is checked first, so a goal listed in both buckets counts as
/// conversion.
pub fn classify_goal(goal: &str, config: &ClassifierConfig) -> ClassifiedGoal {
    if config.conversion_goals.iter().any(|g| g == goal) {
        ClassifiedGoal::Conversion
    } else if config.engagement_goals.iter().any(|g| g == goal) {
        ClassifiedGoal::EngagementView
    } else {
        ClassifiedGoal::Other
    }
}

/// Derive `campaign_goal` and `classified_campaign_goal` columns from
/// `ad_set_name`, appending (or replacing) them on the table.
///
/// Non-text ad-set cells derive an empty goal, which classifies as
/// [`ClassifiedGoal::Other`].
pub fn add_goal_columns(table: &mut Table, config: &ClassifierConfig) -> PipelineResult<()> {
    let name_idx = table.require_column(standard::AD_SET_NAME)?;

    let goals: Vec<String> = table
        .rows
        .iter()
        .map(|row| campaign_goal(row[name_idx].as_str().unwrap_or("")))
        .collect();
    let classified: Vec<Value> = goals
        .iter()
        .map(|goal| Value::Text(classify_goal(goal, config).as_str().to_string()))
        .collect();
    let goals: Vec<Value> = goals.into_iter().map(Value::Text).collect();

    table.set_column(standard::CAMPAIGN_GOAL, goals)?;
    table.set_column(standard::CLASSIFIED_CAMPAIGN_GOAL, classified)?;
    Ok(())
}

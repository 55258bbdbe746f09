//! Feature engineering for prediction requests.
//!
//! Maps the seven raw form fields into the engineered feature row the model
//! was trained on: log-scaled counts, identity-mapped posting metrics, the
//! engagement rate, and a one-hot channel indicator. Every schema column not
//! explicitly derived stays at zero, and the row's shape always equals the
//! schema's column set exactly.

use crate::error::{Result, ViewcastError};
use crate::registry::ChannelRegistry;
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Engineered column names the model was trained with.
pub const COL_SUBSCRIBER_COUNT_LOG: &str = "subscriber_count_log";
pub const COL_LIKE_COUNT_LOG: &str = "like_count_log";
pub const COL_COMMENT_COUNT_LOG: &str = "comment_count_log";
pub const COL_TOTAL_POSTS: &str = "total_posts";
pub const COL_ACCOUNT_AGE_YEARS: &str = "account_age_years";
pub const COL_POST_FREQUENCY_PER_YEAR: &str = "post_frequency_per_year";
pub const COL_OFFICIAL_ENGAGEMENT_RATE: &str = "official_engagement_rate";

/// Raw form fields exactly as received from the presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictForm {
    pub subscribers: String,
    pub video_count: String,
    pub account_age: String,
    pub post_frequency_per_year: String,
    pub like_count: String,
    pub comment_count: String,
    pub channel_name: String,
}

impl PredictForm {
    /// Parses the six numeric fields. The first missing or non-numeric field
    /// produces a validation error naming it; no feature row is built from a
    /// form that fails here.
    pub fn parse(&self) -> Result<RawMetrics> {
        Ok(RawMetrics {
            subscribers: parse_field("subscribers", &self.subscribers)?,
            video_count: parse_field("video_count", &self.video_count)?,
            account_age: parse_field("account_age", &self.account_age)?,
            post_frequency_per_year: parse_field(
                "post_frequency_per_year",
                &self.post_frequency_per_year,
            )?,
            like_count: parse_field("like_count", &self.like_count)?,
            comment_count: parse_field("comment_count", &self.comment_count)?,
            channel_name: self.channel_name.clone(),
        })
    }
}

fn parse_field(name: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ViewcastError::Validation(format!(
            "missing required field: {}",
            name
        )));
    }
    trimmed.parse::<f64>().map_err(|_| {
        ViewcastError::Validation(format!("invalid value for {}: '{}'", name, raw))
    })
}

/// Parsed numeric inputs plus the selected channel.
#[derive(Debug, Clone)]
pub struct RawMetrics {
    pub subscribers: f64,
    pub video_count: f64,
    pub account_age: f64,
    pub post_frequency_per_year: f64,
    pub like_count: f64,
    pub comment_count: f64,
    pub channel_name: String,
}

/// log10 guarded against the undefined result on non-positive input.
pub fn safe_log10(x: f64) -> f64 {
    if x <= 0.0 {
        0.0
    } else {
        x.log10()
    }
}

/// A single model input row, values stored in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    values: Vec<f64>,
}

impl FeatureRow {
    /// Values in schema order, ready to hand to the model.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for a named column.
    pub fn get(&self, schema: &Schema, name: &str) -> Option<f64> {
        schema.position(name).map(|pos| self.values[pos])
    }
}

/// Builds the feature row for one request. Deterministic and pure apart from
/// the warning on an unrecognized channel.
///
/// Engineered columns the schema does not carry are silently dropped; the
/// training pipeline's reindex step did the same. An unrecognized channel
/// leaves every indicator column at zero and the prediction proceeds without
/// channel information.
pub fn build_features(
    schema: &Schema,
    registry: &ChannelRegistry,
    metrics: &RawMetrics,
) -> FeatureRow {
    let mut values = vec![0.0; schema.len()];

    let mut set = |name: &str, value: f64| {
        if let Some(pos) = schema.position(name) {
            values[pos] = value;
        }
    };

    set(COL_SUBSCRIBER_COUNT_LOG, safe_log10(metrics.subscribers));
    set(COL_LIKE_COUNT_LOG, safe_log10(metrics.like_count));
    set(COL_COMMENT_COUNT_LOG, safe_log10(metrics.comment_count));

    // Video count stands in for total posts.
    set(COL_TOTAL_POSTS, metrics.video_count);
    set(COL_ACCOUNT_AGE_YEARS, metrics.account_age);
    set(COL_POST_FREQUENCY_PER_YEAR, metrics.post_frequency_per_year);

    let engagement = if metrics.subscribers > 0.0 {
        (metrics.like_count + metrics.comment_count) / metrics.subscribers
    } else {
        0.0
    };
    set(COL_OFFICIAL_ENGAGEMENT_RATE, engagement);

    let channel_column = registry.column_for(&metrics.channel_name);
    match schema.position(&channel_column) {
        Some(pos) => values[pos] = 1.0,
        None => warn!(
            channel = %metrics.channel_name,
            column = %channel_column,
            "channel column not in schema; predicting without channel indicator"
        ),
    }

    FeatureRow { values }
}

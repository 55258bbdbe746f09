//! Prediction service: the request boundary over schema, registry, and model.
//!
//! All three startup resources are loaded once into an immutable context and
//! shared read-only for the process lifetime. The service has two states:
//! READY when every resource loaded, DEGRADED when any load failed. A degraded
//! service answers every request with a fixed server-error message and only a
//! restart recovers it.

use crate::config::ViewcastConfig;
use crate::error::{Result, ViewcastError};
use crate::features::{build_features, PredictForm, RawMetrics};
use crate::model::{load_model, Regressor};
use crate::registry::ChannelRegistry;
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{error, info};

/// Fixed message returned for every request while degraded.
pub const DEGRADED_MESSAGE: &str =
    "FATAL SERVER ERROR: Model or data files are missing. Check server logs.";

/// Service lifecycle state. Decided once at startup; there is no recovery
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Ready,
    Degraded,
}

/// Loaded prediction context shared read-only across requests.
pub struct PredictionService {
    inner: Option<ServiceInner>,
    stats: ServiceStats,
}

struct ServiceInner {
    schema: Schema,
    registry: ChannelRegistry,
    model: Box<dyn Regressor>,
}

/// Request counters.
#[derive(Debug, Default)]
pub struct ServiceStats {
    /// Total requests handled.
    pub total_requests: AtomicU64,
    /// Requests that produced an estimate.
    pub successful_requests: AtomicU64,
    /// Requests answered with an error message.
    pub failed_requests: AtomicU64,
    /// Predictions made without a channel indicator set.
    pub channel_misses: AtomicU64,
}

/// Statistics snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatsSnapshot {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub channel_misses: u64,
}

/// Boundary response: display text plus the channel list for redisplay. The
/// presentation layer renders both without interpreting either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictOutcome {
    pub text: String,
    pub channels: Vec<String>,
}

impl PredictionService {
    /// Load all startup resources. Failures do not propagate: the error is
    /// logged and the service comes up degraded instead of crashing.
    pub fn load(config: &ViewcastConfig) -> Self {
        match Self::try_load(config) {
            Ok(inner) => {
                info!(
                    columns = inner.schema.len(),
                    channels = inner.registry.len(),
                    "prediction service ready"
                );
                Self {
                    inner: Some(inner),
                    stats: ServiceStats::default(),
                }
            }
            Err(e) => {
                error!(error = %e, "failed to load prediction resources; service degraded");
                Self {
                    inner: None,
                    stats: ServiceStats::default(),
                }
            }
        }
    }

    fn try_load(config: &ViewcastConfig) -> Result<ServiceInner> {
        config.validate()?;
        let schema = Schema::from_file(&config.artifacts.columns_path)?;
        let registry = ChannelRegistry::from_schema(&schema)?;
        let model = load_model(&config.artifacts.model_path, &schema)?;
        Ok(ServiceInner {
            schema,
            registry,
            model,
        })
    }

    /// Load from explicit artifact paths.
    pub fn from_paths(model_path: &Path, columns_path: &Path) -> Self {
        let config = ViewcastConfig {
            artifacts: crate::config::ArtifactConfig {
                model_path: model_path.to_path_buf(),
                columns_path: columns_path.to_path_buf(),
            },
            observability: Default::default(),
        };
        Self::load(&config)
    }

    /// Build directly from loaded parts. Used by tests and embedding callers
    /// that manage artifacts themselves.
    pub fn from_parts(
        schema: Schema,
        registry: ChannelRegistry,
        model: Box<dyn Regressor>,
    ) -> Self {
        Self {
            inner: Some(ServiceInner {
                schema,
                registry,
                model,
            }),
            stats: ServiceStats::default(),
        }
    }

    pub fn state(&self) -> ServiceState {
        if self.inner.is_some() {
            ServiceState::Ready
        } else {
            ServiceState::Degraded
        }
    }

    /// Valid channel names for the presentation layer. Empty while degraded.
    pub fn channels(&self) -> &[String] {
        self.inner
            .as_ref()
            .map(|i| i.registry.channels())
            .unwrap_or(&[])
    }

    /// Typed prediction path: build the feature row, invoke the model, and
    /// inverse-transform the log10-scale output to the natural scale.
    pub fn estimate(&self, metrics: &RawMetrics) -> Result<f64> {
        let inner = self
            .inner
            .as_ref()
            .ok_or_else(|| ViewcastError::Config("service is degraded".to_string()))?;

        let channel_column = inner.registry.column_for(&metrics.channel_name);
        if !inner.schema.contains(&channel_column) {
            self.stats.channel_misses.fetch_add(1, Ordering::Relaxed);
        }

        let row = build_features(&inner.schema, &inner.registry, metrics);
        let log_prediction = inner.model.predict(row.as_slice())?;

        let views = 10f64.powf(log_prediction);
        if !views.is_finite() {
            return Err(ViewcastError::Inference(format!(
                "estimate overflowed from log-scale prediction {}",
                log_prediction
            )));
        }

        Ok(views)
    }

    /// The request boundary. Every failure becomes display text here and only
    /// here; this path never propagates a fault to the caller.
    pub fn handle(&self, form: &PredictForm) -> PredictOutcome {
        self.stats.total_requests.fetch_add(1, Ordering::Relaxed);

        if self.inner.is_none() {
            self.stats.failed_requests.fetch_add(1, Ordering::Relaxed);
            return PredictOutcome {
                text: DEGRADED_MESSAGE.to_string(),
                channels: Vec::new(),
            };
        }

        let text = match form.parse().and_then(|metrics| self.estimate(&metrics)) {
            Ok(views) => {
                self.stats.successful_requests.fetch_add(1, Ordering::Relaxed);
                format!("Estimated View Count: {}", format_count(views))
            }
            Err(e) => {
                self.stats.failed_requests.fetch_add(1, Ordering::Relaxed);
                format!("Error: {}. Please check your inputs.", e)
            }
        };

        PredictOutcome {
            text,
            channels: self.channels().to_vec(),
        }
    }

    /// Gets a statistics snapshot.
    pub fn stats(&self) -> ServiceStatsSnapshot {
        ServiceStatsSnapshot {
            total_requests: self.stats.total_requests.load(Ordering::Relaxed),
            successful_requests: self.stats.successful_requests.load(Ordering::Relaxed),
            failed_requests: self.stats.failed_requests.load(Ordering::Relaxed),
            channel_misses: self.stats.channel_misses.load(Ordering::Relaxed),
        }
    }
}

/// Formats an estimate as a truncated integer with thousands separators.
fn format_count(views: f64) -> String {
    group_thousands(views.max(0.0) as u64)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConstantModel;

    fn test_schema() -> Schema {
        Schema::new(
            [
                "subscriber_count_log",
                "like_count_log",
                "comment_count_log",
                "total_posts",
                "account_age_years",
                "post_frequency_per_year",
                "official_engagement_rate",
                "channel_name_A",
                "channel_name_B",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        )
        .unwrap()
    }

    fn ready_service(log_value: f64) -> PredictionService {
        let schema = test_schema();
        let registry = ChannelRegistry::from_schema(&schema).unwrap();
        let model = Box::new(ConstantModel::new(log_value, schema.len()));
        PredictionService::from_parts(schema, registry, model)
    }

    fn form(channel: &str) -> PredictForm {
        PredictForm {
            subscribers: "1000".to_string(),
            video_count: "50".to_string(),
            account_age: "2".to_string(),
            post_frequency_per_year: "10".to_string(),
            like_count: "500".to_string(),
            comment_count: "100".to_string(),
            channel_name: channel.to_string(),
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_round_trip_with_stub_model() {
        // log10 prediction of 6 must display as 10^6 with separators.
        let service = ready_service(6.0);
        let outcome = service.handle(&form("A"));
        assert_eq!(outcome.text, "Estimated View Count: 1,000,000");
        assert_eq!(outcome.channels, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_truncation_rounds_down() {
        // 10^3.5 = 3162.27... -> 3,162
        let service = ready_service(3.5);
        let outcome = service.handle(&form("A"));
        assert_eq!(outcome.text, "Estimated View Count: 3,162");
    }

    #[test]
    fn test_validation_error_is_display_text() {
        let service = ready_service(3.0);
        let mut bad = form("A");
        bad.subscribers = "abc".to_string();

        let outcome = service.handle(&bad);
        assert!(outcome.text.starts_with("Error:"));
        assert!(outcome.text.contains("subscribers"));

        let stats = service.stats();
        assert_eq!(stats.total_requests, 1);
        assert_eq!(stats.failed_requests, 1);
        assert_eq!(stats.successful_requests, 0);
    }

    #[test]
    fn test_unknown_channel_still_predicts() {
        let service = ready_service(2.0);
        let outcome = service.handle(&form("Unknown"));

        assert_eq!(outcome.text, "Estimated View Count: 100");
        assert_eq!(service.stats().channel_misses, 1);
    }

    #[test]
    fn test_degraded_service_fixed_message() {
        let config = ViewcastConfig {
            artifacts: crate::config::ArtifactConfig {
                model_path: "/nonexistent/model.json".into(),
                columns_path: "/nonexistent/columns.json".into(),
            },
            observability: Default::default(),
        };
        let service = PredictionService::load(&config);
        assert_eq!(service.state(), ServiceState::Degraded);
        assert!(service.channels().is_empty());

        for _ in 0..3 {
            let outcome = service.handle(&form("A"));
            assert_eq!(outcome.text, DEGRADED_MESSAGE);
            assert!(outcome.channels.is_empty());
        }
        assert_eq!(service.stats().failed_requests, 3);
    }

    #[test]
    fn test_overflowing_prediction_is_an_error() {
        let service = ready_service(400.0);
        let outcome = service.handle(&form("A"));
        assert!(outcome.text.starts_with("Error:"));
    }

    #[test]
    fn test_negative_prediction_truncates_to_zero() {
        // 10^-2 = 0.01 -> displayed as 0
        let service = ready_service(-2.0);
        let outcome = service.handle(&form("A"));
        assert_eq!(outcome.text, "Estimated View Count: 0");
    }
}

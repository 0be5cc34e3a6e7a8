//! Recommendation metrics for observability

use crate::models::{RecommendationOutcome, RecommendationReport};
use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry};
use std::sync::OnceLock;

static METRICS: OnceLock<RecommendationMetricsInner> = OnceLock::new();

struct RecommendationMetricsInner {
    requests: IntCounterVec,
    errors: IntCounterVec,
    candidates: IntCounterVec,
    set_size: Histogram,
}

impl RecommendationMetricsInner {
    fn new() -> Self {
        Self {
            requests: IntCounterVec::new(
                Opts::new(
                    "recommendation_requests_total",
                    "Total recommendation requests by outcome",
                ),
                &["outcome"],
            )
            .expect("valid metric definition"),
            errors: IntCounterVec::new(
                Opts::new(
                    "recommendation_errors_total",
                    "Total failed recommendation requests by error kind",
                ),
                &["kind"],
            )
            .expect("valid metric definition"),
            candidates: IntCounterVec::new(
                Opts::new(
                    "recommendation_candidates_total",
                    "Total candidates produced by each filter",
                ),
                &["source"],
            )
            .expect("valid metric definition"),
            set_size: Histogram::with_opts(
                HistogramOpts::new(
                    "recommendation_set_size",
                    "Number of companies in a recommendation set",
                )
                .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0]),
            )
            .expect("valid metric definition"),
        }
    }

    fn register(&self, registry: &Registry) -> Result<(), prometheus::Error> {
        registry.register(Box::new(self.requests.clone()))?;
        registry.register(Box::new(self.errors.clone()))?;
        registry.register(Box::new(self.candidates.clone()))?;
        registry.register(Box::new(self.set_size.clone()))?;
        Ok(())
    }
}

fn get_metrics() -> &'static RecommendationMetricsInner {
    METRICS.get_or_init(RecommendationMetricsInner::new)
}

/// Recommendation metrics wrapper
#[derive(Clone, Default)]
pub struct RecommendationMetrics;

impl RecommendationMetrics {
    pub fn new() -> Self {
        Self
    }

    /// Register all metrics with a Prometheus registry
    pub fn register(registry: &Registry) -> Result<(), prometheus::Error> {
        get_metrics().register(registry)
    }

    pub fn record_outcome(&self, outcome: &RecommendationOutcome, report: &RecommendationReport) {
        let metrics = get_metrics();
        metrics
            .requests
            .with_label_values(&[outcome.as_str()])
            .inc();

        if let Some(items) = outcome.items() {
            metrics
                .candidates
                .with_label_values(&["collaborative"])
                .inc_by(report.collaborative_count as u64);
            metrics
                .candidates
                .with_label_values(&["content"])
                .inc_by(report.content_count as u64);
            metrics.set_size.observe(items.len() as f64);
        }
    }

    pub fn record_error(&self, error_kind: &str) {
        get_metrics()
            .errors
            .with_label_values(&[error_kind])
            .inc();
    }

    pub fn requests(&self, outcome: &str) -> u64 {
        get_metrics().requests.with_label_values(&[outcome]).get()
    }

    pub fn errors(&self, error_kind: &str) -> u64 {
        get_metrics().errors.with_label_values(&[error_kind]).get()
    }
}

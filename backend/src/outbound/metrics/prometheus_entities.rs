//! Prometheus adapter for created-entity counters.
//!
//! Registered with the same registry `actix-web-prom` exposes at `/metrics`.

use async_trait::async_trait;
use prometheus::{CounterVec, Opts, Registry};

use crate::domain::ports::{EntityKind, EntityMetrics, EntityMetricsError};

const APP_LABEL: &str = "pvz_service";

/// Prometheus-backed entity creation recorder.
///
/// # Metric Specification
///
/// - **Name**: `created_entity_count`
/// - **Type**: Counter
/// - **Labels**:
///   - `app`: always `pvz_service`
///   - `entity`: `pvz`, `reception`, or `product`
pub struct PrometheusEntityMetrics {
    created_total: CounterVec,
}

impl PrometheusEntityMetrics {
    /// Create and register the counter with the given registry.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric with the same name is already registered.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let created_total = CounterVec::new(
            Opts::new("created_entity_count", "Number of created entities by type"),
            &["app", "entity"],
        )?;
        registry.register(Box::new(created_total.clone()))?;
        Ok(Self { created_total })
    }
}

#[async_trait]
impl EntityMetrics for PrometheusEntityMetrics {
    async fn record_created(&self, kind: EntityKind) -> Result<(), EntityMetricsError> {
        self.created_total
            .get_metric_with_label_values(&[APP_LABEL, kind.as_label()])
            .map_err(|err| EntityMetricsError::export(err.to_string()))?
            .inc();
        Ok(())
    }
}

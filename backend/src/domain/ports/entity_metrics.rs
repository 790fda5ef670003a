//! Domain port surface for counting created entities.
//!
//! Services record one event per successful creation. Adapters may export to
//! Prometheus or discard the events.

use std::fmt;

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording entity metrics.
    pub enum EntityMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "entity metrics exporter failed: {message}",
    }
}

/// Kinds of entity whose creation is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A pickup point.
    PickupPoint,
    /// A reception.
    Reception,
    /// A product.
    Product,
}

impl EntityKind {
    /// Metric label value.
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::PickupPoint => "pvz",
            Self::Reception => "reception",
            Self::Product => "product",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Metrics recording port for entity creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityMetrics: Send + Sync {
    /// Record that one entity of `kind` was created.
    async fn record_created(&self, kind: EntityKind) -> Result<(), EntityMetricsError>;
}

/// No-op implementation for when metrics are disabled or in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpEntityMetrics;

#[async_trait]
impl EntityMetrics for NoOpEntityMetrics {
    async fn record_created(&self, _kind: EntityKind) -> Result<(), EntityMetricsError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EntityKind::PickupPoint, "pvz")]
    #[case(EntityKind::Reception, "reception")]
    #[case(EntityKind::Product, "product")]
    fn labels_match_exported_names(#[case] kind: EntityKind, #[case] label: &str) {
        assert_eq!(kind.as_label(), label);
    }

    #[tokio::test]
    async fn noop_record_returns_ok() {
        assert!(
            NoOpEntityMetrics
                .record_created(EntityKind::Product)
                .await
                .is_ok()
        );
    }

    #[test]
    fn error_constructor_accepts_str() {
        let err = EntityMetricsError::export("registry closed");
        assert_eq!(
            err.to_string(),
            "entity metrics exporter failed: registry closed"
        );
    }
}

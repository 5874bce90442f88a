//! Prometheus metrics for message routing

use carebot_common::{DecisionTag, RoutingDecision};
use prometheus::{
    register_histogram_with_registry, register_int_counter_vec_with_registry, Encoder, Histogram,
    IntCounterVec, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::Duration;

/// Routing metrics for Prometheus
#[derive(Clone)]
pub struct RouterMetrics {
    pub decisions_total: IntCounterVec,
    pub generator_failures_total: IntCounterVec,
    pub dispatch_seconds: Histogram,

    registry: Arc<Registry>,
}

impl RouterMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let decisions_total = register_int_counter_vec_with_registry!(
            "carebot_decisions_total",
            "Total number of routed messages by decision tag",
            &["tag"],
            registry
        )?;

        let generator_failures_total = register_int_counter_vec_with_registry!(
            "carebot_generator_failures_total",
            "Total number of failed generator calls by reason",
            &["reason"],
            registry
        )?;

        let dispatch_seconds = register_histogram_with_registry!(
            "carebot_dispatch_seconds",
            "Time to route one message, generator call included",
            vec![0.001, 0.01, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0],
            registry
        )?;

        // Every tag shows up in the export, even at zero
        for tag in DecisionTag::ALL {
            decisions_total.with_label_values(&[tag.as_str()]);
        }

        Ok(Self {
            decisions_total,
            generator_failures_total,
            dispatch_seconds,
            registry: Arc::new(registry),
        })
    }

    /// Record one routed message
    pub fn observe(&self, decision: &RoutingDecision, elapsed: Duration) {
        self.decisions_total
            .with_label_values(&[decision.tag().as_str()])
            .inc();
        if let RoutingDecision::GeneratedError(e) = decision {
            self.generator_failures_total
                .with_label_values(&[e.reason()])
                .inc();
        }
        self.dispatch_seconds.observe(elapsed.as_secs_f64());
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carebot_common::GenerationError;

    #[test]
    fn test_export_lists_all_tags() {
        let metrics = RouterMetrics::new().unwrap();
        let text = metrics.export().unwrap();
        for tag in DecisionTag::ALL {
            assert!(text.contains(&format!("tag=\"{}\"", tag)), "missing {}", tag);
        }
    }

    #[test]
    fn test_observe_counts_failures() {
        let metrics = RouterMetrics::new().unwrap();
        metrics.observe(
            &RoutingDecision::GeneratedError(GenerationError::RateLimited),
            Duration::from_millis(5),
        );
        metrics.observe(&RoutingDecision::Emergency, Duration::from_millis(1));

        assert_eq!(
            metrics
                .decisions_total
                .with_label_values(&["generated_error"])
                .get(),
            1
        );
        assert_eq!(
            metrics
                .generator_failures_total
                .with_label_values(&["rate_limited"])
                .get(),
            1
        );
        assert_eq!(metrics.dispatch_seconds.get_sample_count(), 2);
    }
}

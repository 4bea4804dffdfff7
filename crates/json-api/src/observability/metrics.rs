//! Prometheus registry for HTTP traffic and stamp ledger activity.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder, core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

use stampbook_app::domain::transactions::records::StampTransactionKind;

const METRIC_PREFIX: &str = "stampbook";

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_requests_in_flight: IntGauge,
    stamp_transactions_total: IntCounterVec,
    stamps_total: IntCounterVec,
    rewards_unlocked_total: IntCounter,
}

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

impl Metrics {
    fn build() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some(METRIC_PREFIX.to_owned()), None)?;

        let http_requests_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "http_requests_total",
                    "HTTP requests by method, route, status class and status code.",
                ),
                &["method", "route", "status_class", "status_code"],
            )?,
        )?;

        let http_request_duration_seconds = register(
            &registry,
            HistogramVec::new(
                HistogramOpts::new(
                    "http_request_duration_seconds",
                    "HTTP request duration in seconds by method and route.",
                )
                .buckets(DURATION_BUCKETS.to_vec()),
                &["method", "route"],
            )?,
        )?;

        let http_requests_in_flight = register(
            &registry,
            IntGauge::with_opts(Opts::new(
                "http_requests_in_flight",
                "HTTP requests currently being served.",
            ))?,
        )?;

        let stamp_transactions_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "stamp_transactions_total",
                    "Recorded stamp transactions by kind.",
                ),
                &["kind"],
            )?,
        )?;

        let stamps_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new("stamps_total", "Stamps earned or redeemed, by kind."),
                &["kind"],
            )?,
        )?;

        let rewards_unlocked_total = register(
            &registry,
            IntCounter::new(
                "rewards_unlocked_total",
                "Earn transactions that reached a program's reward threshold.",
            )?,
        )?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            stamp_transactions_total,
            stamps_total,
            rewards_unlocked_total,
        })
    }
}

fn register<M>(registry: &Registry, metric: M) -> Result<M, prometheus::Error>
where
    M: Collector + Clone + 'static,
{
    registry.register(Box::new(metric.clone()))?;

    Ok(metric)
}

fn metrics() -> Option<&'static Metrics> {
    METRICS
        .get_or_init(|| match Metrics::build() {
            Ok(metrics) => Some(metrics),
            Err(source) => {
                error!("failed to build metrics registry: {source}");
                None
            }
        })
        .as_ref()
}

/// Keeps the in-flight gauge raised for as long as it is alive.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let tracked = metrics().is_some_and(|metrics| {
            metrics.http_requests_in_flight.inc();
            true
        });

        Self { tracked }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.http_requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code_label = status_code.to_string();

    metrics
        .http_requests_total
        .with_label_values(&[
            method,
            route,
            status_class(status_code),
            status_code_label.as_str(),
        ])
        .inc();

    metrics
        .http_request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a recorded stamp transaction. Tenants are not used as a label.
pub(crate) fn observe_stamp_transaction(
    kind: StampTransactionKind,
    amount: u32,
    reward_unlocked: bool,
) {
    let Some(metrics) = metrics() else {
        return;
    };

    let label = kind_label(kind);

    metrics
        .stamp_transactions_total
        .with_label_values(&[label])
        .inc();

    metrics
        .stamps_total
        .with_label_values(&[label])
        .inc_by(u64::from(amount));

    if reward_unlocked {
        metrics.rewards_unlocked_total.inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    }

    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

const fn kind_label(kind: StampTransactionKind) -> &'static str {
    match kind {
        StampTransactionKind::Earn => "earn",
        StampTransactionKind::Redeem => "redeem",
    }
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

//! W3C trace context extraction from incoming request headers.

use opentelemetry::{Context, global, propagation::Extractor, trace::TraceContextExt as _};
use salvo::http::{HeaderMap, HeaderName};

/// Remote parent context, when the caller sent a valid `traceparent`.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| {
        // Start from an empty context so a missing header never adopts the current span.
        let context = propagator.extract_with_context(&Context::new(), &Headers(headers));

        let is_remote_parent = context.span().span_context().is_valid();

        is_remote_parent.then_some(context)
    })
}

struct Headers<'a>(&'a HeaderMap);

impl Extractor for Headers<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use salvo::http::HeaderValue;

    use super::*;

    const TRACEPARENT: &str = "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01";

    fn install_propagator() {
        global::set_text_map_propagator(TraceContextPropagator::new());
    }

    #[test]
    fn valid_traceparent_becomes_parent() {
        install_propagator();

        let mut headers = HeaderMap::new();
        headers.insert("traceparent", HeaderValue::from_static(TRACEPARENT));

        let trace_id = extract_parent_context(&headers)
            .map(|context| context.span().span_context().trace_id().to_string());

        assert_eq!(
            trace_id.as_deref(),
            Some("4bf92f3577b34da6a3ce929d0e0e4736")
        );
    }

    #[test]
    fn missing_traceparent_has_no_parent() {
        install_propagator();

        assert!(extract_parent_context(&HeaderMap::new()).is_none());
    }

    #[test]
    fn malformed_traceparent_has_no_parent() {
        install_propagator();

        let mut headers = HeaderMap::new();
        headers.insert("traceparent", HeaderValue::from_static("not-a-trace"));

        assert!(extract_parent_context(&headers).is_none());
    }
}

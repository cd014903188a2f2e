//! Prometheus metrics recording.

use ainura_core::search::SortOrder;
use ainura_core::{ContentKind, Gallery};
use metrics::{counter, gauge, histogram};
use std::time::Duration;

/// Records HTTP request metrics.
pub fn record_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Records a similar-items query.
pub fn record_similar_query(kind: ContentKind, results: usize) {
    counter!("ainura_similar_queries_total", "kind" => kind.as_str()).increment(1);
    histogram!("ainura_similar_results", "kind" => kind.as_str()).record(results as f64);
}

/// Records a prompt search.
pub fn record_search_query(sort: SortOrder) {
    counter!("ainura_search_queries_total", "sort" => sort.as_str()).increment(1);
}

/// Records a write operation (upload, like, unlike, merge, save).
pub fn record_write_operation(kind: &str, operation: &str) {
    counter!(
        "ainura_writes_total",
        "kind" => kind.to_string(),
        "operation" => operation.to_string()
    )
    .increment(1);
}

/// Updates per-kind item gauges.
pub fn update_gallery_metrics(gallery: &Gallery) {
    for kind in ContentKind::ALL {
        gauge!("ainura_items_total", "kind" => kind.as_str()).set(gallery.len(kind) as f64);
    }
}

//! ainura-server: HTTP server for the AiNura gallery.
//!
//! Provides the REST API and the upstream listing client.
//! Ranking and storage logic lives in `ainura-core`.

/// REST API layer: Axum router, HTTP handlers, models, auth, metrics.
pub mod api;
/// Remote listing fetch and merge.
pub mod upstream;

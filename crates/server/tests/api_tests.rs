use ainura_core::content::ListingRecord;
use ainura_core::{ContentKind, Gallery};
use ainura_server::api::create_router;
use ainura_server::api::handlers::AppState;
use reqwest::Client;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::Value;
use std::sync::OnceLock;
use tempfile::TempDir;

/// All apps in this test binary share the one global recorder, so `/metrics`
/// renders what the handlers actually recorded.
fn prometheus_handle() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE
        .get_or_init(|| {
            metrics_exporter_prometheus::PrometheusBuilder::new()
                .install_recorder()
                .expect("Failed to install recorder")
        })
        .clone()
}

async fn spawn_app(api_key: Option<&str>) -> (String, TempDir) {
    spawn_app_with(api_key, seeded_gallery()).await
}

async fn spawn_app_with(api_key: Option<&str>, gallery: Gallery) -> (String, TempDir) {
    let tmp_dir = TempDir::new().expect("Failed to create temp dir");
    let data_dir = tmp_dir.path().to_str().unwrap().to_string();

    let prometheus_handle = prometheus_handle();

    let state = AppState {
        gallery,
        data_dir,
        api_key: api_key.map(|s| s.to_string()),
        prometheus_handle,
        start_time: std::time::Instant::now(),
        upstream: None,
    };

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base_url, tmp_dir)
}

fn record(id: u64, prompt: &str, author: &str, likes: u64) -> ListingRecord {
    ListingRecord {
        id,
        prompt: prompt.to_string(),
        author: author.to_string(),
        likes,
        url: Some(format!("/media/{id}.png")),
        thumbnail: None,
    }
}

fn seeded_gallery() -> Gallery {
    let gallery = Gallery::new();
    gallery.replace_partition(
        ContentKind::Image,
        vec![
            record(1, "fantasy castle in the clouds", "mira", 40),
            record(2, "ancient dragon awakening", "kai", 12),
            record(3, "neon city street at night", "li", 90),
            record(4, "enchanted forest with glowing mushrooms", "mira", 41),
            record(5, "retro portrait in sepia tones", "ana", 5),
        ],
    );
    gallery.replace_partition(
        ContentKind::Video,
        vec![
            record(1, "dragon flying over mountains", "kai", 20),
            record(2, "waves crashing on a beach", "li", 8),
        ],
    );
    gallery
}

fn client() -> Client {
    Client::new()
}

async fn get_json(url: String) -> (u16, Value) {
    let resp = client().get(url).send().await.expect("request failed");
    let status = resp.status().as_u16();
    let body: Value = resp.json().await.expect("invalid json");
    (status, body)
}

// ========== Health & Metrics ==========

#[tokio::test]
async fn test_health() {
    let (base_url, _tmp) = spawn_app(None).await;
    let (status, body) = get_json(format!("{}/health", base_url)).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["images"], 5);
    assert_eq!(body["videos"], 2);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let (base_url, _tmp) = spawn_app(None).await;
    let resp = client()
        .get(format!("{}/metrics", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_metrics_label_by_route_template() {
    let (base_url, _tmp) = spawn_app(None).await;
    for id in [3, 4] {
        let (status, _) = get_json(format!("{}/items/image/{}/similar", base_url, id)).await;
        assert_eq!(status, 200);
    }
    client()
        .get(format!("{}/no-such-route-7731", base_url))
        .send()
        .await
        .unwrap();

    let body = client()
        .get(format!("{}/metrics", base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains(r#"path="/items/:kind/:id/similar""#));
    assert!(body.contains(r#"path="unmatched""#));
    assert!(!body.contains("/items/image/3/similar"));
    assert!(!body.contains("/items/image/4/similar"));
    assert!(!body.contains("no-such-route-7731"));
}

#[tokio::test]
async fn test_request_id_and_security_headers() {
    let (base_url, _tmp) = spawn_app(None).await;
    let resp = client()
        .get(format!("{}/health", base_url))
        .send()
        .await
        .unwrap();
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(resp.headers()["x-content-type-options"], "nosniff");
    assert_eq!(resp.headers()["x-frame-options"], "DENY");
}

// ========== Listing ==========

#[tokio::test]
async fn test_list_items_paged_with_layout() {
    let (base_url, _tmp) = spawn_app(None).await;
    let (status, body) = get_json(format!("{}/items/images?limit=2", base_url)).await;
    assert_eq!(status, 200);
    assert_eq!(body["count"], 2);
    assert_eq!(body["total"], 5);
    assert_eq!(body["items"][0]["id"], 1);
    assert_eq!(body["items"][0]["type"], "image");
    assert_eq!(body["items"][0]["size"], "tall");
    assert_eq!(body["items"][1]["size"], "standard");

    let (_, body) = get_json(format!("{}/items/image?offset=4", base_url)).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["id"], 5);
}

#[tokio::test]
async fn test_list_unknown_kind_is_bad_request() {
    let (base_url, _tmp) = spawn_app(None).await;
    let (status, body) = get_json(format!("{}/items/gifs", base_url)).await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("gifs"));
}

#[tokio::test]
async fn test_list_limit_out_of_range() {
    let (base_url, _tmp) = spawn_app(None).await;
    let (status, _) = get_json(format!("{}/items/images?limit=101", base_url)).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_get_item() {
    let (base_url, _tmp) = spawn_app(None).await;
    let (status, body) = get_json(format!("{}/items/videos/1", base_url)).await;
    assert_eq!(status, 200);
    assert_eq!(body["prompt"], "dragon flying over mountains");
    assert_eq!(body["likes"], 20);
    assert!(body.get("size").is_none());

    let (status, body) = get_json(format!("{}/items/videos/99", base_url)).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "video 99 not found");
}

// ========== Similar ==========

#[tokio::test]
async fn test_similar_items_ranked() {
    let (base_url, _tmp) = spawn_app(None).await;
    let (status, body) = get_json(format!("{}/items/images/1/similar", base_url)).await;
    assert_eq!(status, 200);
    assert_eq!(body["reference"]["id"], 1);

    let results = body["results"].as_array().unwrap();
    assert!(!results.is_empty());
    assert_eq!(body["count"], results.len());
    for r in results {
        assert_eq!(r["type"], "image");
        assert_ne!(r["id"], 1);
        assert!(r["score"].as_f64().unwrap() > 5.0);
    }
    let scores: Vec<f64> = results.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(results[0]["size"], "tall");

    // The dragon candidate clears the threshold via the fantasy theme alone.
    assert!(results.iter().any(|r| r["id"] == 2));
}

#[tokio::test]
async fn test_similar_missing_reference() {
    let (base_url, _tmp) = spawn_app(None).await;
    let (status, body) = get_json(format!("{}/items/images/42/similar", base_url)).await;
    assert_eq!(status, 404);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_similar_pagination_keeps_total() {
    let (base_url, _tmp) = spawn_app(None).await;
    let (_, all) = get_json(format!("{}/items/images/1/similar", base_url)).await;
    let total = all["total"].as_u64().unwrap();

    let (_, page) = get_json(format!(
        "{}/items/images/1/similar?offset=1&limit=1",
        base_url
    ))
    .await;
    assert_eq!(page["total"], total);
    assert!(page["count"].as_u64().unwrap() <= 1);
    if total > 1 {
        assert_eq!(page["results"][0]["id"], all["results"][1]["id"]);
    }
}

// ========== Search ==========

#[tokio::test]
async fn test_search_across_kinds() {
    let (base_url, _tmp) = spawn_app(None).await;
    let (status, body) = get_json(format!("{}/search?q=dragon", base_url)).await;
    assert_eq!(status, 200);
    assert_eq!(body["query"], "dragon");
    assert_eq!(body["total"], 2);
    let kinds: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["type"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["image", "video"]);
    assert_eq!(body["results"][0]["relevance"], 5);
}

#[tokio::test]
async fn test_search_type_filter_and_sort() {
    let (base_url, _tmp) = spawn_app(None).await;
    let (_, body) = get_json(format!("{}/search?q=dragon&type=video", base_url)).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["results"][0]["type"], "video");

    let (_, body) = get_json(format!("{}/search?q=in&sort=likes", base_url)).await;
    let likes: Vec<u64> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["likes"].as_u64().unwrap())
        .collect();
    assert!(likes.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_search_rejects_bad_parameters() {
    let (base_url, _tmp) = spawn_app(None).await;
    let (status, _) = get_json(format!("{}/search?q=a&sort=random", base_url)).await;
    assert_eq!(status, 400);
    let (status, _) = get_json(format!("{}/search?q=a&type=audio", base_url)).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_search_query_length_counts_bytes() {
    let (base_url, _tmp) = spawn_app(None).await;
    let (status, _) = get_json(format!("{}/search?q={}", base_url, "a".repeat(512))).await;
    assert_eq!(status, 200);

    // 300 characters, 600 bytes
    let (status, body) = get_json(format!("{}/search?q={}", base_url, "é".repeat(300))).await;
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("512 bytes"));
}

#[tokio::test]
async fn test_search_empty_query() {
    let (base_url, _tmp) = spawn_app(None).await;
    let (status, body) = get_json(format!("{}/search", base_url)).await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 0);
}

// ========== Writes ==========

#[tokio::test]
async fn test_upload_item() {
    let (base_url, _tmp) = spawn_app(None).await;
    let resp = client()
        .post(format!("{}/items/images", base_url))
        .json(&serde_json::json!({
            "prompt": "misty mountain lake at dawn",
            "author": "ana",
            "url": "/media/new.png"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 6);
    assert_eq!(body["likes"], 0);

    let (_, list) = get_json(format!("{}/items/images?limit=1", base_url)).await;
    assert_eq!(list["items"][0]["id"], 6);
    assert_eq!(list["total"], 6);
}

#[tokio::test]
async fn test_upload_validation_and_conflict() {
    let (base_url, _tmp) = spawn_app(None).await;
    let resp = client()
        .post(format!("{}/items/videos", base_url))
        .json(&serde_json::json!({ "prompt": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client()
        .post(format!("{}/items/videos", base_url))
        .json(&serde_json::json!({ "id": 2, "prompt": "dup" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
}

#[tokio::test]
async fn test_like_and_unlike() {
    let (base_url, _tmp) = spawn_app(None).await;
    let resp = client()
        .post(format!("{}/items/images/5/like", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["likes"], 6);

    let resp = client()
        .delete(format!("{}/items/images/5/like", base_url))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["likes"], 5);

    let resp = client()
        .post(format!("{}/items/images/77/like", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_save_writes_listing_files() {
    let (base_url, tmp) = spawn_app(None).await;
    let resp = client()
        .post(format!("{}/admin/save", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let images = std::fs::read_to_string(tmp.path().join("images.json")).unwrap();
    let parsed: Value = serde_json::from_str(&images).unwrap();
    assert_eq!(parsed["images"].as_array().unwrap().len(), 5);
    assert!(tmp.path().join("videos.json").exists());
}

// ========== Auth ==========

#[tokio::test]
async fn test_auth_protects_writes_only() {
    let (base_url, _tmp) = spawn_app(Some("s3cret")).await;

    let (status, _) = get_json(format!("{}/items/images", base_url)).await;
    assert_eq!(status, 200);

    let resp = client()
        .post(format!("{}/items/images/1/like", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = client()
        .post(format!("{}/items/images/1/like", base_url))
        .header("Authorization", "Bearer wrong")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = client()
        .post(format!("{}/items/images/1/like", base_url))
        .header("Authorization", "Bearer s3cret")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_empty_gallery() {
    let (base_url, _tmp) = spawn_app_with(None, Gallery::new()).await;
    let (status, body) = get_json(format!("{}/items/videos", base_url)).await;
    assert_eq!(status, 200);
    assert_eq!(body["total"], 0);
    assert!(body["items"].as_array().unwrap().is_empty());
}

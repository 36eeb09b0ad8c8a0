use recstack_core::artifact::index::IdIndex;
use recstack_core::artifact::loader::{
    write_snapshot, CONTENT_SNAPSHOT, CO_PURCHASE_SNAPSHOT, CO_QUOTATION_SNAPSHOT,
    HISTORICAL_SNAPSHOT,
};
use recstack_core::artifact::matrix::{CsrMatrix, DenseMatrix};
use recstack_core::artifact::{CoOccurrenceArtifact, ContentArtifact, HistoricalArtifact};
use recstack_server::api::create_router;
use recstack_server::api::handlers::AppState;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tempfile::TempDir;

fn products() -> IdIndex<String> {
    IdIndex::from_pairs([
        ("q".to_string(), 0),
        ("x".to_string(), 1),
        ("y".to_string(), 2),
        ("z".to_string(), 3),
    ])
}

/// Content ranking for "q": x (0.9), y (0.5), z (0.2).
fn content_artifact() -> ContentArtifact {
    let data = vec![
        1.0, 0.9, 0.5, 0.2, //
        0.9, 1.0, 0.1, 0.1, //
        0.5, 0.1, 1.0, 0.1, //
        0.2, 0.1, 0.1, 1.0, //
    ];
    ContentArtifact {
        similarity: DenseMatrix::from_vec(4, 4, data).unwrap(),
        products: products(),
    }
}

/// Co-purchase ranking for "q": y (15), x (7). "z" has no data.
fn co_purchase_artifact() -> CoOccurrenceArtifact {
    let rows = vec![vec![(2, 15.0), (1, 7.0)], vec![], vec![], vec![]];
    CoOccurrenceArtifact {
        counts: CsrMatrix::from_rows(4, &rows),
        products: products(),
    }
}

fn co_quotation_artifact() -> CoOccurrenceArtifact {
    CoOccurrenceArtifact {
        counts: CsrMatrix::empty(4, 4),
        products: products(),
    }
}

/// Customer 10 bought items a and b; item x is 0.4-similar to a and
/// 0.3-similar to b. Customer 11 has no history.
fn historical_artifact() -> HistoricalArtifact {
    let item_similarity = DenseMatrix::from_vec(
        3,
        3,
        vec![
            1.0, 0.0, 0.4, //
            0.0, 1.0, 0.3, //
            0.4, 0.3, 1.0, //
        ],
    )
    .unwrap();
    HistoricalArtifact {
        user_item: CsrMatrix::from_rows(3, &[vec![(0, 1.0), (1, 1.0)], vec![]]),
        item_similarity,
        customers: IdIndex::from_pairs([(10, 0), (11, 1)]),
        items: IdIndex::from_pairs([
            ("item-a".to_string(), 0),
            ("item-b".to_string(), 1),
            ("item-x".to_string(), 2),
        ]),
        ready: true,
    }
}

fn write_all_artifacts(dir: &Path) {
    write_snapshot(&content_artifact(), &dir.join(CONTENT_SNAPSHOT)).unwrap();
    write_snapshot(&co_purchase_artifact(), &dir.join(CO_PURCHASE_SNAPSHOT)).unwrap();
    write_snapshot(&co_quotation_artifact(), &dir.join(CO_QUOTATION_SNAPSHOT)).unwrap();
    write_snapshot(&historical_artifact(), &dir.join(HISTORICAL_SNAPSHOT)).unwrap();
}

async fn spawn_app(artifact_dir: &Path) -> String {
    let ctx = recstack_core::artifact::loader::load_context(artifact_dir);

    let prometheus_handle =
        match metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder() {
            Ok(handle) => handle,
            Err(_) => metrics_exporter_prometheus::PrometheusBuilder::new()
                .build_recorder()
                .handle(),
        };

    let state = AppState {
        ctx: Arc::new(ctx),
        prometheus_handle,
        start_time: Instant::now(),
    };

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn spawn_app_with_artifacts() -> (String, TempDir) {
    let tmp = TempDir::new().unwrap();
    write_all_artifacts(tmp.path());
    let base = spawn_app(tmp.path()).await;
    (base, tmp)
}

#[tokio::test]
async fn test_health_reports_loaded_artifacts() {
    let (base, _tmp) = spawn_app_with_artifacts().await;
    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["artifacts_loaded"], 4);
}

#[tokio::test]
async fn test_artifacts_endpoint_reports_dimensions() {
    let (base, _tmp) = spawn_app_with_artifacts().await;
    let resp = reqwest::get(format!("{base}/artifacts")).await.unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["content"]["loaded"], true);
    assert_eq!(body["content"]["products"], 4);
    assert_eq!(body["historical"]["customers"], 2);
    assert_eq!(body["historical"]["ready"], true);
}

#[tokio::test]
async fn test_content_recommend_ranks_and_excludes_query() {
    let (base, _tmp) = spawn_app_with_artifacts().await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/recommend/content"))
        .json(&serde_json::json!({"product": "q", "n": 2}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["score_kind"], "similarity_score");
    assert_eq!(body["status"], "ok");
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["product"], "x");
    assert!(rows.iter().all(|r| r["product"] != "q"));
}

#[tokio::test]
async fn test_unknown_product_returns_empty_table_with_status() {
    let (base, _tmp) = spawn_app_with_artifacts().await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/recommend/content"))
        .json(&serde_json::json!({"product": "ghost"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "unknown_product");
    assert!(body["rows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_co_purchase_empty_row_yields_empty_ok() {
    let (base, _tmp) = spawn_app_with_artifacts().await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/recommend/co-purchase"))
        .json(&serde_json::json!({"product": "z"}))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["rows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_hybrid_scores_are_fused() {
    let (base, _tmp) = spawn_app_with_artifacts().await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/recommend/hybrid"))
        .json(&serde_json::json!({"product": "q"}))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["score_kind"], "hybrid_score");
    let rows = body["rows"].as_array().unwrap();
    // "x": rank 1 in content + rank 2 in co-purchase → 0.3/3 + 0.5/4.
    let x = rows.iter().find(|r| r["product"] == "x").unwrap();
    let score = x["score"].as_f64().unwrap();
    assert!((score - 0.225).abs() < 1e-6, "got {score}");
}

#[tokio::test]
async fn test_historical_accumulates_scores() {
    let (base, _tmp) = spawn_app_with_artifacts().await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/recommend/historical"))
        .json(&serde_json::json!({"customer": 10}))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["score_kind"], "recommendation_score");
    assert_eq!(body["status"], "ok");
    let rows = body["rows"].as_array().unwrap();
    let x = rows.iter().find(|r| r["product"] == "item-x").unwrap();
    let score = x["score"].as_f64().unwrap();
    assert!((score - 0.7).abs() < 1e-6, "got {score}");
}

#[tokio::test]
async fn test_customer_without_history_gets_empty_ok() {
    let (base, _tmp) = spawn_app_with_artifacts().await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/recommend/historical"))
        .json(&serde_json::json!({"customer": 11}))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["rows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_customer_returns_empty_table_with_status() {
    let (base, _tmp) = spawn_app_with_artifacts().await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/recommend/historical"))
        .json(&serde_json::json!({"customer": 999}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "unknown_customer");
    assert!(body["rows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_oversized_n_is_rejected() {
    let (base, _tmp) = spawn_app_with_artifacts().await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/recommend/content"))
        .json(&serde_json::json!({"product": "q", "n": 100000}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_invalid_hybrid_weight_is_rejected() {
    let (base, _tmp) = spawn_app_with_artifacts().await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/recommend/hybrid"))
        .json(&serde_json::json!({"product": "q", "content_weight": -0.5}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_missing_artifacts_degrade_to_empty_tables() {
    let tmp = TempDir::new().unwrap();
    let base = spawn_app(tmp.path()).await;
    let client = reqwest::Client::new();

    let health: serde_json::Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "degraded");

    let resp = client
        .post(format!("{base}/recommend/content"))
        .json(&serde_json::json!({"product": "q"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "artifact_unavailable");
    assert!(body["rows"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_metrics_endpoint_renders() {
    let (base, _tmp) = spawn_app_with_artifacts().await;
    let resp = reqwest::get(format!("{base}/metrics")).await.unwrap();
    assert_eq!(resp.status(), 200);
}

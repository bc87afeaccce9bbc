//! Catalog read API tests.

use serde_json::Value;
use storefront_server::build_app;
use storefront_server::core::{Config, ServerState};

async fn spawn_server() -> (String, ServerState, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    config.smtp_host = None;
    config.smtp_user = None;
    config.smtp_pass = None;

    let state = ServerState::initialize(&config).await.unwrap();
    let app = build_app().with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state, dir)
}

async fn seed_product(state: &ServerState) -> i64 {
    let product_id = sqlx::query(
        "INSERT INTO products (name, description, category, brand, base_price) \
         VALUES ('Runner', 'Mesh running shoe', 'Shoes', 'Acme', 2999.0)",
    )
    .execute(&state.pool)
    .await
    .unwrap()
    .last_insert_rowid();

    sqlx::query(
        "INSERT INTO variants (product_id, color, size, price, discount, stock, images) \
         VALUES (?, 'red', '42', 2999.0, 10, 5, '[\"red-1.jpg\",\"red-2.jpg\"]')",
    )
    .bind(product_id)
    .execute(&state.pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO variants (product_id, color, size, price, discount, stock, images) \
         VALUES (?, 'blue', '43', 3199.0, 0, 2, '[\"blue-1.jpg\"]')",
    )
    .bind(product_id)
    .execute(&state.pool)
    .await
    .unwrap();

    product_id
}

#[tokio::test]
async fn listing_carries_the_first_variant_as_main() {
    let (base, state, _dir) = spawn_server().await;
    let client = reqwest::Client::new();

    let product_id = seed_product(&state).await;

    let products: Vec<Value> = client
        .get(format!("{base}/api/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(products.len(), 1);
    let product = &products[0];
    assert_eq!(product["id"].as_i64().unwrap(), product_id);
    assert_eq!(product["name"], "Runner");
    assert_eq!(product["main_variant"]["color"], "red");
    assert_eq!(
        product["main_variant"]["images"],
        serde_json::json!(["red-1.jpg", "red-2.jpg"])
    );
}

#[tokio::test]
async fn detail_lists_every_variant_and_unknown_id_is_404() {
    let (base, state, _dir) = spawn_server().await;
    let client = reqwest::Client::new();

    let product_id = seed_product(&state).await;

    let res = client
        .get(format!("{base}/api/products/{product_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let detail: Value = res.json().await.unwrap();
    assert_eq!(detail["variants"].as_array().unwrap().len(), 2);
    assert_eq!(detail["variants"][1]["color"], "blue");

    let res = client
        .get(format!("{base}/api/products/9999"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn health_reports_healthy_with_db_check() {
    let (base, _state, _dir) = spawn_server().await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "healthy");

    let res = client
        .get(format!("{base}/health/detailed"))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert_eq!(body["checks"]["export_mirror"]["status"], "ok");
}

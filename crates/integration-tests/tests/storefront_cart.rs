//! Integration tests for the session cart.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use boutique_integration_tests::TestServer;
use reqwest::{Client, StatusCode};
use serde_json::Value;

async fn post(
    server: &TestServer,
    client: &Client,
    path: &str,
    form: &[(&str, &str)],
) -> (StatusCode, Value) {
    let resp = client
        .post(server.url(path))
        .form(form)
        .send()
        .await
        .expect("request failed");
    let status = resp.status();
    (status, resp.json::<Value>().await.expect("response is JSON"))
}

async fn get(server: &TestServer, client: &Client, path: &str) -> Value {
    client
        .get(server.url(path))
        .send()
        .await
        .expect("request failed")
        .json::<Value>()
        .await
        .expect("response is JSON")
}

fn quantities(cart: &Value) -> Vec<i64> {
    cart["lines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["quantity"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_new_session_has_empty_cart() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let cart = get(&server, &client, "/cart").await;
    assert_eq!(cart["state"], "empty");
    assert_eq!(cart["total_items"], 0);

    let count = get(&server, &client, "/cart/count").await;
    assert_eq!(count["count"], 0);
}

#[tokio::test]
async fn test_repeated_adds_merge_and_persist_across_requests() {
    let server = TestServer::spawn().await;
    let client = server.client();
    let line = [("product_id", "2"), ("size", "L"), ("color", "Black")];

    let (status, _) = post(
        &server,
        &client,
        "/cart/add",
        &[line[0], line[1], line[2], ("quantity", "2")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, cart) = post(
        &server,
        &client,
        "/cart/add",
        &[line[0], line[1], line[2], ("quantity", "3")],
    )
    .await;

    assert_eq!(cart["state"], "items");
    assert_eq!(quantities(&cart), vec![5]);

    let cart = get(&server, &client, "/cart").await;
    assert_eq!(cart["total_items"], 5);
    assert_eq!(cart["summary"]["subtotal"]["display"], "Rs 44,995");
    assert_eq!(get(&server, &client, "/cart/count").await["count"], 5);
}

#[tokio::test]
async fn test_quick_add_uses_first_options() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let (status, cart) = post(&server, &client, "/cart/add", &[("product_id", "1")]).await;

    assert_eq!(status, StatusCode::OK);
    let line = &cart["lines"][0];
    assert_eq!(line["size"], "S");
    assert_eq!(line["color"], "Navy Blue");
    assert_eq!(line["quantity"], 1);
}

#[tokio::test]
async fn test_selector_quantity_is_clamped() {
    let server = TestServer::spawn().await;
    let client = server.client();

    let (_, cart) = post(
        &server,
        &client,
        "/cart/add",
        &[("product_id", "5"), ("quantity", "25")],
    )
    .await;
    assert_eq!(quantities(&cart), vec![10]);
}

#[tokio::test]
async fn test_undeclared_options_leave_cart_unchanged() {
    let server = TestServer::spawn().await;
    let client = server.client();
    post(&server, &client, "/cart/add", &[("product_id", "1")]).await;

    let (status, body) = post(
        &server,
        &client,
        "/cart/add",
        &[("product_id", "1"), ("size", "XXXL"), ("color", "Navy Blue")],
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("XXXL"));

    let (status, _) = post(
        &server,
        &client,
        "/cart/add",
        &[("product_id", "1"), ("size", "M")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&server, &client, "/cart/add", &[("product_id", "404")]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(get(&server, &client, "/cart/count").await["count"], 1);
}

#[tokio::test]
async fn test_malformed_forms_are_json_bad_requests() {
    let server = TestServer::spawn().await;
    let client = server.client();
    post(&server, &client, "/cart/add", &[("product_id", "1")]).await;

    let malformed: [(&str, &[(&str, &str)]); 4] = [
        ("/cart/add", &[("product_id", "abc")]),
        ("/cart/add", &[("size", "M"), ("color", "Red")]),
        ("/cart/add", &[("product_id", "1"), ("quantity", "two")]),
        ("/cart/update", &[("product_id", "1"), ("size", "S")]),
    ];
    for (path, form) in malformed {
        let resp = client
            .post(server.url(path))
            .form(form)
            .send()
            .await
            .expect("request failed");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{path} {form:?}");
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json"
        );
        let body = resp.json::<Value>().await.expect("response is JSON");
        assert!(body["error"].is_string());
    }

    assert_eq!(get(&server, &client, "/cart/count").await["count"], 1);
}

#[tokio::test]
async fn test_update_floors_at_one_and_remove_is_idempotent() {
    let server = TestServer::spawn().await;
    let client = server.client();
    let key = [("product_id", "3"), ("size", "M"), ("color", "Red")];

    let with_quantity = |quantity| [key[0], key[1], key[2], ("quantity", quantity)];

    post(&server, &client, "/cart/add", &with_quantity("4")).await;

    let (_, cart) = post(&server, &client, "/cart/update", &with_quantity("0")).await;
    assert_eq!(quantities(&cart), vec![1]);

    let (_, cart) = post(&server, &client, "/cart/update", &with_quantity("6")).await;
    assert_eq!(quantities(&cart), vec![6]);

    let (status, cart) = post(&server, &client, "/cart/remove", &key).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["state"], "empty");

    let (status, cart) = post(&server, &client, "/cart/remove", &key).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["state"], "empty");
}

#[tokio::test]
async fn test_clear_empties_cart() {
    let server = TestServer::spawn().await;
    let client = server.client();
    post(&server, &client, "/cart/add", &[("product_id", "1")]).await;
    post(&server, &client, "/cart/add", &[("product_id", "2")]).await;

    let (_, cart) = post(&server, &client, "/cart/clear", &[]).await;
    assert_eq!(cart["state"], "empty");
    assert_eq!(get(&server, &client, "/cart/count").await["count"], 0);
}

#[tokio::test]
async fn test_sessions_have_independent_carts() {
    let server = TestServer::spawn().await;
    let alice = server.client();
    let bob = server.client();

    post(&server, &alice, "/cart/add", &[("product_id", "1"), ("quantity", "2")]).await;
    post(&server, &bob, "/cart/add", &[("product_id", "4")]).await;

    assert_eq!(get(&server, &alice, "/cart/count").await["count"], 2);
    assert_eq!(get(&server, &bob, "/cart/count").await["count"], 1);

    let fresh = server.client();
    assert_eq!(get(&server, &fresh, "/cart").await["state"], "empty");
}

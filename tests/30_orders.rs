mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn create_then_read_back_returns_the_same_order() {
    let app = common::make_app().await;
    let token = common::login_token(&app).await;

    let (status, body) = common::request(
        &app,
        Method::POST,
        "/order",
        Some(&token),
        Some(json!({
            "numeroPedido": "P100",
            "valorTotal": 42.0,
            "dataCriacao": "2024-03-01",
            "items": [
                { "idItem": 1, "quantidadeItem": 3, "valorItem": 10.0 },
                { "idItem": 2, "quantidadeItem": 1, "valorItem": 12.0 }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["order"]["orderId"], json!("P100"));
    assert_eq!(body["order"]["items"].as_array().unwrap().len(), 2);

    let (status, body) =
        common::request(&app, Method::GET, "/order/P100", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orderId"], json!("P100"));
    assert_eq!(body["value"], json!(42.0));
    assert_eq!(body["creationDate"], json!("2024-03-01"));
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_transforms_item_fields_exactly() {
    let app = common::make_app().await;
    let token = common::login_token(&app).await;

    let (status, body) = common::request(
        &app,
        Method::POST,
        "/order",
        Some(&token),
        Some(json!({
            "numeroPedido": "X1",
            "valorTotal": 10.5,
            "dataCriacao": "2024-01-01",
            "items": [{ "idItem": 7, "quantidadeItem": 2, "valorItem": 5.25 }]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body["order"]["items"],
        json!([{ "productId": 7, "quantity": 2, "price": 5.25 }])
    );
}

#[tokio::test]
async fn create_without_order_number_is_400_and_persists_nothing() {
    let app = common::make_app().await;
    let token = common::login_token(&app).await;

    let (status, body) = common::request(
        &app,
        Method::POST,
        "/order",
        Some(&token),
        Some(json!({ "valorTotal": 10.5, "items": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("numeroPedido"));

    // Nothing was written: the list endpoint still reports an empty store.
    let (status, _) = common::request(&app, Method::GET, "/order/list", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_unknown_order_is_404() {
    let app = common::make_app().await;
    let token = common::login_token(&app).await;

    let (status, body) =
        common::request(&app, Method::GET, "/order/nope", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn list_partitions_items_by_order() {
    let app = common::make_app().await;
    let token = common::login_token(&app).await;

    for (id, product) in [("A1", 1), ("B2", 2)] {
        let (status, _) = common::request(
            &app,
            Method::POST,
            "/order",
            Some(&token),
            Some(json!({
                "numeroPedido": id,
                "valorTotal": 5.0,
                "dataCriacao": "2024-01-01",
                "items": [{ "idItem": product, "quantidadeItem": 1, "valorItem": 5.0 }]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) =
        common::request(&app, Method::GET, "/order/list", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let orders = body.as_array().expect("array body");
    assert_eq!(orders.len(), 2);
    for order in orders {
        let items = order["items"].as_array().unwrap();
        assert_eq!(items.len(), 1, "each order owns exactly its own item");
        let expected = if order["orderId"] == json!("A1") { 1 } else { 2 };
        assert_eq!(items[0]["productId"], json!(expected));
    }
}

#[tokio::test]
async fn list_of_empty_store_is_404() {
    let app = common::make_app().await;
    let token = common::login_token(&app).await;

    let (status, body) =
        common::request(&app, Method::GET, "/order/list", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn update_replaces_the_item_set_entirely() {
    let app = common::make_app().await;
    let token = common::login_token(&app).await;

    let (status, _) = common::request(
        &app,
        Method::POST,
        "/order",
        Some(&token),
        Some(json!({
            "numeroPedido": "U1",
            "valorTotal": 10.0,
            "dataCriacao": "2024-01-01",
            "items": [
                { "idItem": 7, "quantidadeItem": 2, "valorItem": 5.0 },
                { "idItem": 8, "quantidadeItem": 1, "valorItem": 2.0 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = common::request(
        &app,
        Method::PUT,
        "/order/U1",
        Some(&token),
        Some(json!({
            "valorTotal": 20.0,
            "dataCriacao": "2024-02-02",
            "items": [{ "idItem": 9, "quantidadeItem": 4, "valorItem": 5.0 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    // The stored set is exactly the submitted set, not a union.
    let (status, body) = common::request(&app, Method::GET, "/order/U1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], json!(20.0));
    assert_eq!(body["creationDate"], json!("2024-02-02"));
    assert_eq!(
        body["items"],
        json!([{ "productId": 9, "quantity": 4, "price": 5.0 }])
    );
}

#[tokio::test]
async fn update_unknown_order_is_404_with_no_side_effect() {
    let app = common::make_app().await;
    let token = common::login_token(&app).await;

    let (status, _) = common::request(
        &app,
        Method::POST,
        "/order",
        Some(&token),
        Some(json!({
            "numeroPedido": "K1",
            "valorTotal": 1.0,
            "dataCriacao": "2024-01-01",
            "items": [{ "idItem": 3, "quantidadeItem": 1, "valorItem": 1.0 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = common::request(
        &app,
        Method::PUT,
        "/order/missing",
        Some(&token),
        Some(json!({ "valorTotal": 9.0, "items": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The existing order is untouched.
    let (status, body) = common::request(&app, Method::GET, "/order/K1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], json!(1.0));
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_cascades_to_items() {
    let app = common::make_app().await;
    let token = common::login_token(&app).await;

    let (status, _) = common::request(
        &app,
        Method::POST,
        "/order",
        Some(&token),
        Some(json!({
            "numeroPedido": "D1",
            "valorTotal": 5.0,
            "dataCriacao": "2024-01-01",
            "items": [{ "idItem": 5, "quantidadeItem": 5, "valorItem": 1.0 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) =
        common::request(&app, Method::DELETE, "/order/D1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let (status, _) = common::request(&app, Method::GET, "/order/D1", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Re-creating the same id with no items shows none of the old rows
    // survived under that order id.
    let (status, _) = common::request(
        &app,
        Method::POST,
        "/order",
        Some(&token),
        Some(json!({ "numeroPedido": "D1", "valorTotal": 6.0, "dataCriacao": "2024-01-02" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = common::request(&app, Method::GET, "/order/D1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn delete_unknown_order_is_404() {
    let app = common::make_app().await;
    let token = common::login_token(&app).await;

    let (status, _) =
        common::request(&app, Method::DELETE, "/order/nope", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

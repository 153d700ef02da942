//! Session cart through the full router.

use armour_integration_tests::TestApp;
use axum::http::StatusCode;
use serde_json::json;

// =============================================================================
// Catalog Products
// =============================================================================

#[tokio::test]
async fn test_add_to_cart_counts_units() {
    let mut app = TestApp::new();

    let first = app
        .post_json("/add-to-cart", &json!({ "productId": "tactical-combat-tee" }))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.json(), json!({ "cartCount": 1 }));

    let second = app
        .post_json("/add-to-cart", &json!({ "productId": "tactical-combat-tee" }))
        .await;
    assert_eq!(second.json(), json!({ "cartCount": 2 }));

    let page = app.get("/cart").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Tactical Combat Tee"));
    assert!(page.body.contains("₹1798"));
    assert!(page.body.contains(r#"<span id="cart-count">2</span>"#));
}

#[tokio::test]
async fn test_add_to_cart_unknown_product_is_not_found() {
    let mut app = TestApp::new();

    let response = app
        .post_json("/add-to-cart", &json!({ "productId": "kevlar-t-shirt" }))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cart_survives_login() {
    let mut app = TestApp::new();
    app.post_json("/add-to-cart", &json!({ "productId": "armour-hoodie" }))
        .await;

    app.sign_in("Cadet", "cadet@example.com").await;

    let page = app.get("/cart").await;
    assert!(page.body.contains("Armour Hoodie"));
}

// =============================================================================
// Client-described Products
// =============================================================================

#[tokio::test]
async fn test_cart_add_accepts_number_and_display_prices() {
    let mut app = TestApp::new();

    let numeric = app
        .post_json(
            "/cart/add",
            &json!({ "id": "custom-patch", "name": "Custom Patch", "price": 249, "image": "" }),
        )
        .await;
    assert_eq!(numeric.status, StatusCode::OK);
    assert_eq!(numeric.json(), json!({ "success": true, "cartCount": 1 }));

    let display = app
        .post_json(
            "/cart/add",
            &json!({ "id": "morale-patch", "name": "Morale Patch", "price": "₹1,299" }),
        )
        .await;
    assert_eq!(display.json(), json!({ "success": true, "cartCount": 2 }));

    let page = app.get("/cart").await;
    assert!(page.body.contains("₹1548"));
}

#[tokio::test]
async fn test_cart_add_same_id_increments() {
    let mut app = TestApp::new();
    let item = json!({ "id": "p1", "name": "Tee", "price": "899", "image": "/i.jpg" });

    let first = app.post_json("/cart/add", &item).await;
    assert_eq!(first.json(), json!({ "success": true, "cartCount": 1 }));

    let second = app.post_json("/cart/add", &item).await;
    assert_eq!(second.json(), json!({ "success": true, "cartCount": 2 }));

    let page = app.get("/cart").await;
    assert_eq!(page.body.matches("/cart/remove/p1").count(), 1);
    assert!(page.body.contains("₹1798"));
}

#[tokio::test]
async fn test_cart_add_rejects_oversized_prices() {
    let mut app = TestApp::new();
    let item = json!({ "id": "big", "name": "Big", "price": "79228162514264337593543950335" });

    for _ in 0..2 {
        let response = app.post_json("/cart/add", &item).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json()["success"], json!(false));
    }

    let page = app.get("/cart").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_cart_totals_render_at_price_ceiling() {
    let mut app = TestApp::new();
    let item = json!({ "id": "crate", "name": "Crate", "price": "₹1,00,00,000" });

    app.post_json("/cart/add", &item).await;
    let second = app.post_json("/cart/add", &item).await;
    assert_eq!(second.json(), json!({ "success": true, "cartCount": 2 }));

    let page = app.get("/cart").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("₹20000000"));
}

#[tokio::test]
async fn test_cart_add_rejects_bad_prices() {
    let mut app = TestApp::new();

    for price in [json!("abc"), json!("$19.99"), json!(-5)] {
        let response = app
            .post_json("/cart/add", &json!({ "id": "patch", "price": price }))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{price}");
        assert_eq!(response.json()["success"], json!(false));
    }

    let page = app.get("/cart").await;
    assert!(page.body.contains("Your cart is empty"));
}

// =============================================================================
// Removal
// =============================================================================

#[tokio::test]
async fn test_remove_drops_whole_line() {
    let mut app = TestApp::new();
    for _ in 0..3 {
        app.post_json("/add-to-cart", &json!({ "productId": "operator-apparel" }))
            .await;
    }

    let response = app.get("/cart/remove/operator-apparel").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/cart"));

    let page = app.get("/cart").await;
    assert!(page.body.contains("Your cart is empty"));
    assert!(page.body.contains(r#"<span id="cart-count">0</span>"#));
}

#[tokio::test]
async fn test_remove_missing_line_still_redirects() {
    let mut app = TestApp::new();

    let response = app.get("/cart/remove/not-in-cart").await;
    assert_eq!(response.location(), Some("/cart"));
}

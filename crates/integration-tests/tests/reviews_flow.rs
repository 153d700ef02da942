//! Review submission, listing, confirmation email and deletion.

use armour_integration_tests::{RecordingNotifier, TestApp};
use armour_storefront::db::ReviewStore;
use axum::http::StatusCode;

fn review_fields<'a>(product_id: &'a str, rating: &'a str, message: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("product_id", product_id),
        ("name", "Cadet"),
        ("email", "cadet@example.com"),
        ("rating", rating),
        ("message", message),
    ]
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn test_general_review_redirects_to_list() {
    let mut app = TestApp::new();

    let response = app
        .post_form("/reviews", &review_fields("", "5", "Great fit, solid stitching"))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/reviews"));

    let page = app.get("/reviews").await;
    assert!(page.body.contains("Great fit, solid stitching"));
    assert!(page.body.contains("★★★★★"));

    let sent = app.notifier().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].email.as_str(), "cadet@example.com");
    assert_eq!(sent[0].message, "Great fit, solid stitching");
}

#[tokio::test]
async fn test_product_review_shows_on_product_page() {
    let mut app = TestApp::new();

    let response = app
        .post_form(
            "/reviews",
            &review_fields("tactical-combat-tee", "4", "Runs a little large"),
        )
        .await;
    assert_eq!(
        response.location(),
        Some("/product/tactical-combat-tee?review_success=true")
    );

    let product = app.get("/product/tactical-combat-tee?review_success=true").await;
    assert_eq!(product.status, StatusCode::OK);
    assert!(product.body.contains("Thank you! Your review has been posted."));
    assert!(product.body.contains("Runs a little large"));

    let other = app.get("/product/operator-apparel").await;
    assert!(!other.body.contains("Runs a little large"));
    assert!(other.body.contains("No reviews yet."));

    // The general list includes product reviews too
    let all = app.get("/reviews").await;
    assert!(all.body.contains("Runs a little large"));
}

#[tokio::test]
async fn test_invalid_review_is_not_stored_or_acknowledged() {
    let mut app = TestApp::new();

    for rating in ["0", "6", "five"] {
        let response = app
            .post_form("/reviews", &review_fields("", rating, "Decent"))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{rating}");
    }

    let blank = app.post_form("/reviews", &review_fields("", "3", "   ")).await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    assert!(app.storage().list_reviews().await.unwrap().is_empty());
    assert!(app.notifier().sent().is_empty());
}

#[tokio::test]
async fn test_failed_email_does_not_lose_review() {
    let mut app = TestApp::with_notifier(RecordingNotifier::failing());

    let response = app
        .post_form("/reviews", &review_fields("", "3", "Zipper broke after a week"))
        .await;
    assert_eq!(response.location(), Some("/reviews"));

    assert_eq!(app.notifier().sent().len(), 1);
    let stored = app.storage().list_reviews().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].message, "Zipper broke after a week");
}

#[tokio::test]
async fn test_reviews_are_listed_newest_first() {
    let mut app = TestApp::new();
    app.post_form("/reviews", &review_fields("", "2", "First impressions"))
        .await;
    app.post_form("/reviews", &review_fields("", "5", "Second thoughts"))
        .await;

    let page = app.get("/reviews").await;
    let second = page.body.find("Second thoughts").unwrap();
    let first = page.body.find("First impressions").unwrap();
    assert!(second < first);
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn test_delete_review() {
    let mut app = TestApp::new();
    app.post_form("/reviews", &review_fields("", "1", "Wrong size sent"))
        .await;
    let id = app.storage().list_reviews().await.unwrap()[0].id;

    let response = app
        .post_form(&format!("/reviews/delete/{id}"), &[])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/reviews"));
    assert!(app.storage().list_reviews().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_unknown_or_malformed_id_redirects() {
    let mut app = TestApp::new();

    for path in ["/reviews/delete/999", "/reviews/delete/not-a-number"] {
        let response = app.post_form(path, &[]).await;
        assert_eq!(response.location(), Some("/reviews"), "{path}");
    }
}

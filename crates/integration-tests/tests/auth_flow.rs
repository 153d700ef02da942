//! Registration, login and logout through the full router.

use armour_integration_tests::{TEST_PASSWORD, TestApp};
use axum::http::StatusCode;

// =============================================================================
// Access Control
// =============================================================================

#[tokio::test]
async fn test_home_requires_login() {
    let mut app = TestApp::new();

    let response = app.get("/").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login"));
}

#[tokio::test]
async fn test_public_pages_do_not_require_login() {
    let mut app = TestApp::new();

    for path in ["/about", "/size-guide", "/contact", "/products", "/reviews", "/cart"] {
        let response = app.get(path).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
    }
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_redirects_to_login_with_notice() {
    let mut app = TestApp::new();

    let response = app
        .post_form(
            "/register",
            &[
                ("name", "Cadet"),
                ("email", "cadet@example.com"),
                ("password", TEST_PASSWORD),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location(), Some("/login?registered=1"));

    // Registering does not log in
    assert_eq!(app.get("/").await.location(), Some("/login"));

    let login = app.get("/login?registered=1").await;
    assert!(login.body.contains("Account created. Please log in."));
}

#[tokio::test]
async fn test_register_duplicate_email_rerenders_form() {
    let mut app = TestApp::new();
    let fields = [
        ("name", "Cadet"),
        ("email", "cadet@example.com"),
        ("password", TEST_PASSWORD),
    ];

    app.post_form("/register", &fields).await;
    let second = app
        .post_form(
            "/register",
            &[
                ("name", "Other Cadet"),
                ("email", "CADET@example.com"),
                ("password", TEST_PASSWORD),
            ],
        )
        .await;

    assert_eq!(second.status, StatusCode::OK);
    assert!(second.body.contains("Email already exists"));
    assert!(second.body.contains("Other Cadet"));
}

#[tokio::test]
async fn test_register_validation_messages() {
    let mut app = TestApp::new();

    let short = app
        .post_form(
            "/register",
            &[("name", "Cadet"), ("email", "cadet@example.com"), ("password", "short")],
        )
        .await;
    assert!(short.body.contains("password must be at least 8 characters"));

    let bad_email = app
        .post_form(
            "/register",
            &[("name", "Cadet"), ("email", "not-an-email"), ("password", TEST_PASSWORD)],
        )
        .await;
    assert!(bad_email.body.contains("Please enter a valid email address"));

    let no_name = app
        .post_form(
            "/register",
            &[("name", "  "), ("email", "cadet@example.com"), ("password", TEST_PASSWORD)],
        )
        .await;
    assert!(no_name.body.contains("Please enter your name"));
}

// =============================================================================
// Login / Logout
// =============================================================================

#[tokio::test]
async fn test_login_with_wrong_password_is_rejected() {
    let mut app = TestApp::new();
    app.post_form(
        "/register",
        &[
            ("name", "Cadet"),
            ("email", "cadet@example.com"),
            ("password", TEST_PASSWORD),
        ],
    )
    .await;

    let response = app
        .post_form(
            "/login",
            &[("email", "cadet@example.com"), ("password", "wrong-password")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Invalid email or password"));
    assert_eq!(app.get("/").await.location(), Some("/login"));

    let unknown = app
        .post_form(
            "/login",
            &[("email", "ghost@example.com"), ("password", TEST_PASSWORD)],
        )
        .await;
    assert!(unknown.body.contains("Invalid email or password"));
}

#[tokio::test]
async fn test_login_logout_cycle() {
    let mut app = TestApp::new();
    app.sign_in("Cadet", "cadet@example.com").await;

    let home = app.get("/").await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains("Hi, Cadet"));
    assert!(home.body.contains("Tactical Combat Tee"));

    // Logged-in users skip the auth forms
    assert_eq!(app.get("/login").await.location(), Some("/"));
    assert_eq!(app.get("/register").await.location(), Some("/"));

    let logout = app.get("/logout").await;
    assert_eq!(logout.status, StatusCode::SEE_OTHER);
    assert_eq!(logout.location(), Some("/login"));

    assert_eq!(app.get("/").await.location(), Some("/login"));
}

#[tokio::test]
async fn test_sessions_are_per_browser() {
    let mut app = TestApp::new();
    app.sign_in("Cadet", "cadet@example.com").await;

    app.clear_cookies();
    assert_eq!(app.get("/").await.location(), Some("/login"));
}

// =============================================================================
// Storage Failures
// =============================================================================

#[tokio::test]
async fn test_login_storage_failure_rerenders_form() {
    let mut app = TestApp::with_failing_storage();

    let response = app
        .post_form(
            "/login",
            &[("email", "cadet@example.com"), ("password", TEST_PASSWORD)],
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("Something went wrong"));
    assert!(response.body.contains(r#"action="/login""#));
    assert!(response.body.contains(r#"value="cadet@example.com""#));
    assert_eq!(app.get("/").await.location(), Some("/login"));
}

#[tokio::test]
async fn test_register_storage_failure_rerenders_form() {
    let mut app = TestApp::with_failing_storage();

    let response = app
        .post_form(
            "/register",
            &[
                ("name", "Cadet"),
                ("email", "cadet@example.com"),
                ("password", TEST_PASSWORD),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("Something went wrong"));
    assert!(response.body.contains(r#"action="/register""#));
    assert!(response.body.contains(r#"value="Cadet""#));
}

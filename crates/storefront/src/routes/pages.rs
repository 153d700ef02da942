//! Home and static page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::catalog::{FEATURED, Product};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::PageContext;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub ctx: PageContext,
    pub featured: Vec<Product>,
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub ctx: PageContext,
}

/// Size guide template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/size_guide.html")]
pub struct SizeGuideTemplate {
    pub ctx: PageContext,
}

/// Display the home page. Anonymous visitors are sent to `/login`.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ctx: PageContext,
) -> impl IntoResponse {
    tracing::debug!(user_id = %user.id, "Rendering home page");
    let featured = state
        .catalog()
        .collection(FEATURED)
        .map(|c| c.products.clone())
        .unwrap_or_default();

    HomeTemplate { ctx, featured }
}

/// Display the about page.
pub async fn about(ctx: PageContext) -> impl IntoResponse {
    AboutTemplate { ctx }
}

/// Display the size guide.
pub async fn size_guide(ctx: PageContext) -> impl IntoResponse {
    SizeGuideTemplate { ctx }
}

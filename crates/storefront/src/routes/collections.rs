//! Collection page handlers.
//!
//! Every collection renders through the same template; the route table binds
//! each path to a slug with [`collection_page`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{MethodRouter, get},
};

use crate::catalog::{Collection, FEATURED};
use crate::error::AppError;
use crate::filters;
use crate::routes::PageContext;
use crate::state::AppState;

/// Collection page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/collection.html")]
pub struct CollectionTemplate {
    pub ctx: PageContext,
    pub collection: Collection,
}

/// A `GET` route rendering the collection with `slug`.
pub fn collection_page(slug: &'static str) -> MethodRouter<AppState> {
    get(move |State(state): State<AppState>, ctx: PageContext| async move {
        show(&state, ctx, slug)
    })
}

/// Canonical path of a collection page.
#[must_use]
pub fn collection_path(slug: &str) -> String {
    if slug == FEATURED {
        "/products".to_string()
    } else {
        format!("/{slug}")
    }
}

fn show(state: &AppState, ctx: PageContext, slug: &str) -> Response {
    match state.catalog().collection(slug) {
        Some(collection) => CollectionTemplate {
            ctx,
            collection: collection.clone(),
        }
        .into_response(),
        None => AppError::NotFound(format!("collection {slug}")).into_response(),
    }
}

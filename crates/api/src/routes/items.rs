//! Route definitions for the `/items` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Item routes mounted at `/items`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// GET    /summary           -> summary
/// GET    /{id}              -> get_by_id
/// PATCH  /{id}              -> patch
/// DELETE /{id}              -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list).post(items::create))
        .route("/summary", get(items::summary))
        .route(
            "/{id}",
            get(items::get_by_id)
                .patch(items::patch)
                .delete(items::delete),
        )
}

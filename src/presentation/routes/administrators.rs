use crate::presentation::handlers::administrators;
use axum::{
    Router,
    routing::{get, post},
};

use crate::infrastructure::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(administrators::create_admin).get(administrators::list_admins),
        )
        .route(
            "/{id}",
            get(administrators::get_admin)
                .patch(administrators::update_admin)
                .delete(administrators::delete_admin),
        )
        .route("/{id}/restore", post(administrators::restore_admin))
}

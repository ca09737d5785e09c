use axum::{extract::State, response::Response};

use super::AdminState;
use super::super::db_health_response;

pub(crate) async fn admin_health(State(state): State<AdminState>) -> Response {
    db_health_response(state.db.health_check().await)
}

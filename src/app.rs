use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/view/:name", get(handlers::show_view))
        .route("/tabs/:category", get(handlers::select_tab))
        .route("/modal/new", get(handlers::open_create_modal))
        .route("/modal/save", post(handlers::save_modal))
        .route("/modal/cancel", post(handlers::cancel_modal))
        .route("/tasks/:id/edit", get(handlers::open_edit_modal))
        .route("/tasks/:id/toggle", post(handlers::toggle_task))
        .route("/details/select", get(handlers::select_detail))
        .route("/details/save", post(handlers::save_detail))
        .route("/details/delete", post(handlers::delete_detail))
        .route("/theme", post(handlers::set_theme))
        .route("/accent", post(handlers::set_accent))
        .route("/api/session", get(handlers::get_session))
        .route("/api/tasks", get(handlers::list_tasks).post(handlers::create_task))
        .route("/api/stats", get(handlers::get_stats))
        .with_state(state)
}

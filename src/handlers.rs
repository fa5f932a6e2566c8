use crate::errors::AppError;
use crate::models::{
    Accent, AccentForm, Category, DeleteForm, DetailForm, DetailSelectQuery, LoginForm,
    SessionResponse, StatsResponse, Task, TaskForm, Theme, ThemeForm, ToggleForm,
};
use crate::state::AppState;
use crate::stats::build_stats;
use crate::ui::render_page;
use crate::view::View;
use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Form, Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let mut controller = state.controller.lock().await;
    let screen = controller.screen();
    Html(render_page(&screen).into_string())
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, AppError> {
    let mut controller = state.controller.lock().await;
    // A rejection leaves its notice on the login page.
    controller.login(&form.email, &form.password).await?;
    Ok(Redirect::to("/"))
}

pub async fn logout(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.controller.lock().await.logout().await?;
    Ok(Redirect::to("/"))
}

pub async fn show_view(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Redirect, AppError> {
    let view = View::parse(&name).ok_or_else(|| AppError::bad_request(format!("unknown view '{name}'")))?;
    state.controller.lock().await.set_view(view);
    Ok(Redirect::to("/"))
}

pub async fn select_tab(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Redirect, AppError> {
    let category = Category::parse(&name)
        .ok_or_else(|| AppError::bad_request(format!("unknown class '{name}'")))?;
    let mut controller = state.controller.lock().await;
    controller.select_category(category);
    controller.set_view(View::Main);
    Ok(Redirect::to("/"))
}

pub async fn open_create_modal(State(state): State<AppState>) -> Redirect {
    state.controller.lock().await.open_create_modal();
    Redirect::to("/")
}

pub async fn open_edit_modal(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    state.controller.lock().await.open_edit_modal(&id);
    Redirect::to("/")
}

pub async fn cancel_modal(State(state): State<AppState>) -> Redirect {
    state.controller.lock().await.cancel_modal();
    Redirect::to("/")
}

pub async fn save_modal(
    State(state): State<AppState>,
    Form(form): Form<TaskForm>,
) -> Result<Redirect, AppError> {
    let mut controller = state.controller.lock().await;
    if controller.is_logged_in() {
        controller.save_modal(form).await?;
    }
    Ok(Redirect::to("/"))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect, AppError> {
    let mut controller = state.controller.lock().await;
    if controller.is_logged_in() {
        controller.set_done(&id, form.done.is_some()).await?;
    }
    Ok(Redirect::to("/"))
}

pub async fn select_detail(
    State(state): State<AppState>,
    Query(query): Query<DetailSelectQuery>,
) -> Redirect {
    let mut controller = state.controller.lock().await;
    controller.select_detail(&query.id);
    controller.set_view(View::Details);
    Redirect::to("/")
}

pub async fn save_detail(
    State(state): State<AppState>,
    Form(form): Form<DetailForm>,
) -> Result<Redirect, AppError> {
    let mut controller = state.controller.lock().await;
    if controller.is_logged_in() {
        controller.save_detail(&form).await?;
    }
    Ok(Redirect::to("/"))
}

pub async fn delete_detail(
    State(state): State<AppState>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    let mut controller = state.controller.lock().await;
    if controller.is_logged_in() {
        controller.delete_task(&form.id).await?;
    }
    Ok(Redirect::to("/"))
}

pub async fn set_theme(
    State(state): State<AppState>,
    Form(form): Form<ThemeForm>,
) -> Result<Redirect, AppError> {
    let theme = Theme::parse(&form.theme)
        .ok_or_else(|| AppError::bad_request("theme must be 'light' or 'dark'"))?;
    state.controller.lock().await.set_theme(theme).await?;
    Ok(Redirect::to("/"))
}

pub async fn set_accent(
    State(state): State<AppState>,
    Form(form): Form<AccentForm>,
) -> Result<Redirect, AppError> {
    let accent = Accent::parse(&form.accent)
        .ok_or_else(|| AppError::bad_request(format!("unknown accent '{}'", form.accent)))?;
    state.controller.lock().await.set_accent(accent).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(state.controller.lock().await.session())
}

pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    let controller = state.controller.lock().await;
    if !controller.is_logged_in() {
        return Err(AppError::unauthorized());
    }
    Ok(Json(controller.tasks()))
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<TaskForm>,
) -> Result<Json<Task>, AppError> {
    let mut controller = state.controller.lock().await;
    if !controller.is_logged_in() {
        return Err(AppError::unauthorized());
    }
    let task = controller.create_task(&payload).await?;
    Ok(Json(task))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let controller = state.controller.lock().await;
    if !controller.is_logged_in() {
        return Err(AppError::unauthorized());
    }
    Ok(Json(build_stats(&controller.tasks())))
}

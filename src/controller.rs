//! Application controller.
//!
//! Owns every piece of mutable state: the persisted profile, the visible
//! view, the active category tab, the open modal, the task picked in the
//! detail editor and a one-shot notice. Handlers call one operation and then
//! render a [`Screen`] snapshot.

use crate::auth;
use crate::errors::AppError;
use crate::models::{Accent, Category, DetailForm, SessionResponse, Task, TaskForm, Theme};
use crate::storage::{Profile, ACCENT_KEY, THEME_KEY, USER_KEY};
use crate::tasks;
use crate::view::View;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Create(TaskForm),
    Edit { id: String, form: TaskForm },
}

impl Modal {
    pub fn heading(&self) -> &'static str {
        match self {
            Modal::Create(_) => "Create task",
            Modal::Edit { .. } => "Edit task",
        }
    }

    pub fn form(&self) -> &TaskForm {
        match self {
            Modal::Create(form) | Modal::Edit { form, .. } => form,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Alert,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Everything a page render needs, detached from the controller.
#[derive(Debug, Clone)]
pub struct Screen {
    pub view: View,
    pub user: Option<String>,
    pub theme: Theme,
    pub accent: Accent,
    pub active_category: Category,
    pub tasks: Vec<Task>,
    pub modal: Option<Modal>,
    pub detail_id: Option<String>,
    pub notice: Option<Notice>,
}

impl Screen {
    pub fn detail_task(&self) -> Option<&Task> {
        let id = self.detail_id.as_deref()?;
        self.tasks.iter().find(|task| task.id == id)
    }
}

#[derive(Debug)]
pub struct Controller {
    profile: Profile,
    view: View,
    active_category: Category,
    modal: Option<Modal>,
    detail_id: Option<String>,
    notice: Option<Notice>,
}

impl Controller {
    /// Seeds the sample tasks on first run and opens on the task list when a
    /// user marker is already stored.
    pub async fn start(mut profile: Profile) -> Result<Self, AppError> {
        tasks::seed_tasks(&mut profile).await?;
        let mut controller = Self {
            profile,
            view: View::Login,
            active_category: Category::default(),
            modal: None,
            detail_id: None,
            notice: None,
        };
        controller.set_view(View::Main);
        Ok(controller)
    }

    pub fn is_logged_in(&self) -> bool {
        self.profile
            .get_item(USER_KEY)
            .is_some_and(|user| !user.is_empty())
    }

    pub fn user(&self) -> Option<&str> {
        self.profile.get_item(USER_KEY).filter(|user| !user.is_empty())
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn active_category(&self) -> Category {
        self.active_category
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn tasks(&self) -> Vec<Task> {
        tasks::load_tasks(&self.profile)
    }

    pub fn theme(&self) -> Theme {
        self.profile
            .get_item(THEME_KEY)
            .and_then(Theme::parse)
            .unwrap_or_default()
    }

    pub fn accent(&self) -> Accent {
        self.profile
            .get_item(ACCENT_KEY)
            .and_then(Accent::parse)
            .unwrap_or_default()
    }

    /// The single view setter. Without a user marker every view resolves to
    /// login.
    pub fn set_view(&mut self, view: View) {
        let view = if self.is_logged_in() { view } else { View::Login };
        self.view = view;
        if view == View::Details {
            self.populate_details();
        }
        debug!(%view, "view changed");
    }

    fn populate_details(&mut self) {
        let tasks = self.tasks();
        let still_there = self
            .detail_id
            .as_deref()
            .is_some_and(|id| tasks.iter().any(|task| task.id == id));
        if !still_there {
            self.detail_id = tasks.first().map(|task| task.id.clone());
        }
    }

    /// Returns `false` when the credentials are rejected; the reason is left
    /// as an alert notice for the login page.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool, AppError> {
        let marker = match auth::check_credentials(email, password) {
            Ok(marker) => marker,
            Err(rejection) => {
                info!(?rejection, "login rejected");
                self.alert(rejection.message());
                return Ok(false);
            }
        };

        self.profile.set_item(USER_KEY, marker).await?;
        info!("logged in");
        self.set_view(View::Main);
        Ok(true)
    }

    pub async fn logout(&mut self) -> Result<(), AppError> {
        self.profile.remove_item(USER_KEY).await?;
        self.modal = None;
        self.detail_id = None;
        info!("logged out");
        self.set_view(View::Login);
        Ok(())
    }

    pub fn select_category(&mut self, category: Category) {
        self.active_category = category;
    }

    pub fn open_create_modal(&mut self) {
        if !self.is_logged_in() {
            return;
        }
        self.modal = Some(Modal::Create(TaskForm {
            category: self.active_category,
            ..TaskForm::default()
        }));
    }

    /// Opens the edit form for `id`; unknown ids leave everything as is.
    pub fn open_edit_modal(&mut self, id: &str) {
        if !self.is_logged_in() {
            return;
        }
        if let Some(task) = self.tasks().into_iter().find(|task| task.id == id) {
            self.modal = Some(Modal::Edit {
                id: task.id.clone(),
                form: TaskForm::from_task(&task),
            });
        }
    }

    pub fn cancel_modal(&mut self) {
        self.modal = None;
    }

    /// Applies the open modal. Without an open modal this does nothing.
    pub async fn save_modal(&mut self, form: TaskForm) -> Result<(), AppError> {
        let Some(modal) = self.modal.take() else {
            return Ok(());
        };
        match modal {
            Modal::Create(_) => {
                self.create_task(&form).await?;
            }
            Modal::Edit { id, .. } => {
                self.edit_task(&id, &form).await?;
            }
        }
        Ok(())
    }

    pub async fn create_task(&mut self, form: &TaskForm) -> Result<Task, AppError> {
        let mut tasks = self.tasks();
        let task = tasks::new_task(form, &tasks);
        tasks.push(task.clone());
        tasks::save_tasks(&mut self.profile, &tasks).await?;
        info!(id = %task.id, category = %task.category, "task created");
        Ok(task)
    }

    pub async fn edit_task(&mut self, id: &str, form: &TaskForm) -> Result<bool, AppError> {
        let updated = self
            .update_task(id, |task| tasks::apply_edit(task, form))
            .await?;
        if updated {
            info!(id, "task edited");
        }
        Ok(updated)
    }

    pub async fn set_done(&mut self, id: &str, done: bool) -> Result<bool, AppError> {
        self.update_task(id, |task| task.done = done).await
    }

    pub fn select_detail(&mut self, id: &str) {
        if self.tasks().iter().any(|task| task.id == id) {
            self.detail_id = Some(id.to_string());
        }
    }

    pub async fn save_detail(&mut self, form: &DetailForm) -> Result<bool, AppError> {
        let saved = self
            .update_task(&form.id, |task| {
                task.done = form.done.is_some();
                task.description = form.description.clone();
                if let Some(category) = form.category {
                    task.category = category;
                }
            })
            .await?;
        if saved {
            self.detail_id = Some(form.id.clone());
            self.info("♟ Details saved!");
        }
        Ok(saved)
    }

    /// Removes the task with `id`, if present, leaving the rest untouched.
    pub async fn delete_task(&mut self, id: &str) -> Result<bool, AppError> {
        let mut tasks = self.tasks();
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Ok(false);
        }
        tasks::save_tasks(&mut self.profile, &tasks).await?;
        info!(id, "task deleted");

        if self.detail_id.as_deref() == Some(id) {
            self.detail_id = None;
        }
        if self.view == View::Details {
            self.populate_details();
        }
        Ok(true)
    }

    pub async fn set_theme(&mut self, theme: Theme) -> Result<(), AppError> {
        self.profile.set_item(THEME_KEY, theme.token()).await
    }

    pub async fn set_accent(&mut self, accent: Accent) -> Result<(), AppError> {
        self.profile.set_item(ACCENT_KEY, accent.token()).await
    }

    /// Snapshot for rendering. The pending notice is handed out once.
    pub fn screen(&mut self) -> Screen {
        Screen {
            view: self.view,
            user: self.user().map(str::to_string),
            theme: self.theme(),
            accent: self.accent(),
            active_category: self.active_category,
            tasks: self.tasks(),
            modal: if self.is_logged_in() { self.modal.clone() } else { None },
            detail_id: self.detail_id.clone(),
            notice: self.notice.take(),
        }
    }

    pub fn session(&self) -> SessionResponse {
        SessionResponse {
            user: self.user().map(str::to_string),
            view: self.view.token().to_string(),
            active_category: self.active_category,
        }
    }

    /// Reloads the list, edits the matching task and writes the whole list
    /// back. A missing id is a no-op.
    async fn update_task<F>(&mut self, id: &str, edit: F) -> Result<bool, AppError>
    where
        F: FnOnce(&mut Task),
    {
        let mut tasks = self.tasks();
        let Some(task) = tasks::find_mut(&mut tasks, id) else {
            debug!(id, "no task with this id");
            return Ok(false);
        };
        edit(task);
        tasks::save_tasks(&mut self.profile, &tasks).await?;
        Ok(true)
    }

    fn alert(&mut self, message: &str) {
        self.notice = Some(Notice {
            kind: NoticeKind::Alert,
            message: message.to_string(),
        });
    }

    fn info(&mut self, message: &str) {
        self.notice = Some(Notice {
            kind: NoticeKind::Info,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn controller() -> (tempfile::TempDir, Controller) {
        let dir = tempfile::tempdir().unwrap();
        let profile = Profile::open(dir.path().join("profile.json")).await;
        let controller = Controller::start(profile).await.unwrap();
        (dir, controller)
    }

    async fn logged_in() -> (tempfile::TempDir, Controller) {
        let (dir, mut controller) = controller().await;
        assert!(controller.login("Player@Chess.Club ", "secret").await.unwrap());
        (dir, controller)
    }

    fn milk() -> TaskForm {
        TaskForm {
            category: Category::Minor,
            title: "Buy milk".to_string(),
            ..TaskForm::default()
        }
    }

    #[tokio::test]
    async fn starts_on_login_with_seeded_tasks() {
        let (_dir, controller) = controller().await;
        assert_eq!(controller.view(), View::Login);
        assert_eq!(controller.tasks().len(), 3);
    }

    #[tokio::test]
    async fn views_are_gated_until_login() {
        let (_dir, mut controller) = controller().await;
        controller.set_view(View::Prod);
        assert_eq!(controller.view(), View::Login);

        assert!(controller.login("a@b.co", "x").await.unwrap());
        assert_eq!(controller.view(), View::Main);
        controller.set_view(View::Prod);
        assert_eq!(controller.view(), View::Prod);
    }

    #[tokio::test]
    async fn login_stores_normalized_marker() {
        let (_dir, controller) = logged_in().await;
        assert_eq!(controller.user(), Some("player@chess.club"));
    }

    #[tokio::test]
    async fn rejected_login_leaves_a_notice_and_no_marker() {
        let (_dir, mut controller) = controller().await;
        assert!(!controller.login("not-an-email", "pw").await.unwrap());
        assert!(!controller.is_logged_in());

        let screen = controller.screen();
        assert_eq!(
            screen.notice,
            Some(Notice {
                kind: NoticeKind::Alert,
                message: auth::INVALID_EMAIL.to_string(),
            })
        );
        assert!(controller.screen().notice.is_none());
    }

    #[tokio::test]
    async fn modals_carry_the_form_they_open_with() {
        let (_dir, mut controller) = logged_in().await;
        controller.select_category(Category::World);
        controller.open_create_modal();
        assert_eq!(
            controller.modal(),
            Some(&Modal::Create(TaskForm {
                category: Category::World,
                ..TaskForm::default()
            }))
        );

        let task = controller.tasks()[0].clone();
        controller.open_edit_modal(&task.id);
        assert_eq!(
            controller.modal(),
            Some(&Modal::Edit {
                id: task.id.clone(),
                form: TaskForm::from_task(&task),
            })
        );
    }

    #[tokio::test]
    async fn logout_clears_marker_and_modal() {
        let (_dir, mut controller) = logged_in().await;
        controller.open_create_modal();
        controller.logout().await.unwrap();
        assert!(!controller.is_logged_in());
        assert_eq!(controller.view(), View::Login);
        assert!(controller.modal().is_none());
    }

    #[tokio::test]
    async fn create_modal_appends_one_pending_task() {
        let (_dir, mut controller) = logged_in().await;
        let before = controller.tasks();

        controller.open_create_modal();
        controller.save_modal(milk()).await.unwrap();

        let after = controller.tasks();
        assert_eq!(after.len(), before.len() + 1);
        let added = after.last().unwrap();
        assert_eq!(added.title, "Buy milk");
        assert_eq!(added.category, Category::Minor);
        assert!(!added.done);
        assert_eq!(added.deadline, None);
        assert!(before.iter().all(|task| task.id != added.id));
        assert!(controller.modal().is_none());
    }

    #[tokio::test]
    async fn cancel_discards_the_form() {
        let (_dir, mut controller) = logged_in().await;
        let before = controller.tasks();
        controller.open_create_modal();
        controller.cancel_modal();
        controller.save_modal(milk()).await.unwrap();
        assert_eq!(controller.tasks(), before);
    }

    #[tokio::test]
    async fn edit_modal_for_unknown_id_stays_closed() {
        let (_dir, mut controller) = logged_in().await;
        controller.open_edit_modal("missing");
        assert!(controller.modal().is_none());
    }

    #[tokio::test]
    async fn edit_overwrites_mutable_fields_only() {
        let (_dir, mut controller) = logged_in().await;
        let original = controller.tasks()[1].clone();

        controller.open_edit_modal(&original.id);
        let form = TaskForm {
            category: Category::World,
            title: "Gather more herbs".to_string(),
            description: "by the river".to_string(),
            deadline: "Friday".to_string(),
        };
        controller.save_modal(form).await.unwrap();

        let edited = controller.tasks()[1].clone();
        assert_eq!(edited.id, original.id);
        assert_eq!(edited.created_at, original.created_at);
        assert_eq!(edited.done, original.done);
        assert_eq!(edited.title, "Gather more herbs");
        assert_eq!(edited.category, Category::World);
        assert_eq!(edited.deadline.as_deref(), Some("Friday"));
    }

    #[tokio::test]
    async fn saving_an_edit_for_a_deleted_task_changes_nothing() {
        let (_dir, mut controller) = logged_in().await;
        let victim = controller.tasks()[0].clone();

        controller.open_edit_modal(&victim.id);
        controller.delete_task(&victim.id).await.unwrap();
        let before = controller.tasks();

        let form = TaskForm {
            title: "Back from the dead".to_string(),
            ..TaskForm::from_task(&victim)
        };
        controller.save_modal(form).await.unwrap();

        assert_eq!(controller.tasks(), before);
        assert!(controller.tasks().iter().all(|task| task.id != victim.id));
        assert!(controller.modal().is_none());
    }

    #[tokio::test]
    async fn toggle_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        let mut controller = Controller::start(Profile::open(path.clone()).await).await.unwrap();
        let id = controller.tasks()[0].id.clone();

        assert!(controller.set_done(&id, true).await.unwrap());
        assert!(!controller.set_done("missing", true).await.unwrap());

        let reopened = Controller::start(Profile::open(path).await).await.unwrap();
        let task = reopened.tasks().into_iter().find(|task| task.id == id).unwrap();
        assert!(task.done);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let (_dir, mut controller) = logged_in().await;
        let before = controller.tasks();
        let victim = before[1].id.clone();

        assert!(controller.delete_task(&victim).await.unwrap());
        let after = controller.tasks();
        let expected: Vec<Task> = before.into_iter().filter(|task| task.id != victim).collect();
        assert_eq!(after, expected);

        assert!(!controller.delete_task(&victim).await.unwrap());
        assert_eq!(controller.tasks(), expected);
    }

    #[tokio::test]
    async fn details_select_first_task_and_follow_deletes() {
        let (_dir, mut controller) = logged_in().await;
        let tasks = controller.tasks();
        controller.set_view(View::Details);
        assert_eq!(controller.screen().detail_id.as_deref(), Some(tasks[0].id.as_str()));

        controller.select_detail(&tasks[2].id);
        controller.select_detail("missing");
        assert_eq!(controller.screen().detail_id.as_deref(), Some(tasks[2].id.as_str()));

        controller.delete_task(&tasks[2].id).await.unwrap();
        assert_eq!(controller.screen().detail_id.as_deref(), Some(tasks[0].id.as_str()));
    }

    #[tokio::test]
    async fn save_detail_updates_flag_text_and_class() {
        let (_dir, mut controller) = logged_in().await;
        let id = controller.tasks()[0].id.clone();
        let form = DetailForm {
            id: id.clone(),
            done: Some("on".to_string()),
            description: "checkmate".to_string(),
            category: Some(Category::Secondary),
        };
        assert!(controller.save_detail(&form).await.unwrap());

        let task = controller.tasks().into_iter().find(|task| task.id == id).unwrap();
        assert!(task.done);
        assert_eq!(task.description, "checkmate");
        assert_eq!(task.category, Category::Secondary);
        assert_eq!(
            controller.screen().notice.map(|notice| notice.kind),
            Some(NoticeKind::Info)
        );
    }

    #[tokio::test]
    async fn save_detail_for_unknown_id_is_a_no_op() {
        let (_dir, mut controller) = logged_in().await;
        let before = controller.tasks();
        let form = DetailForm {
            id: "missing".to_string(),
            done: Some("on".to_string()),
            description: "ghost".to_string(),
            category: Some(Category::World),
        };

        assert!(!controller.save_detail(&form).await.unwrap());
        assert_eq!(controller.tasks(), before);
        assert!(controller.screen().notice.is_none());
    }

    #[tokio::test]
    async fn theme_and_accent_default_until_set() {
        let (_dir, mut controller) = logged_in().await;
        assert_eq!(controller.theme(), Theme::Light);
        assert_eq!(controller.accent(), Accent::Gold);
        controller.set_theme(Theme::Dark).await.unwrap();
        controller.set_accent(Accent::Ruby).await.unwrap();
        assert_eq!(controller.theme(), Theme::Dark);
        assert_eq!(controller.accent(), Accent::Ruby);
    }
}

use crate::errors::AppError;
use crate::models::{Category, Task, TaskForm};
use crate::storage::{Profile, TASKS_KEY};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
// Bytes of a v4 uuid that carry no version or variant bits.
const ID_BYTES: [usize; 7] = [0, 1, 2, 3, 4, 5, 7];
pub const UNTITLED: &str = "Untitled";

/// Reads the stored task list. Absent or malformed data is an empty list.
pub fn load_tasks(profile: &Profile) -> Vec<Task> {
    let Some(raw) = profile.get_item(TASKS_KEY) else {
        return Vec::new();
    };
    match serde_json::from_str(raw) {
        Ok(tasks) => tasks,
        Err(err) => {
            warn!("stored task list is unreadable, treating as empty: {err}");
            Vec::new()
        }
    }
}

pub async fn save_tasks(profile: &mut Profile, tasks: &[Task]) -> Result<(), AppError> {
    let payload = serde_json::to_string(tasks)?;
    profile.set_item(TASKS_KEY, payload).await
}

/// Writes the sample tasks, but only into a profile that has never held a
/// task list.
pub async fn seed_tasks(profile: &mut Profile) -> Result<bool, AppError> {
    if profile.contains(TASKS_KEY) {
        return Ok(false);
    }

    let samples = [
        ("Task 1", Category::Priority, "Defeat the monster on the North Island", false),
        ("Task 2", Category::Secondary, "Gather herbs", true),
        ("Task 3", Category::Minor, "Visit the blacksmith", false),
    ];

    let mut tasks: Vec<Task> = Vec::with_capacity(samples.len());
    for (title, category, description, done) in samples {
        let id = generate_id(&tasks);
        tasks.push(Task {
            id,
            title: title.to_string(),
            category,
            description: description.to_string(),
            done,
            deadline: None,
            created_at: now_millis(),
        });
    }

    save_tasks(profile, &tasks).await?;
    info!(count = tasks.len(), "seeded sample tasks");
    Ok(true)
}

/// Returns `t` followed by seven random base-36 characters, distinct from every id
/// in `existing`.
pub fn generate_id(existing: &[Task]) -> String {
    loop {
        let random = Uuid::new_v4().into_bytes();
        let suffix: String = ID_BYTES
            .iter()
            .map(|&index| ID_ALPHABET[usize::from(random[index]) % ID_ALPHABET.len()] as char)
            .collect();
        let id = format!("t{suffix}");
        if existing.iter().all(|task| task.id != id) {
            return id;
        }
    }
}

/// Builds a new pending task from the submitted form.
pub fn new_task(form: &TaskForm, existing: &[Task]) -> Task {
    let title = form.title.trim();
    Task {
        id: generate_id(existing),
        title: if title.is_empty() { UNTITLED.to_string() } else { title.to_string() },
        category: form.category,
        description: form.description.clone(),
        done: false,
        deadline: form.deadline(),
        created_at: now_millis(),
    }
}

/// Overwrites the mutable fields of `task`; a blank title keeps the old one.
pub fn apply_edit(task: &mut Task, form: &TaskForm) {
    let title = form.title.trim();
    if !title.is_empty() {
        task.title = title.to_string();
    }
    task.description = form.description.clone();
    task.category = form.category;
    task.deadline = form.deadline();
}

pub fn find_mut<'a>(tasks: &'a mut [Task], id: &str) -> Option<&'a mut Task> {
    tasks.iter_mut().find(|task| task.id == id)
}

pub fn in_category(tasks: &[Task], category: Category) -> Vec<&Task> {
    tasks.iter().filter(|task| task.category == category).collect()
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

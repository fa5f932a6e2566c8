use serde::{Deserialize, Serialize};
use std::fmt;

/// Epoch milliseconds.
pub type Timestamp = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Priority,
    Secondary,
    Minor,
    World,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Priority,
        Category::Secondary,
        Category::Minor,
        Category::World,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Priority => "Priority",
            Category::Secondary => "Secondary",
            Category::Minor => "Minor",
            Category::World => "World",
        }
    }

    /// Chess piece shown next to tasks of this class.
    pub fn glyph(self) -> &'static str {
        match self {
            Category::Priority => "♔",
            Category::Secondary => "♕",
            Category::Minor => "♗",
            Category::World => "♘",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(token.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(rename = "cls")]
    pub category: Category,
    #[serde(rename = "desc", default)]
    pub description: String,
    pub done: bool,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(rename = "created")]
    pub created_at: Timestamp,
}

/// Fields of the create/edit form, as submitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TaskForm {
    pub category: Category,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub deadline: String,
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        Self {
            category: task.category,
            title: task.title.clone(),
            description: task.description.clone(),
            deadline: task.deadline.clone().unwrap_or_default(),
        }
    }

    /// Blank deadlines are stored as absent.
    pub fn deadline(&self) -> Option<String> {
        let deadline = self.deadline.trim();
        (!deadline.is_empty()).then(|| deadline.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Checkbox forms only send the field when it is checked.
#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub done: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DetailSelectQuery {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct DetailForm {
    pub id: String,
    pub done: Option<String>,
    #[serde(default)]
    pub description: String,
    pub category: Option<Category>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    pub theme: String,
}

#[derive(Debug, Deserialize)]
pub struct AccentForm {
    pub accent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn token(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Gold,
    Ruby,
    Emerald,
    Sapphire,
}

impl Accent {
    pub const ALL: [Accent; 4] = [Accent::Gold, Accent::Ruby, Accent::Emerald, Accent::Sapphire];

    pub fn token(self) -> &'static str {
        match self {
            Accent::Gold => "gold",
            Accent::Ruby => "ruby",
            Accent::Emerald => "emerald",
            Accent::Sapphire => "sapphire",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|accent| accent.token() == token.trim())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: Option<String>,
    pub view: String,
    pub active_category: Category,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub per_category: Vec<CategoryCount>,
}

use crate::charts::{self, BarChart, Canvas, PieChart, SliceShape, BAR_COLOR};
use crate::controller::{Modal, Notice, NoticeKind, Screen};
use crate::models::{Accent, Category, Task, Theme};
use crate::stats::{category_counts, completion_counts};
use crate::tasks::in_category;
use crate::view::View;
use maud::{html, Markup, PreEscaped, DOCTYPE};

pub const PIE_CANVAS: Canvas = Canvas::new(320.0, 220.0);
pub const BAR_CANVAS: Canvas = Canvas::new(320.0, 220.0);

pub fn render_page(screen: &Screen) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" data-theme=(screen.theme.token()) data-accent=(screen.accent.token()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "ChessTasks · " (screen.view.title()) }
                style { (PreEscaped(CSS)) }
            }
            body {
                @match screen.view {
                    View::Login => { (login_view()) }
                    _ => { (app_shell(screen)) }
                }
                @if let Some(notice) = &screen.notice {
                    (notice_dialog(notice))
                }
            }
        }
    }
}

fn login_view() -> Markup {
    html! {
        main.login id="view-login" {
            section.login-card {
                div.logo aria-hidden="true" { "♚" }
                h1 { "ChessTasks" }
                p.subtitle { "Every task is a move. Plan the game." }
                form.stack method="post" action="/login" {
                    label for="email" { "Email" }
                    input id="email" type="text" inputmode="email" name="email" autocomplete="username" placeholder="you@example.com";
                    label for="password" { "Password" }
                    input id="password" type="password" name="password" autocomplete="current-password";
                    button.btn type="submit" { "♟ Enter" }
                }
                p.hint { "Any valid email with any password opens the board." }
            }
        }
    }
}

fn app_shell(screen: &Screen) -> Markup {
    html! {
        input.sidebar-toggle type="checkbox" id="sidebarToggle";
        header.topbar {
            label.menu-btn for="sidebarToggle" aria-label="Open menu" { "☰" }
            h1 { (screen.view.glyph()) " " (screen.view.title()) }
            form method="post" action="/logout" {
                button.btn.ghost.small type="submit" { "Logout" }
            }
        }
        (sidebar(screen))
        label.sidebar-overlay for="sidebarToggle" {}
        main.app {
            @match screen.view {
                View::Details => { (details_view(screen)) }
                View::Prod => { (prod_view(screen)) }
                _ => { (main_view(screen)) }
            }
        }
        a.fab href="/modal/new" aria-label="Add task" title="Add task" { "+" }
        @if let Some(modal) = &screen.modal {
            (modal_dialog(modal))
        }
    }
}

fn sidebar(screen: &Screen) -> Markup {
    let next_theme = match screen.theme {
        Theme::Light => Theme::Dark,
        Theme::Dark => Theme::Light,
    };
    html! {
        aside.sidebar id="sidebar" {
            div.sidebar-head {
                span.logo-small { "♚ ChessTasks" }
                label.sidebar-close for="sidebarToggle" aria-label="Close menu" { "×" }
            }
            @if let Some(user) = &screen.user {
                p.muted.user { (user) }
            }
            nav {
                @for view in View::NAV {
                    a.sidebar-nav-item.active[screen.view == view] href={ "/view/" (view.token()) } {
                        span.glyph { (view.glyph()) }
                        (view.title())
                    }
                }
            }
            div.sidebar-section {
                h4 { "Theme" }
                form method="post" action="/theme" {
                    input type="hidden" name="theme" value=(next_theme.token());
                    button.btn.ghost.small type="submit" {
                        @if screen.theme == Theme::Dark { "☀ Light mode" } @else { "☾ Dark mode" }
                    }
                }
                div.palette {
                    @for accent in Accent::ALL {
                        form method="post" action="/accent" {
                            input type="hidden" name="accent" value=(accent.token());
                            button.color-option.active[screen.accent == accent]
                                type="submit"
                                data-color=(accent.token())
                                title=(accent.token()) {}
                        }
                    }
                }
            }
            form method="post" action="/logout" {
                button.btn.ghost type="submit" { "♟ Logout" }
            }
        }
    }
}

fn main_view(screen: &Screen) -> Markup {
    let visible = in_category(&screen.tasks, screen.active_category);
    html! {
        section id="view-main" {
            div.tabs id="classTabs" role="tablist" {
                @for category in Category::ALL {
                    a.tab.active[category == screen.active_category]
                        role="tab"
                        aria-selected=(if category == screen.active_category { "true" } else { "false" })
                        href={ "/tabs/" (category.label()) } {
                        span.glyph { (category.glyph()) }
                        (category.label())
                    }
                }
            }
            @if visible.is_empty() {
                div.empty-state {
                    div.piece-large { "♟" }
                    div { "No tasks in this class. Create a new one!" }
                }
            } @else {
                ul.task-list id="taskList" {
                    @for task in visible {
                        (task_row(task))
                    }
                }
            }
        }
    }
}

fn task_row(task: &Task) -> Markup {
    html! {
        li.task-item.done[task.done] {
            div.piece aria-hidden="true" { (task.category.glyph()) }
            div.task-content {
                div.task-title {
                    (task.title)
                    @if let Some(deadline) = &task.deadline {
                        span.muted.deadline { "• " (deadline) }
                    }
                }
                div.task-meta {
                    @if task.description.is_empty() {
                        span.muted { "no description" }
                    } @else {
                        (task.description)
                    }
                }
            }
            div.task-actions {
                form method="post" action={ "/tasks/" (task.id) "/toggle" } {
                    label {
                        input type="checkbox" name="done" value="on" checked[task.done] onchange="this.form.submit()";
                        " Done"
                    }
                    noscript { button.small type="submit" { "Apply" } }
                }
                a.btn.ghost.small href={ "/tasks/" (task.id) "/edit" } { "Edit" }
            }
        }
    }
}

fn modal_dialog(modal: &Modal) -> Markup {
    let form = modal.form();
    html! {
        div.overlay {
            div.modal role="dialog" aria-modal="true" {
                h3 { "♟ " (modal.heading()) }
                form.stack method="post" action="/modal/save" {
                    label for="mClass" { "♟ Class" }
                    select id="mClass" name="category" {
                        @for category in Category::ALL {
                            option value=(category.label()) selected[form.category == category] {
                                (category.glyph()) " " (category.label())
                            }
                        }
                    }
                    label for="mTitle" { "♔ Title" }
                    input id="mTitle" type="text" name="title" value=(form.title) placeholder="Add the task title";
                    label for="mDesc" { "♕ Description" }
                    textarea id="mDesc" name="description" placeholder="Add a description" { (form.description) }
                    label for="mDeadline" { "♗ Deadline" }
                    input id="mDeadline" type="text" name="deadline" value=(form.deadline) placeholder="e.g. Today, Tomorrow, 12/15/2024";
                    div.modal-actions {
                        button.btn.ghost type="submit" formaction="/modal/cancel" { "Cancel" }
                        button.btn type="submit" { "Save" }
                    }
                }
            }
        }
    }
}

fn details_view(screen: &Screen) -> Markup {
    html! {
        section.card id="view-details" {
            @if screen.tasks.is_empty() {
                div.empty-state {
                    div.piece-large { "♟" }
                    div { "No tasks yet. Create one with the + button." }
                }
            } @else {
                form.row method="get" action="/details/select" {
                    select id="detailSelect" name="id" onchange="this.form.submit()" {
                        @for task in &screen.tasks {
                            option value=(task.id) selected[screen.detail_id.as_deref() == Some(task.id.as_str())] {
                                (task.category.glyph()) " " (task.title)
                            }
                        }
                    }
                    noscript { button.btn.small type="submit" { "Open" } }
                }
                @if let Some(task) = screen.detail_task() {
                    (detail_form(task))
                }
            }
        }
    }
}

fn detail_form(task: &Task) -> Markup {
    html! {
        form.stack method="post" action="/details/save" {
            input type="hidden" name="id" value=(task.id);
            label {
                input id="detailComplete" type="checkbox" name="done" value="on" checked[task.done];
                " Completed"
            }
            label for="detailDesc" { "Description" }
            textarea id="detailDesc" name="description" { (task.description) }
            fieldset id="detailClassRadios" {
                legend { "Class" }
                @for category in Category::ALL {
                    div {
                        label {
                            input type="radio" name="category" value=(category.label()) checked[task.category == category];
                            span.glyph { (category.glyph()) }
                            (category.label())
                        }
                    }
                }
            }
            button.btn id="saveDetailBtn" type="submit" { "Save" }
        }
        form method="post" action="/details/delete" onsubmit="return confirm('♟ Delete task?')" {
            input type="hidden" name="id" value=(task.id);
            button.btn.danger id="deleteBtn" type="submit" { "Delete" }
        }
    }
}

fn prod_view(screen: &Screen) -> Markup {
    let completion = completion_counts(&screen.tasks);
    let pie = charts::pie_chart(PIE_CANVAS, &["Done", "Pending"], &completion);
    let labels = Category::ALL.map(Category::label);
    let bar = charts::bar_chart(BAR_CANVAS, &labels, &category_counts(&screen.tasks));
    html! {
        section.charts id="view-prod" {
            div.card {
                h2 { "Done vs. pending" }
                (pie_svg(&pie))
            }
            div.card {
                h2 { "Tasks per class" }
                (bar_svg(&bar))
            }
        }
    }
}

fn pie_svg(chart: &PieChart) -> Markup {
    html! {
        svg.chart id="pieChart" viewBox=(view_box(chart.canvas)) role="img" aria-label="Done versus pending" {
            @for (shape, color) in chart.shapes() {
                @match shape {
                    SliceShape::Circle => {
                        circle cx=(num(chart.cx)) cy=(num(chart.cy)) r=(num(chart.radius)) fill=(color) {}
                    }
                    SliceShape::Wedge(outline) => {
                        path d=(outline) fill=(color) {}
                    }
                }
            }
            @for line in &chart.legend {
                text.chart-label x=(num(line.x)) y=(num(line.y)) { (line.text) }
            }
        }
    }
}

fn bar_svg(chart: &BarChart) -> Markup {
    html! {
        svg.chart id="barChart" viewBox=(view_box(chart.canvas)) role="img" aria-label="Tasks per class" {
            @for bar in &chart.bars {
                rect x=(num(bar.x)) y=(num(bar.y)) width=(num(bar.width)) height=(num(bar.height)) fill=(BAR_COLOR) {}
                text.chart-label x=(num(bar.label.x)) y=(num(bar.label.y)) { (bar.label.text) }
                text.chart-label x=(num(bar.count.x)) y=(num(bar.count.y)) { (bar.count.text) }
            }
        }
    }
}

fn notice_dialog(notice: &Notice) -> Markup {
    html! {
        div.overlay.notice {
            div.modal.alert[notice.kind == NoticeKind::Alert] role="alertdialog" aria-modal="true" {
                p.notice-text { (notice.message) }
                div.modal-actions {
                    a.btn href="/" autofocus { "OK" }
                }
            }
        }
    }
}

fn view_box(canvas: Canvas) -> String {
    format!("0 0 {} {}", num(canvas.width), num(canvas.height))
}

fn num(value: f64) -> String {
    let rounded = format!("{value:.2}");
    rounded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

const CSS: &str = r#"
:root {
  --bg: #f6f1e7;
  --card: #fffdf8;
  --ink: #2a2622;
  --muted: #8a8178;
  --line: rgba(42, 38, 34, 0.1);
  --gold: #b8860b;
  --accent: var(--gold);
  --danger: #b23a2b;
  --shadow: 0 18px 44px rgba(42, 38, 34, 0.16);
}

[data-theme="dark"] {
  --bg: #181614;
  --card: #24211e;
  --ink: #f2ebe0;
  --muted: #a39a8f;
  --line: rgba(242, 235, 224, 0.12);
  --shadow: 0 18px 44px rgba(0, 0, 0, 0.45);
}

[data-accent="ruby"] { --accent: #b0304a; }
[data-accent="emerald"] { --accent: #2e8b57; }
[data-accent="sapphire"] { --accent: #2f5fa8; }

* { box-sizing: border-box; }

body {
  margin: 0;
  min-height: 100vh;
  background:
    repeating-conic-gradient(var(--line) 0% 25%, transparent 0% 50%) 0 0 / 48px 48px,
    var(--bg);
  color: var(--ink);
  font-family: "Trebuchet MS", sans-serif;
}

h1, h2, h3 { font-family: Georgia, serif; margin: 0; }
.muted { color: var(--muted); }
.glyph { margin-right: 6px; font-size: 1.1em; }

.btn, button {
  appearance: none;
  border: none;
  border-radius: 999px;
  padding: 10px 18px;
  font-size: 0.95rem;
  font-weight: 600;
  cursor: pointer;
  background: var(--accent);
  color: white;
  text-decoration: none;
  display: inline-flex;
  align-items: center;
  gap: 6px;
}
.btn.ghost { background: transparent; color: var(--ink); border: 1px solid var(--line); }
.btn.danger { background: var(--danger); }
.small { padding: 6px 12px; font-size: 0.85rem; }

input[type="text"], input[type="password"], select, textarea {
  width: 100%;
  padding: 10px 12px;
  border-radius: 12px;
  border: 1px solid var(--line);
  background: var(--card);
  color: var(--ink);
  font: inherit;
}
textarea { min-height: 90px; resize: vertical; }
.stack { display: flex; flex-direction: column; gap: 8px; }
.row { display: flex; gap: 8px; margin-bottom: 12px; }

.login { display: grid; place-items: center; min-height: 100vh; padding: 24px; }
.login-card {
  width: min(380px, 100%);
  background: var(--card);
  border-radius: 24px;
  box-shadow: var(--shadow);
  padding: 32px;
  display: grid;
  gap: 12px;
  text-align: center;
}
.login-card form { text-align: left; }
.logo { font-size: 56px; color: var(--accent); }
.subtitle, .hint { margin: 0; color: var(--muted); }

.topbar {
  position: sticky;
  top: 0;
  display: flex;
  align-items: center;
  gap: 14px;
  padding: 14px 18px;
  background: var(--card);
  border-bottom: 1px solid var(--line);
  z-index: 5;
}
.topbar h1 { flex: 1; font-size: 1.3rem; }
.menu-btn { font-size: 1.5rem; cursor: pointer; }

.sidebar-toggle { display: none; }
.sidebar {
  position: fixed;
  inset: 0 auto 0 0;
  width: 260px;
  background: var(--card);
  box-shadow: var(--shadow);
  padding: 18px;
  transform: translateX(-100%);
  transition: transform 200ms ease;
  display: flex;
  flex-direction: column;
  gap: 16px;
  z-index: 20;
}
.sidebar-overlay {
  position: fixed;
  inset: 0;
  background: rgba(0, 0, 0, 0.35);
  display: none;
  z-index: 10;
}
.sidebar-toggle:checked ~ .sidebar { transform: translateX(0); }
.sidebar-toggle:checked ~ .sidebar-overlay { display: block; }
.sidebar-head { display: flex; justify-content: space-between; align-items: center; }
.sidebar-close { font-size: 1.6rem; cursor: pointer; }
.sidebar nav { display: grid; gap: 4px; }
.sidebar-nav-item {
  padding: 10px 12px;
  border-radius: 12px;
  color: var(--ink);
  text-decoration: none;
}
.sidebar-nav-item.active { background: var(--accent); color: white; }
.sidebar-section h4 { margin: 0 0 8px; }
.palette { display: flex; gap: 8px; margin-top: 10px; }
.color-option {
  width: 28px;
  height: 28px;
  padding: 0;
  border-radius: 50%;
  border: 3px solid transparent;
}
.color-option[data-color="gold"] { background: #b8860b; }
.color-option[data-color="ruby"] { background: #b0304a; }
.color-option[data-color="emerald"] { background: #2e8b57; }
.color-option[data-color="sapphire"] { background: #2f5fa8; }
.color-option.active { border-color: var(--ink); }

.app { width: min(760px, 100%); margin: 0 auto; padding: 20px 16px 96px; }
.card {
  background: var(--card);
  border-radius: 20px;
  box-shadow: var(--shadow);
  padding: 20px;
}

.tabs { display: flex; gap: 6px; overflow-x: auto; margin-bottom: 14px; }
.tab {
  padding: 8px 14px;
  border-radius: 999px;
  background: var(--card);
  color: var(--ink);
  text-decoration: none;
  white-space: nowrap;
  border: 1px solid var(--line);
}
.tab.active { background: var(--accent); color: white; }

.task-list { list-style: none; padding: 0; margin: 0; display: grid; gap: 10px; }
.task-item {
  display: flex;
  gap: 12px;
  align-items: center;
  background: var(--card);
  border-radius: 16px;
  padding: 12px 14px;
  box-shadow: var(--shadow);
}
.task-item.done .task-title { text-decoration: line-through; color: var(--muted); }
.piece { font-size: 30px; color: var(--accent); }
.task-content { flex: 1; min-width: 0; }
.task-title { font-weight: 600; }
.deadline { font-weight: 400; margin-left: 8px; font-size: 13px; }
.task-meta { font-size: 0.9rem; margin-top: 2px; overflow-wrap: anywhere; }
.task-actions { display: flex; flex-direction: column; align-items: flex-end; gap: 6px; }

.empty-state { padding: 18px; color: var(--muted); text-align: center; }
.piece-large { font-size: 32px; margin-bottom: 8px; }

fieldset { border: 1px solid var(--line); border-radius: 12px; }

.charts { display: grid; gap: 16px; }
.chart { width: 100%; height: auto; display: block; }
.chart-label { fill: var(--ink); font-size: 12px; }

.fab {
  position: fixed;
  right: 22px;
  bottom: 22px;
  width: 56px;
  height: 56px;
  border-radius: 50%;
  background: var(--accent);
  color: white;
  font-size: 30px;
  display: flex;
  align-items: center;
  justify-content: center;
  text-decoration: none;
  box-shadow: var(--shadow);
  z-index: 4;
}

.overlay {
  position: fixed;
  inset: 0;
  background: rgba(0, 0, 0, 0.45);
  display: grid;
  place-items: center;
  padding: 18px;
  z-index: 30;
}
.modal {
  width: min(460px, 100%);
  background: var(--card);
  border-radius: 20px;
  padding: 22px;
  box-shadow: var(--shadow);
}
.modal h3 { margin-bottom: 12px; color: var(--accent); }
.modal.alert { border-top: 6px solid var(--danger); }
.modal-actions { display: flex; justify-content: flex-end; gap: 8px; margin-top: 8px; }
.notice-text { white-space: pre-line; margin: 0 0 12px; }

@media (max-width: 600px) {
  .task-item { flex-wrap: wrap; }
  .task-actions { flex-direction: row; width: 100%; justify-content: flex-end; }
}
"#;

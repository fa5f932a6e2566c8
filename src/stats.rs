use crate::models::{Category, CategoryCount, StatsResponse, Task};

/// `[completed, pending]`; always sums to `tasks.len()`.
pub fn completion_counts(tasks: &[Task]) -> [usize; 2] {
    let completed = tasks.iter().filter(|task| task.done).count();
    [completed, tasks.len() - completed]
}

/// One count per category, in `Category::ALL` order.
pub fn category_counts(tasks: &[Task]) -> [usize; 4] {
    Category::ALL.map(|category| tasks.iter().filter(|task| task.category == category).count())
}

pub fn build_stats(tasks: &[Task]) -> StatsResponse {
    let [completed, pending] = completion_counts(tasks);
    let per_category = Category::ALL
        .into_iter()
        .zip(category_counts(tasks))
        .map(|(category, count)| CategoryCount { category, count })
        .collect();

    StatsResponse {
        total: tasks.len(),
        completed,
        pending,
        per_category,
    }
}

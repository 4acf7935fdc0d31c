pub use self::day::{canonical_day, normalize_day_name};
pub use self::error::LoadError;
pub use self::query::NextClass;
pub use self::session::{ClassSession, TimeRange};

mod day;
mod error;
mod loader;
mod query;
mod session;

/// Class sessions in the order they appear in the schedule source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScheduleTable {
    pub sessions: Vec<ClassSession>,
}

impl ScheduleTable {
    pub fn new(sessions: Vec<ClassSession>) -> Self {
        ScheduleTable { sessions }
    }

    pub fn preview(&self, rows: usize) -> String {
        self.sessions
            .iter()
            .take(rows)
            .map(|session| format!("{} | {}\n", session.day, session))
            .collect::<String>()
    }
}

use std::fmt;

use chrono::{Datelike, Duration, NaiveDateTime};

use super::day::{canonical_day, normalize_day_name};
use super::session::{ClassSession, TimeRange};
use super::ScheduleTable;

/// Outcome of looking up the current or next class for today.
#[derive(Debug, PartialEq)]
pub enum NextClass<'a> {
    NoneToday,
    InProgress(&'a ClassSession),
    Upcoming {
        session: &'a ClassSession,
        minutes: i64,
    },
    Finished,
}

impl fmt::Display for NextClass<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NextClass::NoneToday => write!(f, "📅 Сегодня по вашим подпискам пар нет."),
            NextClass::InProgress(session) => write!(f, "▶ Сейчас идёт пара:\n{}", session),
            NextClass::Upcoming { session, minutes } => write!(
                f,
                "⏭ Следующая пара через {} мин.\n\n{}",
                minutes, session
            ),
            NextClass::Finished => write!(f, "✅ Сегодня пары уже закончились."),
        }
    }
}

impl ScheduleTable {
    fn sessions_for<'a>(
        &'a self,
        day: &'a str,
        tags: &'a [String],
    ) -> impl Iterator<Item = &'a ClassSession> {
        self.sessions
            .iter()
            .filter(move |session| session.day == day && tags.contains(&session.tag))
    }

    /// Sessions for `day` (today when `None`) matching any of `tags`, in schedule order.
    pub fn day_view(&self, tags: &[String], day: Option<&str>, now: NaiveDateTime) -> String {
        let day = match day {
            Some(day) => normalize_day_name(day),
            None => canonical_day(now.weekday()).to_string(),
        };

        let sessions = self
            .sessions_for(&day, tags)
            .map(|session| session.to_string())
            .collect::<Vec<String>>();

        if sessions.is_empty() {
            return format!("📅 На {} по вашим подпискам пар нет.", day);
        }

        let mut lines = vec![format!("📅 Расписание на {}:", day)];
        lines.extend(sessions);
        lines.join("\n\n")
    }

    pub fn next_class<'a>(&'a self, tags: &'a [String], now: NaiveDateTime) -> NextClass<'a> {
        let today = canonical_day(now.weekday());
        let time = now.time();

        let mut found = false;
        let mut upcoming: Option<(chrono::NaiveTime, &ClassSession)> = None;

        for session in self.sessions_for(today, tags) {
            found = true;
            let (start, end) = match session.time_range() {
                TimeRange::Parsed { start, end } => (start, end),
                TimeRange::Unparsed(_) => continue,
            };

            if start <= time && time <= end {
                return NextClass::InProgress(session);
            }
            if start > time && upcoming.map_or(true, |(earliest, _)| start < earliest) {
                upcoming = Some((start, session));
            }
        }

        match upcoming {
            Some((start, session)) => {
                let seconds = (now.date().and_time(start) - now).num_seconds();
                NextClass::Upcoming {
                    session,
                    minutes: seconds.div_euclid(60),
                }
            }
            None if found => NextClass::Finished,
            None => NextClass::NoneToday,
        }
    }

    pub fn next_class_view(&self, tags: &[String], now: NaiveDateTime) -> String {
        self.next_class(tags, now).to_string()
    }

    pub fn next_day_view(&self, tags: &[String], now: NaiveDateTime) -> String {
        let tomorrow = now + Duration::days(1);
        self.day_view(tags, Some(canonical_day(tomorrow.weekday())), now)
    }

    /// One day view per day of the rolling seven days starting today, not a calendar week.
    pub fn week_days(&self, tags: &[String], now: NaiveDateTime) -> Vec<String> {
        (0..7)
            .map(|offset| {
                let date = now + Duration::days(offset);
                self.day_view(tags, Some(canonical_day(date.weekday())), now)
            })
            .collect()
    }

    pub fn week_view(&self, tags: &[String], now: NaiveDateTime) -> String {
        self.week_days(tags, now).join("\n\n")
    }
}

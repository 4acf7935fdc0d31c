use std::fmt;

use chrono::NaiveTime;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassSession {
    pub day: String,
    pub time: String,
    pub subject: String,
    pub tag: String,
    pub room: String,
}

/// Time range of a session as written in the schedule.
///
/// Only `Parsed` ranges take part in "current/next class" resolution, `Unparsed` ones are still
/// listed in day views with their raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeRange {
    Parsed { start: NaiveTime, end: NaiveTime },
    Unparsed(String),
}

impl TimeRange {
    pub fn parse(raw: &str) -> TimeRange {
        let unparsed = || TimeRange::Unparsed(raw.to_string());

        let (start, end) = match raw.split_once('-') {
            Some(parts) => parts,
            None => return unparsed(),
        };

        let start = NaiveTime::parse_from_str(start.trim(), "%H:%M");
        let end = NaiveTime::parse_from_str(end.trim(), "%H:%M");
        match (start, end) {
            (Ok(start), Ok(end)) if start <= end => TimeRange::Parsed { start, end },
            _ => unparsed(),
        }
    }
}

impl ClassSession {
    pub fn time_range(&self) -> TimeRange {
        TimeRange::parse(&self.time)
    }
}

impl fmt::Display for ClassSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "⏰ {} — {} ({})\n📍 Кабинет: {}",
            self.time, self.subject, self.tag, self.room
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parses_valid_range() {
        assert_eq!(
            TimeRange::parse("09:00-10:30"),
            TimeRange::Parsed {
                start: time(9, 0),
                end: time(10, 30)
            }
        );
        assert_eq!(
            TimeRange::parse(" 14:00 - 15:30 "),
            TimeRange::Parsed {
                start: time(14, 0),
                end: time(15, 30)
            }
        );
    }

    #[test]
    fn keeps_malformed_ranges_as_text() {
        for raw in ["", "10:00", "ten-eleven", "25:00-26:00", "10:30-09:00"].iter() {
            assert_eq!(TimeRange::parse(raw), TimeRange::Unparsed(raw.to_string()));
        }
    }

    #[test]
    fn display() {
        let session = ClassSession {
            day: "Понедельник".to_string(),
            time: "14:00-15:30".to_string(),
            subject: "Лекция".to_string(),
            tag: "#лекция".to_string(),
            room: "101".to_string(),
        };
        assert_eq!(
            session.to_string(),
            "⏰ 14:00-15:30 — Лекция (#лекция)\n📍 Кабинет: 101"
        );
    }
}

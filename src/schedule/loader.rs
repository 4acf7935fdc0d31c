use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use log::{info, warn};

use super::day::normalize_day_name;
use super::error::LoadError;
use super::session::ClassSession;
use super::ScheduleTable;

/// Semantic columns in assignment order, with the header spellings each one accepts.
const COLUMNS: [(&str, &[&str]); 5] = [
    ("День", &["день", "day"]),
    ("Время", &["время", "time"]),
    ("Предмет", &["предмет", "subject", "название"]),
    ("Тег", &["тег", "tag", "хэштег", "hashtag"]),
    ("Аудитория", &["аудитория", "room", "кабинет"]),
];

impl ScheduleTable {
    /// Reads the first worksheet of a spreadsheet, its first row being the header row.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ScheduleTable, LoadError> {
        let path = path.as_ref();
        info!("loading schedule from: {}", path.display());

        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoadError::EmptyWorkbook)??;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>());
        let headers = rows.next().unwrap_or_default();

        let table = ScheduleTable::from_rows(headers, rows)?;
        info!("loaded {} schedule rows", table.sessions.len());
        Ok(table)
    }

    pub fn from_rows<I>(headers: Vec<String>, rows: I) -> Result<ScheduleTable, LoadError>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut taken: Vec<usize> = vec![];
        let mut missing: Vec<&'static str> = vec![];

        for (name, synonyms) in COLUMNS.iter() {
            match find_column(&headers, synonyms, &taken) {
                Some(idx) => taken.push(idx),
                None => missing.push(*name),
            }
        }

        if !missing.is_empty() {
            warn!("schedule columns not found: {:?}", missing);
            return Err(LoadError::MissingColumns {
                missing,
                found: headers,
            });
        }

        let (day, time, subject, tag, room) = (taken[0], taken[1], taken[2], taken[3], taken[4]);
        let sessions = rows
            .into_iter()
            .map(|row| {
                let cell = |idx: usize| row.get(idx).map(|c| c.trim()).unwrap_or("").to_string();
                ClassSession {
                    day: normalize_day_name(&cell(day)),
                    time: cell(time),
                    subject: cell(subject),
                    tag: cell(tag),
                    room: cell(room),
                }
            })
            .collect();

        Ok(ScheduleTable { sessions })
    }
}

/// Exact matches win over substring matches; within a pass, earlier synonyms win.
fn find_column(headers: &[String], synonyms: &[&str], taken: &[usize]) -> Option<usize> {
    let headers = headers
        .iter()
        .map(|header| header.trim().to_lowercase())
        .enumerate()
        .filter(|(idx, _)| !taken.contains(idx))
        .collect::<Vec<(usize, String)>>();

    let exact = synonyms
        .iter()
        .find_map(|synonym| headers.iter().find(|(_, header)| header.as_str() == *synonym));
    let partial = || {
        synonyms.iter().find_map(|synonym| {
            headers
                .iter()
                .find(|(_, header)| header.contains(*synonym))
        })
    };

    exact.or_else(partial).map(|(idx, _)| *idx)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn rows() -> Vec<Vec<String>> {
        vec![
            strings(&["Понедельник", "14:00-15:30", "Лекция", "#лекция", "101"]),
            strings(&["friday ", " 09:00-10:30", "Стилистика", "#папян", "  "]),
        ]
    }

    #[test]
    fn loads_russian_headers() {
        let headers = strings(&["День", "Время", "Предмет", "Тег", "Аудитория"]);
        let table = ScheduleTable::from_rows(headers, rows()).unwrap();

        assert_eq!(table.sessions.len(), 2);
        assert_eq!(
            table.sessions[0],
            ClassSession {
                day: "Понедельник".to_string(),
                time: "14:00-15:30".to_string(),
                subject: "Лекция".to_string(),
                tag: "#лекция".to_string(),
                room: "101".to_string(),
            }
        );
        assert_eq!(table.sessions[1].day, "Пятница");
        assert_eq!(table.sessions[1].time, "09:00-10:30");
        assert_eq!(table.sessions[1].room, "");
    }

    #[test]
    fn header_locale_does_not_change_records() {
        let russian = strings(&["День", "Время", "Предмет", "Тег", "Аудитория"]);
        let english = strings(&["Day", "Time", "Subject", "Tag", "Room"]);

        let russian = ScheduleTable::from_rows(russian, rows()).unwrap();
        let english = ScheduleTable::from_rows(english, rows()).unwrap();
        assert_eq!(russian, english);
    }

    #[test]
    fn resolves_columns_in_any_order() {
        let headers = strings(&["Room", "Tag", "Subject", "Time", "Day"]);
        let rows = vec![strings(&["101", "#лекция", "Лекция", "14:00-15:30", "Monday"])];
        let table = ScheduleTable::from_rows(headers, rows).unwrap();

        assert_eq!(table.sessions[0].day, "Понедельник");
        assert_eq!(table.sessions[0].room, "101");
        assert_eq!(table.sessions[0].tag, "#лекция");
    }

    #[test]
    fn falls_back_to_substring_match() {
        let headers = strings(&[
            "День недели",
            "Время пары",
            "Название курса",
            "Хэштег",
            "Кабинет №",
        ]);
        let rows = vec![strings(&[
            "вторник",
            "10:00-11:30",
            "Критика",
            "#чередниченко",
            "202",
        ])];
        let table = ScheduleTable::from_rows(headers, rows).unwrap();

        assert_eq!(
            table.sessions[0],
            ClassSession {
                day: "Вторник".to_string(),
                time: "10:00-11:30".to_string(),
                subject: "Критика".to_string(),
                tag: "#чередниченко".to_string(),
                room: "202".to_string(),
            }
        );
    }

    #[test]
    fn exact_match_wins_over_substring() {
        let headers = strings(&[
            "Время начала",
            "День",
            "Время",
            "Предмет",
            "Тег",
            "Аудитория",
        ]);
        let rows = vec![strings(&[
            "09:00",
            "Среда",
            "09:00-10:30",
            "Лекция",
            "#лекция",
            "101",
        ])];
        let table = ScheduleTable::from_rows(headers, rows).unwrap();

        assert_eq!(table.sessions[0].time, "09:00-10:30");
    }

    #[test]
    fn assigned_column_is_not_reused() {
        let headers = strings(&["День", "Время", "Предмет и аудитория", "Тег"]);
        let result = ScheduleTable::from_rows(headers, Vec::new());

        match result {
            Err(LoadError::MissingColumns { missing, .. }) => {
                assert_eq!(missing, vec!["Аудитория"]);
            }
            _ => panic!("expected missing columns"),
        }
    }

    #[test]
    fn missing_columns_are_all_named() {
        let headers = strings(&["Col1", "Col2"]);
        let err = ScheduleTable::from_rows(headers, Vec::new()).unwrap_err();

        match &err {
            LoadError::MissingColumns { missing, found } => {
                assert_eq!(
                    missing,
                    &vec!["День", "Время", "Предмет", "Тег", "Аудитория"]
                );
                assert_eq!(found, &strings(&["Col1", "Col2"]));
            }
            _ => panic!("expected missing columns"),
        }
        let message = format!("{}", err);
        assert!(message.contains("День, Время, Предмет, Тег, Аудитория"));
        assert!(message.contains("Col1, Col2"));
    }

    #[test]
    fn short_rows_are_padded_with_blanks() {
        let headers = strings(&["День", "Время", "Предмет", "Тег", "Аудитория"]);
        let rows = vec![strings(&["Суббота", "", "Спецкурс"])];
        let table = ScheduleTable::from_rows(headers, rows).unwrap();

        assert_eq!(table.sessions[0].day, "Суббота");
        assert_eq!(table.sessions[0].time, "");
        assert_eq!(table.sessions[0].tag, "");
        assert_eq!(table.sessions[0].room, "");
    }

    #[test]
    fn missing_file_is_unreadable() {
        let result = ScheduleTable::load(".tmp/does-not-exist.xlsx");
        assert!(matches!(result, Err(LoadError::Unreadable(_))));
    }

    #[test]
    fn cells_are_coerced_to_text() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("101".to_string())), "101");
        assert_eq!(cell_to_string(&Data::Float(101.0)), "101");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
    }
}

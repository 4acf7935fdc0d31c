use chrono::Weekday;

const MONDAY: &str = "Понедельник";
const TUESDAY: &str = "Вторник";
const WEDNESDAY: &str = "Среда";
const THURSDAY: &str = "Четверг";
const FRIDAY: &str = "Пятница";
const SATURDAY: &str = "Суббота";
const SUNDAY: &str = "Воскресенье";

/// Lowercased weekday spellings in both supported locales.
const DAY_NAMES: [(&str, &str); 14] = [
    ("monday", MONDAY),
    ("tuesday", TUESDAY),
    ("wednesday", WEDNESDAY),
    ("thursday", THURSDAY),
    ("friday", FRIDAY),
    ("saturday", SATURDAY),
    ("sunday", SUNDAY),
    ("понедельник", MONDAY),
    ("вторник", TUESDAY),
    ("среда", WEDNESDAY),
    ("четверг", THURSDAY),
    ("пятница", FRIDAY),
    ("суббота", SATURDAY),
    ("воскресенье", SUNDAY),
];

pub fn canonical_day(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => MONDAY,
        Weekday::Tue => TUESDAY,
        Weekday::Wed => WEDNESDAY,
        Weekday::Thu => THURSDAY,
        Weekday::Fri => FRIDAY,
        Weekday::Sat => SATURDAY,
        Weekday::Sun => SUNDAY,
    }
}

/// Maps a weekday name in either locale to its canonical spelling.
///
/// Values that are not weekday names are kept, trimmed, instead of being rejected.
pub fn normalize_day_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let key = trimmed.to_lowercase();

    DAY_NAMES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

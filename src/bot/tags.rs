/// Tags offered in the subscription menu, grouped by course.
pub const TAG_CATEGORIES: [(&str, &[&str]); 14] = [
    ("Новости курса", &["#важно", "#лекция", "#новость", "#рассылка"]),
    (
        "Мастерские",
        &[
            "#юзефович",
            "#сидоров",
            "#арутюнов",
            "#чередниченко_мастер",
            "#нагимов",
            "#торопцев",
        ],
    ),
    (
        "Теор. и практ. стилистика",
        &["#папян", "#ткаченко", "#шитькова", "#годенко"],
    ),
    ("Зарубеж. литература", &["#попов", "#муратова"]),
    ("Русская литература", &["#болычев", "#кожухаров", "#кольцова"]),
    ("Эйкономикс", &["#царёва1", "#царёва2"]),
    ("Современка", &["#дьячкова", "#болычевСовр", "#кожухаровСовр"]),
    ("История критики", &["#чередниченко"]),
    ("История искусств", &["#юрчик"]),
    ("Введение в лит. процесс", &["#чупринин"]),
    ("Спецкурс", &["#саленко", "#есаулов"]),
    (
        "Литература страны изучаемого языка",
        &["#казнина", "#латфуллина", "#липкин", "#попов_пер"],
    ),
    ("Иностранный язык", &["#гладилин", "#латфуллина", "#липкин"]),
    (
        "Спецкурс переводчики",
        &["#гвоздева", "#городецкий", "#артамонова", "#кешокова", "#можаева"],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_tags_are_hashtags() {
        for (_, tags) in TAG_CATEGORIES.iter() {
            for tag in tags.iter() {
                assert_eq!(crate::dispatch::extract_tags(tag), vec![tag.to_string()]);
            }
        }
    }

    #[test]
    fn callback_data_fits_telegram_limit() {
        for (_, tags) in TAG_CATEGORIES.iter() {
            for tag in tags.iter() {
                assert!(format!("subscribe:{}", tag).len() <= 64);
            }
        }
    }
}

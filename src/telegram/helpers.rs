use crate::telegram::types::{InlineKeyboardButton, InlineKeyboardMarkup};

pub fn build_inline_keyboard_markup(
    buttons: Vec<InlineKeyboardButton>,
    buttons_per_row: usize,
) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = vec![];
    let mut row: Vec<InlineKeyboardButton> = vec![];

    for button in buttons {
        row.push(button);
        if row.len() == buttons_per_row {
            rows.push(std::mem::take(&mut row));
        }
    }

    if !row.is_empty() {
        rows.push(row);
    }

    InlineKeyboardMarkup {
        inline_keyboard: rows,
    }
}

pub fn button(text: &str, callback_data: &str) -> InlineKeyboardButton {
    InlineKeyboardButton {
        text: text.to_string(),
        callback_data: callback_data.to_string(),
    }
}

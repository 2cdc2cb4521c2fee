//! UI Builder module for creating inline keyboards

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::action::Action;
use crate::menu::MenuOption;

/// Buttons per row for short labels such as room numbers
pub const GRID_COLUMNS: usize = 4;
/// Labels up to this many characters are laid out in a grid
pub const SHORT_LABEL_LEN: usize = 4;

/// Create the inline keyboard for a menu.
///
/// Short labels (room and bed numbers) share rows of `GRID_COLUMNS`, every
/// other option gets a row of its own and "Back" always closes the keyboard.
pub fn create_menu_keyboard(options: &[MenuOption]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = Vec::new();
    let mut grid: Vec<InlineKeyboardButton> = Vec::new();

    for option in options {
        let button =
            InlineKeyboardButton::callback(option.label.clone(), option.action.to_string());

        if option.action != Action::GoBack && option.label.chars().count() <= SHORT_LABEL_LEN {
            grid.push(button);
            if grid.len() == GRID_COLUMNS {
                rows.push(std::mem::take(&mut grid));
            }
        } else {
            if !grid.is_empty() {
                rows.push(std::mem::take(&mut grid));
            }
            rows.push(vec![button]);
        }
    }

    if !grid.is_empty() {
        rows.push(grid);
    }

    InlineKeyboardMarkup::new(rows)
}

//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::debug;

use crate::dialogue::SessionDialogue;
use crate::engine::Housekeeper;
use crate::router::{Event, Input};

use super::dialogue_manager::{process_event, reporter_from_user};

/// Map message text to a command or free text
pub fn parse_text_input(text: &str) -> Input {
    let first = text.split_whitespace().next().unwrap_or("");
    // Commands in groups come as /start@BotName
    let command = first.split('@').next().unwrap_or(first);

    match command {
        "/start" => Input::Start,
        "/help" => Input::Help,
        "/cancel" => Input::Cancel,
        _ => Input::Text(text.to_string()),
    }
}

/// Classify a message by its content
pub fn classify_message(msg: &Message) -> Input {
    if let Some(text) = msg.text() {
        return parse_text_input(text);
    }

    if let Some(largest_photo) = msg.photo().and_then(|photos| photos.last()) {
        return Input::Photo(largest_photo.file.id.to_string());
    }

    if let Some(doc) = msg.document() {
        let is_image = doc
            .mime_type
            .as_ref()
            .is_some_and(|mime_type| mime_type.to_string().starts_with("image/"));
        if is_image {
            return Input::Photo(doc.file.id.to_string());
        }
    }

    Input::Unsupported
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: SessionDialogue,
    housekeeper: Arc<Housekeeper>,
) -> Result<()> {
    let user = msg.from.as_ref();
    let input = classify_message(&msg);
    debug!(user_id = %msg.chat.id, input = ?input, "Received message from user");

    let event = Event::new(
        user.map(reporter_from_user).unwrap_or_default(),
        user.and_then(|u| u.language_code.clone()),
        input,
    );

    process_event(&bot, &dialogue, &housekeeper, event, None).await
}

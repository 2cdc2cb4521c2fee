//! Dialogue Manager module: loads the chat's node, runs the engine and
//! delivers the reply.

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{MessageId, User};
use teloxide::{ApiError, RequestError};
use tracing::{debug, warn};

use crate::dialogue::SessionDialogue;
use crate::engine::Housekeeper;
use crate::report::Reporter;
use crate::router::{Event, Reply};

use super::ui_builder::create_menu_keyboard;

pub fn reporter_from_user(user: &User) -> Reporter {
    Reporter {
        full_name: user.full_name(),
        username: user.username.clone(),
    }
}

/// Handle one event for the dialogue's chat.
///
/// `edit` is the message carrying the pressed keyboard; the reply replaces it
/// when possible, otherwise a new message is sent.
pub async fn process_event(
    bot: &Bot,
    dialogue: &SessionDialogue,
    housekeeper: &Housekeeper,
    event: Event,
    edit: Option<MessageId>,
) -> Result<()> {
    let node = dialogue.get_or_default().await?;
    debug!(chat_id = %dialogue.chat_id(), node = ?node, input = ?event.input, "Handling event");

    let outcome = housekeeper.handle(&node, &event).await;

    if outcome.next != node {
        debug!(chat_id = %dialogue.chat_id(), next = ?outcome.next, "Session moved");
    }
    dialogue.update(outcome.next).await?;

    if let Some(reply) = outcome.reply {
        deliver(bot, dialogue.chat_id(), edit, &reply).await?;
    }

    Ok(())
}

/// Show `reply` in the chat
pub async fn deliver(
    bot: &Bot,
    chat_id: ChatId,
    edit: Option<MessageId>,
    reply: &Reply,
) -> Result<()> {
    let keyboard = create_menu_keyboard(&reply.options);

    if let Some(message_id) = edit {
        match bot
            .edit_message_text(chat_id, message_id, reply.text.clone())
            .reply_markup(keyboard.clone())
            .await
        {
            Ok(_) => return Ok(()),
            // Pressing "Back" on the room list redraws the same screen
            Err(RequestError::Api(ApiError::MessageNotModified)) => return Ok(()),
            Err(e) => {
                warn!(chat_id = %chat_id, error = %e, "Failed to edit message, sending a new one");
            }
        }
    }

    if reply.options.is_empty() {
        bot.send_message(chat_id, reply.text.clone()).await?;
    } else {
        bot.send_message(chat_id, reply.text.clone())
            .reply_markup(keyboard)
            .await?;
    }

    Ok(())
}

//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, error, warn};

use crate::action::Action;
use crate::dialogue::SessionDialogue;
use crate::engine::Housekeeper;
use crate::router::{Event, Input};

use super::dialogue_manager::{process_event, reporter_from_user};

/// Decode callback data into an input for the router
pub fn decode_callback_data(data: &str) -> Input {
    match data.parse::<Action>() {
        Ok(action) => Input::Action(action),
        Err(e) => {
            warn!(data = data, error = %e, "Undecodable callback data");
            Input::Malformed(data.to_string())
        }
    }
}

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: SessionDialogue,
    housekeeper: Arc<Housekeeper>,
) -> Result<()> {
    let data = q.data.as_deref().unwrap_or("");
    debug!(user_id = %q.from.id, data = data, "Received callback query from user");

    let event = Event::new(
        reporter_from_user(&q.from),
        q.from.language_code.clone(),
        decode_callback_data(data),
    );
    let edit = q.message.as_ref().map(|msg| msg.id());

    if let Err(e) = process_event(&bot, &dialogue, &housekeeper, event, edit).await {
        error!(user_id = %q.from.id, error = %e, "Failed to handle callback query");
    }

    // Answer the callback query to remove the loading state
    bot.answer_callback_query(q.id).await?;

    Ok(())
}

//! Bot module for handling Telegram interactions
//!
//! - `message_handler`: Handles commands, text, photo and document messages
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `ui_builder`: Turns menu options into inline keyboards
//! - `dialogue_manager`: Runs the engine for an event and delivers the reply

pub mod callback_handler;
pub mod dialogue_manager;
pub mod message_handler;
pub mod ui_builder;

use teloxide::dispatching::dialogue::{self, InMemStorage};
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::BotCommand;

use crate::dialogue::NavigationNode;

pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

/// Update routing: every update enters the chat's dialogue first
pub fn schema() -> UpdateHandler<anyhow::Error> {
    dialogue::enter::<Update, InMemStorage<NavigationNode>, NavigationNode, _>()
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(callback_handler))
}

/// Commands shown in the Telegram command menu
pub fn bot_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", "Show the room list"),
        BotCommand::new("cancel", "Abandon the current problem report"),
        BotCommand::new("help", "How to use the bot"),
    ]
}

//! # Housekeeping Telegram Bot
//!
//! A Telegram bot for hotel and hostel housekeeping staff: pick a room, a
//! hostel bed or a common zone, then log a finished cleaning or report a
//! problem through a short form that ends up as a spreadsheet row.

pub mod action;
pub mod bot;
pub mod catalog;
pub mod circuit_breaker;
pub mod config;
pub mod dialogue;
pub mod engine;
pub mod health;
pub mod localization;
pub mod menu;
pub mod problem_flow;
pub mod report;
pub mod router;
pub mod sink;

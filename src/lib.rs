//! Anubad - Messenger Translation Bot
//!
//! Replies to chat messages with a translation: Bangla (including Roman-Bangla)
//! to English, everything else to Bangla.

pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod pipeline;
pub mod shortcut;
pub mod translate;
pub mod transliterate;

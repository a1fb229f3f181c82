// ABOUTME: Spanish response layer for the movie assistant built on filmbot-client.
// ABOUTME: Re-exports the pure formatters and the per-session conversation handlers.

//! filmbot-speech - turn movie records into what a voice assistant says.
//!
//! [`format`] holds pure renderers (SSML, cards, list items). [`conversation`]
//! wires them to the client for the search, plot, awards and top chart turns.

pub mod conversation;
pub mod format;

pub use conversation::{Conversation, Prompt, Reply, RichList};
pub use format::{
    awards_card, awards_card_text, awards_speech, card_for_movie, describe_movie, list_items,
    mobile_url, plot_card, plot_speech, readable_duration, speech_for_movie, speech_for_top_list,
    titles_sentence, BasicCard, Button, DurationStyle, Image, ImageDisplay, ListItem,
};

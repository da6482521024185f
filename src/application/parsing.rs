//! # Parsing Utils
//!
//! Pure functions over raw message text: matching the command surface and
//! extracting character names from a sync command body.

use crate::domain::types::Command;

/// Match a message against the fixed command prefixes.
///
/// The prefixes are mutually exclusive by construction, so at most one
/// variant can match. Anything else is not addressed to the bot.
pub fn parse_command(text: &str) -> Option<Command> {
    if text.starts_with("$mm") || text.starts_with("$mymarry") {
        return Some(Command::SyncList);
    }
    if text.starts_with("!ship") {
        let character = text.split_whitespace().nth(1).map(str::to_string);
        return Some(Command::ShipLookup { character });
    }
    if text.starts_with("!mudae") {
        return Some(Command::GenerateCommand);
    }
    None
}

/// Everything after the command line is one character name per line.
///
/// Lines are trimmed but otherwise kept verbatim: empty lines and duplicates
/// stay in, and a trailing newline contributes a trailing empty name. Unknown
/// names are the lookup client's concern.
pub fn extract_characters(text: &str) -> Vec<String> {
    text.split('\n')
        .skip(1)
        .map(|line| line.trim().to_string())
        .collect()
}

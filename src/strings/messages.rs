//! # Messages
//!
//! Constant strings and format functions for user-facing replies.

pub const SYNC_ACK: &str = "Processing your Mudae list...";
pub const NO_SHIPS: &str = "No ships found.";

pub const PROVIDE_CHARACTER: &str = "Please provide a character name.";
pub const SHIP_LOOKUP_FAILED: &str = "Error retrieving ship data. Please try again later.";

pub const MUDAE_ACK: &str = "Generating your Mudae ship command...";
pub const MUDAE_FAILED: &str = "Error generating Mudae command. Try again later.";

pub fn ship_list(ships: &[String]) -> String {
    format!("Here are your ships:\n{}", ships.join("\n"))
}

pub fn ships_for(character: &str, rendered: &str) -> String {
    format!("Ships for **{character}**:\n{rendered}")
}

pub fn no_ships_for(character: &str) -> String {
    format!("No ships found for **{character}**.")
}

pub fn mudae_command(command: &str) -> String {
    format!("Your Mudae ship command:\n`{command}`")
}

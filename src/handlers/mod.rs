pub mod rest;

pub use rest::{generate_campaign_handler, generate_character_handler, list_classes_handler};

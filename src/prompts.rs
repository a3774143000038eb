use crate::data::{Campaign, Character};

pub fn campaign_prompt(campaign: &Campaign) -> String {
    format!(
        "Create a {format} DND/Pathfinder-like campaign called '{name}' for {players} players \
         in which each session lasts {hours} hours. The campaign should include a variety of \
         encounters and NPCs for the players to interact with and follow the theme given. \
         This is the description given by the DM: '{theme}'.",
        format = campaign.format,
        name = campaign.name,
        players = campaign.player_count,
        hours = campaign.session_length_hours,
        theme = campaign.theme_description,
    )
}

pub fn backstory_prompt(character: &Character) -> String {
    format!(
        "Generate a backstory, motivation, and alignment for a {} {} named {}.",
        character.race, character.class, character.name
    )
}

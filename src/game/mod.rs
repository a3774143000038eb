pub mod character;
pub mod roller;
pub mod types;


pub use character::{
    ability_modifier, generate_ability_scores, generate_hit_points, hit_die_size, modifier, modifiers,
    roll_ability_score, roll_character, RolledStats, DEFAULT_HIT_DIE,
};
pub use types::{Ability, AbilityScores, CharacterClass, CharacterId, DiceError};

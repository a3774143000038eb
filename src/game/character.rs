use std::collections::BTreeMap;

use serde::Serialize;

use super::roller::Roller;
use super::types::{Ability, AbilityScores, CharacterClass, DiceError};

/// Hit die used for classes outside the class table.
pub const DEFAULT_HIT_DIE: u32 = 8;

const ABILITY_DICE: u32 = 4;
const ABILITY_DIE_SIDES: u32 = 6;

/// Everything the dice decide for a new character.
#[derive(Debug, Clone, Serialize)]
pub struct RolledStats {
    pub ability_scores: AbilityScores,
    pub modifiers: BTreeMap<Ability, i32>,
    pub hit_die: u32,
    pub hit_points: i32,
}

/// Sum of `rolls` with a single occurrence of the lowest value removed.
pub fn drop_lowest(rolls: &[u32]) -> u32 {
    let total: u32 = rolls.iter().sum();
    total - rolls.iter().min().copied().unwrap_or(0)
}

/// 4d6, lowest discarded.
pub fn roll_ability_score(roller: &mut impl Roller) -> Result<u8, DiceError> {
    let rolls = roller.roll(ABILITY_DICE, ABILITY_DIE_SIDES)?;
    // at most 3 * 6
    Ok(drop_lowest(&rolls) as u8)
}

#[tracing::instrument(skip(roller))]
pub fn generate_ability_scores(roller: &mut impl Roller) -> Result<AbilityScores, DiceError> {
    let scores = Ability::ALL
        .into_iter()
        .map(|ability| roll_ability_score(roller).map(|score| (ability, score)))
        .collect::<Result<AbilityScores, _>>()?;

    tracing::debug!(?scores, "Generated ability scores");
    Ok(scores)
}

/// Hit die for a class name. Unknown classes get [`DEFAULT_HIT_DIE`].
pub fn hit_die_size(class: &str) -> u32 {
    CharacterClass::from_name(class)
        .map(|c| c.hit_die())
        .unwrap_or(DEFAULT_HIT_DIE)
}

/// floor((score - 10) / 2)
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

pub fn modifier(scores: &AbilityScores, ability: Ability) -> i32 {
    scores
        .get(ability)
        .map(|score| ability_modifier(i32::from(score)))
        .unwrap_or(0)
}

pub fn modifiers(scores: &AbilityScores) -> BTreeMap<Ability, i32> {
    Ability::ALL
        .into_iter()
        .map(|ability| (ability, modifier(scores, ability)))
        .collect()
}

/// One hit die plus the Constitution modifier. May be zero or negative.
#[tracing::instrument(skip(roller, scores))]
pub fn generate_hit_points(
    roller: &mut impl Roller,
    class: &str,
    scores: &AbilityScores,
) -> Result<i32, DiceError> {
    let hit_die = hit_die_size(class);
    let rolled: u32 = roller.roll(1, hit_die)?.iter().sum();
    Ok(rolled as i32 + modifier(scores, Ability::Constitution))
}

#[tracing::instrument(skip(roller))]
pub fn roll_character(roller: &mut impl Roller, class: &str) -> Result<RolledStats, DiceError> {
    if CharacterClass::from_name(class).is_none() {
        tracing::warn!(class, default_hit_die = DEFAULT_HIT_DIE, "Unknown class, using default hit die");
    }

    let ability_scores = generate_ability_scores(roller)?;
    let hit_points = generate_hit_points(roller, class, &ability_scores)?;

    Ok(RolledStats {
        modifiers: modifiers(&ability_scores),
        hit_die: hit_die_size(class),
        ability_scores,
        hit_points,
    })
}

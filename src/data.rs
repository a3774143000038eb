use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::game::{CharacterClass, CharacterId, RolledStats, DEFAULT_HIT_DIE};

// --- DTOs (Data Transfer Objects) ---
// Aliases accept the field names of the original HTML forms. Numeric fields arrive
// as JSON numbers or form text and are parsed in `validate`.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignRequest {
    #[serde(alias = "campaign_name")]
    pub name: Option<String>,
    #[serde(alias = "num_players")]
    pub player_count: Option<Value>,
    pub format: Option<String>,
    #[serde(alias = "length")]
    pub session_length_hours: Option<Value>,
    #[serde(alias = "type")]
    pub theme_description: Option<String>,
}

/// A campaign request with every field present.
#[derive(Debug, Clone, PartialEq)]
pub struct Campaign {
    pub name: String,
    pub player_count: u32,
    pub format: String,
    pub session_length_hours: f32,
    pub theme_description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CampaignResponse {
    pub prompt: String,
    pub campaign: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterRequest {
    pub name: Option<String>,
    pub race: Option<String>,
    #[serde(alias = "char_class")]
    pub class: Option<String>,
    pub age: Option<Value>,
    pub gear: Option<String>,
    pub weapons: Option<String>,
    pub spells: Option<String>,
    pub extra_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub name: String,
    pub race: String,
    pub class: String,
    pub age: Option<String>,
    pub gear: String,
    pub weapons: String,
    pub spells: String,
    pub extra_info: String,
}

#[derive(Debug, Serialize)]
pub struct CharacterSheet {
    pub id: CharacterId,
    pub name: String,
    pub race: String,
    pub class: String,
    pub age: Option<String>,
    pub gear: String,
    pub weapons: String,
    pub spells: String,
    pub extra_info: String,
    #[serde(flatten)]
    pub stats: RolledStats,
    pub backstory: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassHitDie {
    pub class: CharacterClass,
    pub hit_die: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassesResponse {
    pub classes: Vec<ClassHitDie>,
    pub default_hit_die: u32,
}

impl ClassesResponse {
    pub fn table() -> Self {
        Self {
            classes: CharacterClass::ALL
                .into_iter()
                .map(|class| ClassHitDie { class, hit_die: class.hit_die() })
                .collect(),
            default_hit_die: DEFAULT_HIT_DIE,
        }
    }
}

// --- Validation ---

/// Text form of a string or number field.
fn field_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::MissingField(field)),
    }
}

impl CampaignRequest {
    pub fn validate(self) -> Result<Campaign, AppError> {
        let name = required(self.name, "name")?;
        let player_count = field_text(self.player_count)
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .ok_or(AppError::MissingField("player_count"))?;
        let format = required(self.format, "format")?;
        let session_length_hours = field_text(self.session_length_hours)
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|h| h.is_finite() && *h > 0.0)
            .ok_or(AppError::MissingField("session_length_hours"))?;
        let theme_description = required(self.theme_description, "theme_description")?;

        Ok(Campaign { name, player_count, format, session_length_hours, theme_description })
    }
}

impl CharacterRequest {
    pub fn validate(self) -> Result<Character, AppError> {
        Ok(Character {
            name: required(self.name, "name")?,
            race: required(self.race, "race")?,
            class: required(self.class, "class")?,
            age: field_text(self.age).filter(|s| !s.is_empty()),
            gear: self.gear.unwrap_or_default(),
            weapons: self.weapons.unwrap_or_default(),
            spells: self.spells.unwrap_or_default(),
            extra_info: self.extra_info.unwrap_or_default(),
        })
    }
}

use axum::{extract::State, Json};
use tracing::instrument;

use crate::{
    data::{CampaignRequest, CampaignResponse, CharacterRequest, CharacterSheet, ClassesResponse},
    error::AppError,
    game::{roll_character, roller::ThreadRngRoller, CharacterId, DiceError, RolledStats},
    prompts::{backstory_prompt, campaign_prompt},
    state::SharedState,
};

// ==============================================================================
// === REST API Handlers
// =============================================================================

#[instrument(skip(state, payload))]
pub async fn generate_campaign_handler(
    State(state): State<SharedState>,
    Json(payload): Json<CampaignRequest>,
) -> Result<Json<CampaignResponse>, AppError> {
    let campaign = payload.validate()?;
    tracing::info!(name = %campaign.name, players = campaign.player_count, "Generating campaign");

    let prompt = campaign_prompt(&campaign);
    let text = state.generator.complete(&prompt).await?;

    tracing::info!(name = %campaign.name, "Campaign generated");
    Ok(Json(CampaignResponse { prompt, campaign: text }))
}

// The thread-local RNG must not live across an await point.
fn roll_stats(class: &str) -> Result<RolledStats, DiceError> {
    let mut roller = ThreadRngRoller::new();
    roll_character(&mut roller, class)
}

#[instrument(skip(state, payload))]
pub async fn generate_character_handler(
    State(state): State<SharedState>,
    Json(payload): Json<CharacterRequest>,
) -> Result<Json<CharacterSheet>, AppError> {
    let character = payload.validate()?;
    let id = CharacterId::new();
    tracing::info!(character_id = %id, race = %character.race, class = %character.class, "Generating character");

    let stats = roll_stats(&character.class)?;
    let backstory = state.generator.complete(&backstory_prompt(&character)).await?;

    tracing::info!(character_id = %id, hit_points = stats.hit_points, "Character generated");
    Ok(Json(CharacterSheet {
        id,
        name: character.name,
        race: character.race,
        class: character.class,
        age: character.age,
        gear: character.gear,
        weapons: character.weapons,
        spells: character.spells,
        extra_info: character.extra_info,
        stats,
        backstory,
    }))
}

pub async fn list_classes_handler() -> Json<ClassesResponse> {
    Json(ClassesResponse::table())
}

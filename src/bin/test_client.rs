use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- Re-definitions of DTOs ---
// Only the fields the client prints.

#[derive(Debug, Serialize)]
struct CampaignRequest<'a> {
    name: &'a str,
    player_count: u32,
    format: &'a str,
    session_length_hours: f32,
    theme_description: &'a str,
}

#[derive(Debug, Deserialize)]
struct CampaignResponse {
    campaign: String,
}

#[derive(Debug, Serialize)]
struct CharacterRequest<'a> {
    name: &'a str,
    race: &'a str,
    class: &'a str,
}

#[derive(Debug, Deserialize)]
struct CharacterSheet {
    name: String,
    class: String,
    hit_die: u32,
    hit_points: i32,
    ability_scores: Value,
    backstory: String,
}

async fn create_character(
    client: &reqwest::Client,
    base_url: &str,
    request: CharacterRequest<'_>,
) -> Result<CharacterSheet, reqwest::Error> {
    client
        .post(format!("{}/character", base_url))
        .json(&request)
        .send()
        .await?
        .error_for_status()?
        .json::<CharacterSheet>()
        .await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let base_url = "http://127.0.0.1:3000";

    println!("--- 📜 DUNGEON SCRIBE TEST CLIENT ---");

    println!("\n[1] Fetching class table...");
    let classes: Value = client.get(format!("{}/classes", base_url)).send().await?.json().await?;
    println!("{}", serde_json::to_string_pretty(&classes)?);

    println!("\n[2] Generating party...");
    let party = [
        CharacterRequest { name: "Orla", race: "Dwarf", class: "Barbarian" },
        CharacterRequest { name: "Vex", race: "Tiefling", class: "Wizard" },
        CharacterRequest { name: "Brindle", race: "Halfling", class: "Rogue" },
        CharacterRequest { name: "Quill", race: "Kenku", class: "Gunslinger" },
    ];
    let sheets = join_all(party.into_iter().map(|req| create_character(&client, base_url, req))).await;

    for sheet in sheets {
        match sheet {
            Ok(sheet) => {
                println!("....[{} the {}] d{} -> {} HP", sheet.name, sheet.class, sheet.hit_die, sheet.hit_points);
                println!("....  {}", sheet.ability_scores);
                println!("....  {}", sheet.backstory);
            }
            Err(e) => println!("....[error] {}", e),
        }
    }

    println!("\n[3] Generating campaign...");
    let resp = client
        .post(format!("{}/campaign", base_url))
        .json(&CampaignRequest {
            name: "The Sunken Crown",
            player_count: 4,
            format: "episodic",
            session_length_hours: 3.0,
            theme_description: "Pirates chasing a drowned god's crown",
        })
        .send()
        .await?;

    if resp.status().is_success() {
        let campaign = resp.json::<CampaignResponse>().await?;
        println!("{}", campaign.campaign);
    } else {
        println!("Failed ({}): {}", resp.status(), resp.text().await?);
    }

    Ok(())
}

//! PokeAPI client

use std::sync::OnceLock;

use serde::Deserialize;
use tokio::task::JoinSet;

use crate::state::{Record, StatEntry};

const API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u16,
    name: String,
    height: u16,
    weight: u16,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

/// Fetch one listing page, then every listed record's detail concurrently.
/// The join is all-or-nothing: a single failing detail request fails the
/// whole page, leaving the caller's catalog and cursor untouched.
pub async fn fetch_page(offset: u32, limit: u32) -> Result<Vec<Record>, String> {
    let url = format!("{API_BASE}/pokemon?limit={limit}&offset={offset}");
    let listing: ListResponse = fetch_json(&url).await?;

    let mut join_set = JoinSet::new();
    for entry in listing.results {
        join_set.spawn(async move { fetch_record(&entry.url).await });
    }

    let mut records = Vec::new();
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok(Ok(record)) => records.push(record),
            Ok(Err(error)) => return Err(error),
            Err(error) => return Err(error.to_string()),
        }
    }
    Ok(records)
}

async fn fetch_record(url: &str) -> Result<Record, String> {
    let response: PokemonResponse = fetch_json(url).await?;

    let types = response
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect();
    let stats = response
        .stats
        .into_iter()
        .map(|slot| StatEntry {
            name: slot.stat.name,
            base: slot.base_stat,
        })
        .collect();
    let sprite_url = pointer_string(&response.sprites, "/front_default");

    Ok(Record {
        id: response.id,
        name: response.name,
        types,
        stats,
        sprite_url,
        height: response.height,
        weight: response.weight,
    })
}

/// Type names for the filter selector, sorted.
pub async fn fetch_type_list() -> Result<Vec<String>, String> {
    let url = format!("{API_BASE}/type?limit=999");
    let response: ListResponse = fetch_json(&url).await?;
    let mut types: Vec<String> = response
        .results
        .into_iter()
        .map(|entry| entry.name)
        .filter(|name| name != "unknown" && name != "shadow")
        .collect();
    types.sort();
    Ok(types)
}

pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, String> {
    let client = http_client();
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    let response = response.error_for_status().map_err(|err| err.to_string())?;
    let bytes = response
        .bytes()
        .await
        .map_err(|err| err.to_string())?
        .to_vec();
    Ok(bytes)
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let bytes = fetch_bytes(url).await?;
    serde_json::from_slice(&bytes).map_err(|err| err.to_string())
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|v| v.as_str())
        .map(String::from)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

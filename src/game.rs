use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{Fee, Method, Result, StardustClient};

/// Game owned by the API key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameInstance {
    pub id: u64,
    pub owner_id: String,
    pub name: String,
    pub desc: String,
    pub image: String,
    pub blockchain: u64,
    pub escrow: String,
    pub royalty: f64,
    pub stardust_fee: f64,
    pub fees: Vec<Fee>,
    pub bucket_name: String,
}

#[derive(Clone, Copy, Debug)]
pub struct Game<'a> {
    client: &'a StardustClient,
}

impl<'a> Game<'a> {
    pub(crate) fn new(client: &'a StardustClient) -> Self {
        Self { client }
    }

    /// Returns the game the API key belongs to.
    pub async fn get(&self) -> Result<GameInstance> {
        self.client.core(Method::Get, "game/get", &()).await
    }

    /// Looks a game up by id on the marketplace API.
    pub async fn get_from_marketplace(&self, game_id: u64) -> Result<GameInstance> {
        self.client
            .marketplace(Method::Get, "game/get", &json!({ "gameId": game_id }))
            .await
    }
}

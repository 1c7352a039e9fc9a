use serde::{Deserialize, Serialize};

use crate::{
    address::checksum_address,
    retry::{is_gas_estimation_failure, retry_until, RetryPolicy},
    Count, Method, OneOrMany, Props, Result, StardustClient, TokenAmount,
};

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerIdResponse {
    pub player_id: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerIds {
    pub player_id: String,
    pub unique_id: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerInstance {
    pub id: u64,
    pub player_id: String,
    pub unique_id: String,
    pub game_id: u64,
    pub last_seen: String,
    pub image: String,
    pub user_data: Props,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Currency {
    pub decimal_places: u32,
    pub image: String,
    pub iso_code: String,
    pub name: String,
    pub symbol: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Balance {
    pub balance: String,
    pub currency: Currency,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockchainWallet {
    pub blockchain: String,
    pub address: String,
    pub balances: Vec<Balance>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wallet {
    pub wallet: Vec<BlockchainWallet>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlayer {
    pub unique_id: String,
    pub user_data: Props,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CreatePlayer {
    pub fn new(unique_id: impl Into<String>) -> Self {
        Self {
            unique_id: unique_id.into(),
            user_data: Props::new(),
            image: None,
        }
    }

    pub fn with_user_data(mut self, user_data: Props) -> Self {
        self.user_data = user_data;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreatedPlayer {
    pub id: u64,
    pub player_id: String,
    pub image: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Withdrawal {
    pub token_id: u64,
    pub amount: String,
    pub hash: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayerRef<'a> {
    player_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UniqueIdRef<'a> {
    unique_id: &'a str,
}

#[derive(Serialize)]
struct Page {
    start: u64,
    limit: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePlayer<'a> {
    player_id: &'a str,
    props: &'a Props,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoveProps<'a> {
    player_id: &'a str,
    props: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Withdraw<'a> {
    player_id: &'a str,
    address: String,
    token_objects: Vec<TokenAmount>,
}

/// Player endpoints.
#[derive(Clone, Copy, Debug)]
pub struct Players<'a> {
    client: &'a StardustClient,
}

impl<'a> Players<'a> {
    pub const DEFAULT_PAGE_LIMIT: u64 = 10_000;

    pub(crate) fn new(client: &'a StardustClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, player_id: &str) -> Result<PlayerInstance> {
        self.client
            .core(Method::Get, "player/get", &PlayerRef { player_id })
            .await
    }

    /// Resolves the game-side unique id into a Stardust player id.
    pub async fn get_player_id(&self, unique_id: &str) -> Result<PlayerIdResponse> {
        self.client
            .core(Method::Get, "player/get-id", &UniqueIdRef { unique_id })
            .await
    }

    pub async fn get_ids(&self) -> Result<Vec<PlayerIds>> {
        self.client.core(Method::Get, "player/get-ids", &()).await
    }

    pub async fn get_all(&self, start: u64, limit: u64) -> Result<Vec<PlayerIds>> {
        self.client
            .core(Method::Get, "player/get-all", &Page { start, limit })
            .await
    }

    pub async fn get_inventory(&self, player_id: &str) -> Result<Vec<TokenAmount>> {
        self.client
            .core(Method::Get, "player/get-inventory", &PlayerRef { player_id })
            .await
    }

    pub async fn count(&self) -> Result<Count> {
        self.client.core(Method::Get, "player/count", &()).await
    }

    pub async fn get_wallet(&self, player_id: &str) -> Result<Wallet> {
        self.client
            .core(Method::Get, "player/wallet-get", &PlayerRef { player_id })
            .await
    }

    pub async fn create(&self, player: &CreatePlayer) -> Result<CreatedPlayer> {
        self.client.core(Method::Post, "player/create", player).await
    }

    /// Replaces the player's user data.
    pub async fn update(&self, player_id: &str, props: &Props) -> Result<serde_json::Value> {
        self.client
            .core(Method::Put, "player/mutate", &UpdatePlayer { player_id, props })
            .await
    }

    pub async fn remove(&self, player_id: &str) -> Result<serde_json::Value> {
        self.client
            .core(Method::Delete, "player/remove", &PlayerRef { player_id })
            .await
    }

    pub async fn remove_props(&self, player_id: &str, props: &[String]) -> Result<serde_json::Value> {
        self.client
            .core(
                Method::Delete,
                "player/props-remove",
                &RemoveProps { player_id, props },
            )
            .await
    }

    /// Withdraws tokens to an external wallet. One attempt.
    ///
    /// The address is EIP-55 checksummed before sending; an invalid address
    /// fails without contacting the backend.
    pub async fn withdraw(
        &self,
        player_id: &str,
        address: &str,
        tokens: impl Into<OneOrMany<TokenAmount>>,
    ) -> Result<Vec<Withdrawal>> {
        let payload = Withdraw {
            player_id,
            address: checksum_address(address)?,
            token_objects: tokens.into().into_vec(),
        };
        self.client
            .core(Method::Post, "player/withdraw", &payload)
            .await
    }

    /// Withdraws, polling while the backend reports a transient gas
    /// estimation failure.
    pub async fn withdraw_until_accepted(
        &self,
        player_id: &str,
        address: &str,
        tokens: impl Into<OneOrMany<TokenAmount>>,
        policy: &RetryPolicy,
    ) -> Result<Vec<Withdrawal>> {
        let tokens = tokens.into().into_vec();
        retry_until(
            policy,
            || self.withdraw(player_id, address, tokens.clone()),
            is_gas_estimation_failure,
        )
        .await
    }
}

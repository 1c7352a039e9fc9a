use serde::{Deserialize, Serialize};

use crate::{Method, OneOrMany, Props, Result, StardustClient, TokenAmount};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenProps {
    pub inherited: Props,
    pub immutable: Props,
    pub mutable: Props,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenInstance {
    pub id: u64,
    pub template_id: u64,
    pub name: String,
    pub props: TokenProps,
}

/// One entry of a bulk mint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintToken {
    pub template_id: u64,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,
}

impl MintToken {
    pub fn new(template_id: u64, amount: impl Into<String>) -> Self {
        Self {
            template_id,
            amount: amount.into(),
            props: None,
        }
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = Some(props);
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenIds<'a> {
    token_ids: &'a [u64],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Mint<'a> {
    player_id: &'a str,
    token_objects: Vec<MintToken>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Transfer<'a> {
    from_player: &'a str,
    to_player: &'a str,
    token_objects: Vec<TokenAmount>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Burn<'a> {
    player_id: &'a str,
    token_objects: Vec<TokenAmount>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateToken<'a> {
    token_id: u64,
    props: &'a Props,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoveProps<'a> {
    token_id: u64,
    props: &'a [String],
}

/// Token endpoints.
#[derive(Clone, Copy, Debug)]
pub struct Tokens<'a> {
    client: &'a StardustClient,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(client: &'a StardustClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, token_ids: &[u64]) -> Result<Vec<TokenInstance>> {
        self.client
            .core(Method::Get, "token/get", &TokenIds { token_ids })
            .await
    }

    /// Mints one or more tokens to a player and returns the new token ids.
    pub async fn mint(
        &self,
        player_id: &str,
        tokens: impl Into<OneOrMany<MintToken>>,
    ) -> Result<Vec<u64>> {
        let payload = Mint {
            player_id,
            token_objects: tokens.into().into_vec(),
        };
        self.client
            .core(Method::Post, "token/mint-bulk", &payload)
            .await
    }

    pub async fn transfer(
        &self,
        from_player: &str,
        to_player: &str,
        tokens: impl Into<OneOrMany<TokenAmount>>,
    ) -> Result<serde_json::Value> {
        let payload = Transfer {
            from_player,
            to_player,
            token_objects: tokens.into().into_vec(),
        };
        self.client
            .core(Method::Post, "token/transfer", &payload)
            .await
    }

    pub async fn burn(
        &self,
        player_id: &str,
        tokens: impl Into<OneOrMany<TokenAmount>>,
    ) -> Result<serde_json::Value> {
        let payload = Burn {
            player_id,
            token_objects: tokens.into().into_vec(),
        };
        self.client.core(Method::Post, "token/burn", &payload).await
    }

    pub async fn update(&self, token_id: u64, props: &Props) -> Result<serde_json::Value> {
        self.client
            .core(Method::Put, "token/mutate", &UpdateToken { token_id, props })
            .await
    }

    pub async fn remove_props(&self, token_id: u64, props: &[String]) -> Result<serde_json::Value> {
        self.client
            .core(
                Method::Delete,
                "token/props-remove",
                &RemoveProps { token_id, props },
            )
            .await
    }
}

//! `stardust-http` is an async HTTP client for the Stardust game backend.
//!
//! [`StardustClient`] builds and sends requests against the core and
//! marketplace APIs; resource views wrap the individual endpoints:
//! - [`StardustClient::health`]
//! - [`StardustClient::game`]
//! - [`StardustClient::players`]
//! - [`StardustClient::templates`]
//! - [`StardustClient::tokens`]
//!
//! Withdrawals that the backend rejects while it cannot estimate gas can be
//! polled with [`Players::withdraw_until_accepted`] or the generic
//! [`retry::retry_until`].

mod address;
mod client;
mod config;
mod error;
mod game;
mod health;
mod method;
mod options;
mod params;
mod player;
pub mod request;
pub mod retry;
mod template;
mod token;
mod types;

pub use address::checksum_address;
pub use client::StardustClient;
pub use config::StardustConfig;
pub use error::StardustError;
pub use game::{Game, GameInstance};
pub use health::{Health, HealthStatus};
pub use method::{Method, PayloadPlacement};
pub use options::{
    BaseUrls, ClientOptions, MethodDefaults, MethodProfile, RequestOverrides, Service,
    CORE_BASE_URL, MARKETPLACE_BASE_URL,
};
pub use params::{serialize_query, to_array, to_payload, OneOrMany, Payload};
pub use player::{
    Balance, BlockchainWallet, CreatePlayer, CreatedPlayer, Currency, PlayerIdResponse, PlayerIds,
    PlayerInstance, Players, Wallet, Withdrawal,
};
pub use retry::RetryPolicy;
pub use template::{
    template_image_url, CreateTemplate, TemplateInstance, TemplateProps, TemplateType, Templates,
    DEFAULT_TEMPLATE_CAP,
};
pub use token::{MintToken, TokenInstance, TokenProps, Tokens};
pub use types::{Count, Fee, Props, TokenAmount};

pub type Result<T> = std::result::Result<T, StardustError>;

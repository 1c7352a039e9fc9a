use std::fmt;

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::StardustConfig,
    params::to_payload,
    request::{self, url_join, Credential, PreparedRequest},
    ClientOptions, Game, Health, Method, Players, RequestOverrides, Result, Service,
    StardustError, Templates, Tokens,
};

#[derive(Clone)]
/// HTTP client for the Stardust core and marketplace APIs.
pub struct StardustClient {
    http: reqwest::Client,
    credential: Option<Credential>,
    options: ClientOptions,
}

impl fmt::Debug for StardustClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StardustClient")
            .field("credential", &self.credential)
            .field("options", &self.options)
            .finish()
    }
}

impl StardustClient {
    /// Creates a client authenticating with `api_key`.
    ///
    /// An empty key yields an anonymous client that sends no `x-api-key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            credential: Credential::new(api_key),
            options: ClientOptions::default(),
        }
    }

    /// Creates a client without credentials. Only public endpoints such as
    /// `health` will accept its requests.
    pub fn anonymous() -> Self {
        Self::new("")
    }

    /// Creates a client from an explicit configuration value.
    pub fn from_config(config: &StardustConfig) -> Self {
        Self::new(config.api_key.clone().unwrap_or_default())
    }

    /// Creates a client from environment variables.
    ///
    /// See [`StardustConfig::from_env`] for the variables read. Fails if
    /// `STARDUST_APIKEY` is missing or empty.
    pub fn from_env() -> Result<Self> {
        let config = StardustConfig::from_env()?;
        if config.api_key.is_none() {
            return Err(StardustError::Config(
                "missing STARDUST_APIKEY environment variable".to_owned(),
            ));
        }
        Ok(Self::from_config(&config))
    }

    /// Applies client options such as base URLs, verb defaults and timeout.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    pub fn health(&self) -> Health<'_> {
        Health::new(self)
    }

    pub fn game(&self) -> Game<'_> {
        Game::new(self)
    }

    pub fn players(&self) -> Players<'_> {
        Players::new(self)
    }

    pub fn templates(&self) -> Templates<'_> {
        Templates::new(self)
    }

    pub fn tokens(&self) -> Tokens<'_> {
        Tokens::new(self)
    }

    /// Builds the request for one call without sending it.
    pub fn prepare<B>(
        &self,
        service: Service,
        method: Method,
        path: &str,
        payload: &B,
        overrides: &RequestOverrides,
    ) -> Result<PreparedRequest>
    where
        B: Serialize + ?Sized,
    {
        self.prepare_as(self.credential.as_ref(), service, method, path, payload, overrides)
    }

    /// Sends one request and returns the raw successful response.
    ///
    /// Non-2xx statuses surface as [`StardustError::Http`].
    pub async fn perform<B>(
        &self,
        service: Service,
        method: Method,
        path: &str,
        payload: &B,
        overrides: &RequestOverrides,
    ) -> Result<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let prepared = self.prepare(service, method, path, payload, overrides)?;
        request::send(&self.http, prepared).await
    }

    /// Sends one request and decodes the JSON response body.
    pub async fn request<T, B>(
        &self,
        service: Service,
        method: Method,
        path: &str,
        payload: &B,
        overrides: &RequestOverrides,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .perform(service, method, path, payload, overrides)
            .await?;
        decode_json(response).await
    }

    /// Calls the core API with default overrides.
    pub async fn core<T, B>(&self, method: Method, path: &str, payload: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(
            Service::Core,
            method,
            path,
            payload,
            &RequestOverrides::default(),
        )
        .await
    }

    /// Calls the marketplace API with default overrides.
    pub async fn marketplace<T, B>(&self, method: Method, path: &str, payload: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(
            Service::Marketplace,
            method,
            path,
            payload,
            &RequestOverrides::default(),
        )
        .await
    }

    /// Calls the core API without sending the credential.
    pub(crate) async fn core_anonymous<T>(&self, method: Method, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let prepared = self.prepare_as(
            None,
            Service::Core,
            method,
            path,
            &(),
            &RequestOverrides::default(),
        )?;
        let response = request::send(&self.http, prepared).await?;
        decode_json(response).await
    }

    fn prepare_as<B>(
        &self,
        credential: Option<&Credential>,
        service: Service,
        method: Method,
        path: &str,
        payload: &B,
        overrides: &RequestOverrides,
    ) -> Result<PreparedRequest>
    where
        B: Serialize + ?Sized,
    {
        let url = url_join(self.options.base_urls.for_service(service), path);
        request::prepare(
            credential,
            &self.options,
            method,
            &url,
            to_payload(payload)?,
            overrides,
        )
    }
}

async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let body = response.text().await.map_err(StardustError::Transport)?;
    // Some mutations answer with an empty body.
    let text = if body.trim().is_empty() { "null" } else { body.as_str() };
    serde_json::from_str::<T>(text).map_err(|err| {
        StardustError::Decode(format!("invalid response JSON: {err}; body: {body}"))
    })
}

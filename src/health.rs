use serde::{Deserialize, Serialize};

use crate::{Method, Result, StardustClient};

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"OK"` when the backend is up.
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

/// Service health endpoint. Always called without credentials.
#[derive(Clone, Copy, Debug)]
pub struct Health<'a> {
    client: &'a StardustClient,
}

impl<'a> Health<'a> {
    pub(crate) fn new(client: &'a StardustClient) -> Self {
        Self { client }
    }

    pub async fn check(&self) -> Result<HealthStatus> {
        self.client.core_anonymous(Method::Get, "health").await
    }
}

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};

use crate::{Method, PayloadPlacement};

pub const CORE_BASE_URL: &str = "https://core-api.stardust.gg/v1";
pub const MARKETPLACE_BASE_URL: &str = "https://marketplace-api.stardust.gg/v1";

const APPLICATION_JSON: &str = "application/json";

/// Configures base URLs, per-verb request defaults and HTTP timeout.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientOptions {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Service roots that resource paths are joined against.
    pub base_urls: BaseUrls,
    /// Default headers and payload placement for each verb.
    pub method_defaults: MethodDefaults,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            base_urls: BaseUrls::default(),
            method_defaults: MethodDefaults::default(),
        }
    }
}

/// Which backend service a request targets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Service {
    Core,
    Marketplace,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BaseUrls {
    pub core: String,
    pub marketplace: String,
}

impl BaseUrls {
    /// Points both services at the same root, e.g. a local mock server.
    pub fn single(root: impl Into<String>) -> Self {
        let root = root.into();
        Self {
            core: root.clone(),
            marketplace: root,
        }
    }

    pub fn for_service(&self, service: Service) -> &str {
        match service {
            Service::Core => &self.core,
            Service::Marketplace => &self.marketplace,
        }
    }
}

impl Default for BaseUrls {
    fn default() -> Self {
        Self {
            core: CORE_BASE_URL.to_owned(),
            marketplace: MARKETPLACE_BASE_URL.to_owned(),
        }
    }
}

/// Headers and payload placement applied to every request of one verb.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodProfile {
    pub headers: HeaderMap,
    pub placement: PayloadPlacement,
}

impl MethodProfile {
    /// `accept: application/json`, payload in the query string.
    pub fn query() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        Self {
            headers,
            placement: PayloadPlacement::Query,
        }
    }

    /// `accept` and `content-type: application/json`, payload as JSON body.
    pub fn json_body() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        Self {
            headers,
            placement: PayloadPlacement::Body,
        }
    }
}

/// Verb → defaults table.
///
/// The backend has accepted DELETE both ways over time, so the table is
/// plain data: replace an entry with [`MethodDefaults::with`] if the
/// deployment you talk to expects a body on DELETE.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodDefaults {
    get: MethodProfile,
    post: MethodProfile,
    put: MethodProfile,
    delete: MethodProfile,
}

impl MethodDefaults {
    pub fn profile(&self, method: Method) -> &MethodProfile {
        match method {
            Method::Get => &self.get,
            Method::Post => &self.post,
            Method::Put => &self.put,
            Method::Delete => &self.delete,
        }
    }

    pub fn profile_mut(&mut self, method: Method) -> &mut MethodProfile {
        match method {
            Method::Get => &mut self.get,
            Method::Post => &mut self.post,
            Method::Put => &mut self.put,
            Method::Delete => &mut self.delete,
        }
    }

    /// Replaces the profile for one verb.
    pub fn with(mut self, method: Method, profile: MethodProfile) -> Self {
        *self.profile_mut(method) = profile;
        self
    }
}

impl Default for MethodDefaults {
    fn default() -> Self {
        Self {
            get: MethodProfile::query(),
            post: MethodProfile::json_body(),
            put: MethodProfile::json_body(),
            delete: MethodProfile::query(),
        }
    }
}

/// Per-call adjustments layered on top of the client defaults.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequestOverrides {
    /// Headers that replace anything set by verb defaults or the credential.
    pub headers: Vec<(String, String)>,
    /// Timeout for this call only, in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl RequestOverrides {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::CONTENT_TYPE;

    use super::{BaseUrls, MethodDefaults, MethodProfile, Service};
    use crate::{Method, PayloadPlacement};

    #[test]
    fn default_table_splits_query_and_body_verbs() {
        let defaults = MethodDefaults::default();
        for method in [Method::Get, Method::Delete] {
            let profile = defaults.profile(method);
            assert_eq!(profile.placement, PayloadPlacement::Query);
            assert!(!profile.headers.contains_key(CONTENT_TYPE));
        }
        for method in [Method::Post, Method::Put] {
            let profile = defaults.profile(method);
            assert_eq!(profile.placement, PayloadPlacement::Body);
            assert_eq!(profile.headers[CONTENT_TYPE], "application/json");
        }
    }

    #[test]
    fn delete_profile_can_be_replaced() {
        let defaults = MethodDefaults::default().with(Method::Delete, MethodProfile::json_body());
        assert_eq!(
            defaults.profile(Method::Delete).placement,
            PayloadPlacement::Body
        );
        assert_eq!(defaults.profile(Method::Get).placement, PayloadPlacement::Query);
    }

    #[test]
    fn single_base_url_serves_both_services() {
        let urls = BaseUrls::single("http://127.0.0.1:9000");
        assert_eq!(urls.for_service(Service::Core), "http://127.0.0.1:9000");
        assert_eq!(urls.for_service(Service::Marketplace), "http://127.0.0.1:9000");
    }
}

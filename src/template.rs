use serde::{Deserialize, Serialize};

use crate::{Count, Fee, Method, Props, Result, StardustClient};

/// Default template cap, 2^95.
pub const DEFAULT_TEMPLATE_CAP: &str = "39614081257132168796771975168";

/// Public URL of a template's image asset.
pub fn template_image_url(game_id: u64, template_id: u64) -> String {
    format!("https://sd-game-assets.s3.amazonaws.com/game_{game_id}/templates/{template_id}")
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum TemplateType {
    /// Fungible.
    #[default]
    #[serde(rename = "FT")]
    Ft,
    /// Non-fungible.
    #[serde(rename = "NFT")]
    Nft,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateProps {
    pub mutable: Props,
    pub immutable: Props,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateInstance {
    pub id: u64,
    pub game_id: u64,
    pub name: String,
    pub cap: String,
    #[serde(rename = "type")]
    pub kind: TemplateType,
    pub props: TemplateProps,
    pub total_supply: String,
    pub royalty: f64,
    pub fees: Vec<Fee>,
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateTemplate {
    pub name: String,
    pub cap: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TemplateType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<TemplateProps>,
}

impl CreateTemplate {
    /// Template with the backend's default type and no props.
    pub fn new(name: impl Into<String>, cap: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cap: cap.into(),
            kind: None,
            props: None,
        }
    }

    pub fn with_kind(mut self, kind: TemplateType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_props(mut self, props: TemplateProps) -> Self {
        self.props = Some(props);
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TemplateRef {
    template_id: u64,
}

#[derive(Serialize)]
struct TemplatePage<'a> {
    start: u64,
    limit: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a str>,
}

#[derive(Serialize)]
struct TemplateFilter<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTemplate<'a> {
    template_id: u64,
    props: &'a Props,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoveProps<'a> {
    template_id: u64,
    props: &'a [String],
}

fn non_empty(filter: Option<&str>) -> Option<&str> {
    filter.filter(|value| !value.is_empty())
}

/// Template endpoints.
#[derive(Clone, Copy, Debug)]
pub struct Templates<'a> {
    client: &'a StardustClient,
}

impl<'a> Templates<'a> {
    pub const DEFAULT_PAGE_LIMIT: u64 = 100;

    pub(crate) fn new(client: &'a StardustClient) -> Self {
        Self { client }
    }

    pub fn image_url(&self, game_id: u64, template_id: u64) -> String {
        template_image_url(game_id, template_id)
    }

    pub async fn create(&self, template: &CreateTemplate) -> Result<TemplateInstance> {
        self.client
            .core(Method::Post, "template/create", template)
            .await
    }

    pub async fn get(&self, template_id: u64) -> Result<TemplateInstance> {
        self.client
            .core(Method::Get, "template/get", &TemplateRef { template_id })
            .await
    }

    /// Lists templates. An empty or absent filter is not sent.
    pub async fn get_all(
        &self,
        start: u64,
        limit: u64,
        filter: Option<&str>,
    ) -> Result<Vec<TemplateInstance>> {
        let page = TemplatePage {
            start,
            limit,
            filter: non_empty(filter),
        };
        self.client
            .core(Method::Get, "template/get-all", &page)
            .await
    }

    pub async fn count(&self, filter: Option<&str>) -> Result<Count> {
        let filter = TemplateFilter {
            filter: non_empty(filter),
        };
        self.client
            .core(Method::Get, "template/count", &filter)
            .await
    }

    pub async fn update(&self, template_id: u64, props: &Props) -> Result<TemplateInstance> {
        self.client
            .core(
                Method::Put,
                "template/mutate",
                &UpdateTemplate { template_id, props },
            )
            .await
    }

    pub async fn remove(&self, template_id: u64) -> Result<serde_json::Value> {
        self.client
            .core(Method::Delete, "template/remove", &TemplateRef { template_id })
            .await
    }

    pub async fn remove_props(&self, template_id: u64, props: &[String]) -> Result<serde_json::Value> {
        self.client
            .core(
                Method::Delete,
                "template/props-remove",
                &RemoveProps { template_id, props },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{template_image_url, CreateTemplate, TemplateInstance, TemplateType};

    #[test]
    fn image_url_embeds_game_and_template() {
        assert_eq!(
            template_image_url(3, 11),
            "https://sd-game-assets.s3.amazonaws.com/game_3/templates/11"
        );
    }

    #[test]
    fn create_omits_unset_fields() {
        let body = serde_json::to_value(CreateTemplate::new("sword", "1000")).expect("serializable");
        assert_eq!(body, json!({ "name": "sword", "cap": "1000" }));

        let body = serde_json::to_value(CreateTemplate::new("sword", "1").with_kind(TemplateType::Nft))
            .expect("serializable");
        assert_eq!(body["type"], "NFT");
    }

    #[test]
    fn instance_decodes_wire_shape() {
        let template: TemplateInstance = serde_json::from_value(json!({
            "activeListing": false,
            "gameId": 4,
            "cap": "1000",
            "name": "a",
            "type": "FT",
            "props": { "mutable": { "image": "x" }, "$mutable": {}, "immutable": {} },
            "metadata": null,
            "id": 99,
            "totalSupply": "0",
            "royalty": 0,
            "fees": [{ "feePercentage": 0, "feeType": "game_royalty" }],
        }))
        .expect("template must decode");

        assert_eq!(template.id, 99);
        assert_eq!(template.kind, TemplateType::Ft);
        assert_eq!(template.props.mutable["image"], "x");
        assert_eq!(template.fees[0].fee_type, "game_royalty");
    }
}

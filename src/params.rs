use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::StardustError;

/// Key-value request data, kept in insertion order.
pub type Payload = Map<String, Value>;

/// Converts any serializable value into a [`Payload`].
///
/// `null` (e.g. `()`) becomes an empty payload. Values that do not
/// serialize to a JSON object are rejected.
pub fn to_payload<T: Serialize + ?Sized>(value: &T) -> Result<Payload, StardustError> {
    let value = serde_json::to_value(value)
        .map_err(|err| StardustError::Encode(format!("payload is not serializable: {err}")))?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Payload::new()),
        other => Err(StardustError::Encode(format!(
            "payload must serialize to a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Serializes a payload into a query string.
///
/// Objects and arrays are sent as URL-encoded JSON, strings and keys are
/// URL-encoded, and `null` leaves the value empty.
pub fn serialize_query(payload: &Payload) -> String {
    payload
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), query_value(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn query_value(value: &Value) -> String {
    match value {
        Value::Object(_) | Value::Array(_) => {
            urlencoding::encode(&value.to_string()).into_owned()
        }
        Value::String(text) => urlencoding::encode(text).into_owned(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => String::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One item or a list of items; always sent as a list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(item: T) -> Self {
        Self::One(item)
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items)
    }
}

impl<T, const N: usize> From<[T; N]> for OneOrMany<T> {
    fn from(items: [T; N]) -> Self {
        Self::Many(items.into())
    }
}

/// Wraps a non-array JSON value in an array; arrays pass through.
pub fn to_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::{serialize_query, to_array, to_payload, OneOrMany};
    use crate::StardustError;

    fn payload(value: serde_json::Value) -> super::Payload {
        to_payload(&value).expect("object payload")
    }

    #[test]
    fn query_keeps_key_order_and_joins_with_ampersand() {
        let query = serialize_query(&payload(json!({ "start": 0, "limit": 100, "filter": "sword" })));
        assert_eq!(query, "start=0&limit=100&filter=sword");
    }

    #[test]
    fn query_encodes_nested_values_as_json() {
        let query = serialize_query(&payload(json!({
            "tokenIds": [1, 2],
            "props": { "a": "b c" },
        })));
        assert_eq!(
            query,
            "tokenIds=%5B1%2C2%5D&props=%7B%22a%22%3A%22b%20c%22%7D"
        );
    }

    #[test]
    fn query_renders_plain_scalars_unchanged() {
        let query = serialize_query(&payload(json!({
            "playerId": "7d1e",
            "active": true,
            "cleared": null,
        })));
        assert_eq!(query, "playerId=7d1e&active=true&cleared=");
    }

    #[test]
    fn query_escapes_reserved_characters_in_strings_and_keys() {
        let query = serialize_query(&payload(json!({
            "uniqueId": "guild#7&rank=1+a",
            "a&b": 5,
            "limit": 5,
        })));
        assert_eq!(query, "uniqueId=guild%237%26rank%3D1%2Ba&a%26b=5&limit=5");

        let url = reqwest::Url::parse(&format!(
            "https://core-api.stardust.gg/v1/player/get-id?{query}"
        ))
        .expect("valid url");
        assert_eq!(url.fragment(), None);
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("uniqueId".to_owned(), "guild#7&rank=1+a".to_owned()),
                ("a&b".to_owned(), "5".to_owned()),
                ("limit".to_owned(), "5".to_owned()),
            ]
        );
    }

    #[test]
    fn empty_payload_has_empty_query() {
        assert_eq!(serialize_query(&to_payload(&()).expect("unit payload")), "");
    }

    #[test]
    fn struct_payload_follows_field_order() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Filter {
            template_id: u64,
            props: Vec<&'static str>,
        }

        let query = serialize_query(
            &to_payload(&Filter {
                template_id: 9,
                props: vec!["env"],
            })
            .expect("struct payload"),
        );
        assert_eq!(query, "templateId=9&props=%5B%22env%22%5D");
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = to_payload(&vec![1, 2]).expect_err("array payload must fail");
        assert!(matches!(err, StardustError::Encode(message) if message.contains("array")));
    }

    #[test]
    fn to_array_is_idempotent() {
        assert_eq!(to_array(json!({ "a": 1 })), vec![json!({ "a": 1 })]);
        assert_eq!(to_array(json!([{ "a": 1 }])), vec![json!({ "a": 1 })]);
        assert_eq!(to_array(json!({})), vec![json!({})]);
    }

    #[test]
    fn one_or_many_normalizes_to_vec() {
        assert_eq!(OneOrMany::<u32>::from(3).into_vec(), vec![3]);
        assert_eq!(OneOrMany::<u32>::from(vec![3, 4]).into_vec(), vec![3, 4]);
        assert_eq!(OneOrMany::<u32>::from([5]).into_vec(), vec![5]);
    }
}

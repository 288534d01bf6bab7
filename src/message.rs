//! Request/response messages exchanged with the preview surface

use serde::{Deserialize, Serialize};

/// An inbound request: which operation to run, with its string parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub operation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
}

impl Request {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_collection(mut self, id: impl Into<String>) -> Self {
        self.collection_id = Some(id.into());
        self
    }

    pub fn with_node(mut self, id: impl Into<String>) -> Self {
        self.node_id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Collections,
    Snippets,
    Preview,
    Lint,
    Error,
}

/// `{ name, id }` pair describing a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Text(String),
    Collections(Vec<CollectionSummary>),
}

/// An outbound, fire-and-forget result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub kind: ResponseKind,
    pub payload: Payload,
}

impl Response {
    pub fn text(kind: ResponseKind, payload: impl Into<String>) -> Self {
        Self {
            kind,
            payload: Payload::Text(payload.into()),
        }
    }

    pub fn collections(list: Vec<CollectionSummary>) -> Self {
        Self {
            kind: ResponseKind::Collections,
            payload: Payload::Collections(list),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::text(ResponseKind::Error, message)
    }

    pub fn is_error(&self) -> bool {
        self.kind == ResponseKind::Error
    }

    /// Text payload, if this response carries one
    pub fn as_text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(s) => Some(s),
            Payload::Collections(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let request: Request = serde_json::from_str(
            r#"{"operation": "export-variables", "format": "${name}", "collectionId": "c1"}"#,
        )
        .expect("Should parse");
        assert_eq!(
            request,
            Request::new("export-variables")
                .with_format("${name}")
                .with_collection("c1")
        );
    }

    #[test]
    fn test_response_wire_format() {
        let text = serde_json::to_string(&Response::text(ResponseKind::Snippets, "x")).unwrap();
        assert_eq!(text, r#"{"kind":"snippets","payload":"x"}"#);

        let list = Response::collections(vec![CollectionSummary {
            name: "Spacing".into(),
            id: "c1".into(),
        }]);
        assert_eq!(
            serde_json::to_string(&list).unwrap(),
            r#"{"kind":"collections","payload":[{"name":"Spacing","id":"c1"}]}"#
        );
    }

    #[test]
    fn test_response_round_trip_keeps_payload_shape() {
        let parsed: Response =
            serde_json::from_str(r#"{"kind":"collections","payload":[]}"#).unwrap();
        assert_eq!(parsed.payload, Payload::Collections(vec![]));
    }
}

//! Target group request event.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// An HTTP request forwarded by a load balancer target group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetGroupRequest {
    /// HTTP method token.
    #[serde(default, deserialize_with = "null_as_default")]
    pub http_method: String,

    /// Host-relative path, possibly carrying its own query string.
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,

    /// Query parameters; these take precedence over the query in `path`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_string_parameters: BTreeMap<String, String>,

    /// Request headers.
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: BTreeMap<String, String>,

    /// Raw or base64-encoded body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,

    #[serde(rename = "isBase64Encoded", default)]
    pub is_base64_encoded: bool,

    /// Load balancer metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_context: Option<TargetGroupRequestContext>,
}

impl TargetGroupRequest {
    /// Look up a header by name, ignoring ASCII case.
    ///
    /// When several names match, the last one in map order wins, the same
    /// policy applied when headers are copied onto the request.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// ARN of the target group that forwarded the request.
    pub fn target_group_arn(&self) -> Option<&str> {
        self.request_context
            .as_ref()
            .map(|ctx| ctx.elb.target_group_arn.as_str())
            .filter(|arn| !arn.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TargetGroupRequestContext {
    #[serde(default)]
    pub elb: ElbContext,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElbContext {
    #[serde(default)]
    pub target_group_arn: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_platform_payload() {
        let json = r#"{
            "requestContext": {
                "elb": {
                    "targetGroupArn": "arn:aws:elasticloadbalancing:us-east-1:123456789012:targetgroup/api/abc"
                }
            },
            "httpMethod": "POST",
            "path": "/items",
            "queryStringParameters": {"page": "2"},
            "headers": {"host": "api.example.com", "x-forwarded-for": "10.0.0.1"},
            "body": "aGVsbG8=",
            "isBase64Encoded": true
        }"#;

        let event: TargetGroupRequest = serde_json::from_str(json).unwrap();
        assert_eq!(event.http_method, "POST");
        assert_eq!(event.path, "/items");
        assert_eq!(event.query_string_parameters.get("page").map(String::as_str), Some("2"));
        assert_eq!(event.body, "aGVsbG8=");
        assert!(event.is_base64_encoded);
        assert_eq!(
            event.target_group_arn(),
            Some("arn:aws:elasticloadbalancing:us-east-1:123456789012:targetgroup/api/abc")
        );
    }

    #[test]
    fn test_null_and_missing_fields() {
        let json = r#"{
            "httpMethod": "GET",
            "path": "/",
            "queryStringParameters": null,
            "body": null
        }"#;

        let event: TargetGroupRequest = serde_json::from_str(json).unwrap();
        assert!(event.query_string_parameters.is_empty());
        assert!(event.headers.is_empty());
        assert!(event.body.is_empty());
        assert!(!event.is_base64_encoded);
        assert_eq!(event.target_group_arn(), None);
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let mut event = TargetGroupRequest::default();
        event.headers.insert("X-Forwarded-For".into(), "1.2.3.4".into());
        assert_eq!(event.header("x-forwarded-for"), Some("1.2.3.4"));

        // Lowercase sorts after capitalized names, so it wins.
        event.headers.insert("x-forwarded-for".into(), "5.6.7.8".into());
        assert_eq!(event.header("X-FORWARDED-FOR"), Some("5.6.7.8"));
        assert_eq!(event.header("host"), None);
    }
}

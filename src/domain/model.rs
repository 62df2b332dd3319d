use serde::{Deserialize, Serialize};

/// Name reported in every response envelope.
pub const APP_NAME: &str = "django-bench";
pub const DEFAULT_VERSION: &str = "v1";

/// Who is answering: fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceIdentity {
    pub app: String,
    pub version: String,
}

impl ServiceIdentity {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            app: APP_NAME.to_string(),
            version: version.into(),
        }
    }
}

impl Default for ServiceIdentity {
    fn default() -> Self {
        Self::new(DEFAULT_VERSION)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputeResult {
    pub n: u64,
    pub prime_count: u64,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadItem {
    pub id: u64,
    pub name: String,
    pub value: u64,
    pub active: bool,
}

// Wire envelopes. Field order is the order written on the wire.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub app: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeResponse {
    pub app: String,
    pub version: String,
    pub n: u64,
    pub prime_count: u64,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadResponse {
    pub app: String,
    pub version: String,
    pub item_count: u64,
    pub duration_ms: f64,
    pub items: Vec<PayloadItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl HealthResponse {
    pub fn ok(identity: &ServiceIdentity) -> Self {
        Self {
            status: "ok".to_string(),
            app: identity.app.clone(),
            version: identity.version.clone(),
        }
    }
}

impl ComputeResponse {
    pub fn new(identity: &ServiceIdentity, result: ComputeResult) -> Self {
        Self {
            app: identity.app.clone(),
            version: identity.version.clone(),
            n: result.n,
            prime_count: result.prime_count,
            duration_ms: result.duration_ms,
        }
    }
}

impl PayloadResponse {
    pub fn new(identity: &ServiceIdentity, items: Vec<PayloadItem>, duration_ms: f64) -> Self {
        Self {
            app: identity.app.clone(),
            version: identity.version.clone(),
            item_count: items.len() as u64,
            duration_ms,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_field_order() {
        let body = serde_json::to_string(&HealthResponse::ok(&ServiceIdentity::new("v2"))).unwrap();
        assert_eq!(body, r#"{"status":"ok","app":"django-bench","version":"v2"}"#);
    }

    #[test]
    fn test_compute_field_order() {
        let result = ComputeResult {
            n: 10,
            prime_count: 4,
            duration_ms: 0.012,
        };
        let response = ComputeResponse::new(&ServiceIdentity::default(), result);
        let body = serde_json::to_string(&response).unwrap();
        assert_eq!(
            body,
            r#"{"app":"django-bench","version":"v1","n":10,"prime_count":4,"duration_ms":0.012}"#
        );
    }

    #[test]
    fn test_payload_item_count_follows_items() {
        let items = vec![PayloadItem {
            id: 0,
            name: "item-0".to_string(),
            value: 0,
            active: true,
        }];
        let response = PayloadResponse::new(&ServiceIdentity::default(), items, 0.0);
        assert_eq!(response.item_count, 1);
    }
}

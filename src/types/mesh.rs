//! Mesh resource descriptors.
//!
//! Mesh resources (applications, volumes, networks, secrets, gateways,
//! services) share one envelope: a name plus a kind-specific `properties`
//! object, which is passed through unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope of a mesh resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescription {
    pub name: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceDescription {
    pub fn new(name: impl Into<String>, properties: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            properties,
            extra: Map::new(),
        }
    }

    fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_str())
    }

    pub fn status(&self) -> Option<&str> {
        self.property_str("status")
    }

    pub fn status_details(&self) -> Option<&str> {
        self.property_str("statusDetails")
    }

    pub fn provisioning_state(&self) -> Option<&str> {
        self.property_str("provisioningState")
    }
}

/// Upgrade progress of a mesh application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResourceUpgradeProgressInfo {
    pub name: String,
    #[serde(default)]
    pub target_application_type_version: Option<String>,
    #[serde(default)]
    pub upgrade_state: Option<String>,
    #[serde(default)]
    pub percent_completed: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// A replica of a mesh service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceReplicaDescription {
    pub replica_name: String,
    #[serde(default)]
    pub os_type: Option<String>,
    #[serde(default)]
    pub code_packages: Vec<Value>,
    #[serde(default)]
    pub network_refs: Vec<Value>,
    #[serde(default)]
    pub diagnostics: Option<Value>,
}

/// A named value of a mesh secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretValueResourceDescription {
    pub name: String,
    #[serde(default)]
    pub properties: SecretValueProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretValueProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl SecretValueResourceDescription {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: SecretValueProperties {
                value: Some(value.into()),
            },
        }
    }
}

/// Unwrapped secret value returned by the show operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretValue {
    #[serde(default)]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_envelope() {
        let resource: ResourceDescription = serde_json::from_value(json!({
            "name": "shop",
            "type": "Microsoft.ServiceFabricMesh/applications",
            "properties": {
                "status": "Ready",
                "provisioningState": "Succeeded"
            }
        }))
        .unwrap();
        assert_eq!(resource.status(), Some("Ready"));
        assert_eq!(resource.provisioning_state(), Some("Succeeded"));
        assert_eq!(resource.extra["type"], "Microsoft.ServiceFabricMesh/applications");
        assert!(resource.status_details().is_none());
    }

    #[test]
    fn test_secret_value_shape() {
        let value =
            serde_json::to_value(SecretValueResourceDescription::new("v1", "s3cr3t")).unwrap();
        assert_eq!(value, json!({"name": "v1", "properties": {"value": "s3cr3t"}}));
    }
}

//! Application type descriptors and provisioning requests.

use super::common::{ApplicationParameter, PagingOptions};
use serde::{Deserialize, Serialize};

/// A provisioned application type version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationTypeInfo {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub default_parameter_list: Vec<ApplicationParameter>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_details: Option<String>,
    #[serde(default)]
    pub application_type_definition_kind: Option<String>,
}

/// Filters for listing all application types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationTypeListQuery {
    /// Bit mask over application type definition kinds; 0 selects all.
    pub definition_kind_filter: u32,
    pub exclude_application_parameters: bool,
    pub paging: PagingOptions,
}

/// Filters for listing the versions of one application type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationTypeByNameQuery {
    pub application_type_version: Option<String>,
    pub exclude_application_parameters: bool,
    pub paging: PagingOptions,
}

/// Where the application package to provision lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Kind")]
pub enum ProvisionApplicationTypeDescription {
    /// Package previously uploaded to the image store.
    #[serde(rename_all = "PascalCase")]
    ImageStorePath {
        application_type_build_path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        application_package_cleanup_policy: Option<String>,
        #[serde(rename = "Async", default)]
        is_async: bool,
    },
    /// Package downloaded by the cluster from an external store.
    #[serde(rename_all = "PascalCase")]
    ExternalStore {
        application_package_download_uri: String,
        application_type_name: String,
        application_type_version: String,
        #[serde(rename = "Async", default)]
        is_async: bool,
    },
}

impl ProvisionApplicationTypeDescription {
    pub fn image_store_path(path: impl Into<String>) -> Self {
        Self::ImageStorePath {
            application_type_build_path: path.into(),
            application_package_cleanup_policy: None,
            is_async: false,
        }
    }
}

/// Version of an application type to unprovision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnprovisionApplicationTypeDescription {
    pub application_type_version: String,
    #[serde(rename = "Async", default)]
    pub is_async: bool,
}

/// Raw XML manifest text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManifestInfo {
    #[serde(default)]
    pub manifest: String,
}

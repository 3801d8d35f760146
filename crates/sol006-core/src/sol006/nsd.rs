//! SOL006 NSD output model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{"nsd": {"nsd": [...]}}`
///
/// The envelope key is doubled on purpose; consumers expect this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NsdDocument {
    pub nsd: NsdCatalog,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NsdCatalog {
    pub nsd: Vec<Nsd>,
}

impl NsdDocument {
    pub fn new(nsd: Nsd) -> Self {
        Self {
            nsd: NsdCatalog { nsd: vec![nsd] },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Nsd {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vnfd_id: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub df: Vec<NsDeploymentFlavour>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub virtual_link_desc: Vec<VirtualLinkDesc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NsDeploymentFlavour {
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vnf_profile: Vec<VnfProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VnfProfile {
    /// The member-vnf-index the profile was grouped by
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vnfd_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub virtual_link_connectivity: Vec<VirtualLinkConnectivity>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VirtualLinkConnectivity {
    pub virtual_link_profile_id: String,
    pub constituent_cpd_id: Vec<ConstituentCpdId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConstituentCpdId {
    pub constituent_base_element_id: String,
    pub constituent_cpd_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VirtualLinkDesc {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mgmt_network: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vim_network_name: Option<Value>,
}

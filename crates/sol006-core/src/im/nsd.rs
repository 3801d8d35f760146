//! IM NSD input model

use super::de;
use serde::Deserialize;
use serde_json::Value;

/// A single IM network service descriptor, unwrapped from its catalog
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImNsd {
    #[serde(deserialize_with = "de::string")]
    pub id: String,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub vendor: Option<String>,

    #[serde(default)]
    pub version: Option<Value>,

    #[serde(default, deserialize_with = "de::nullable_vec")]
    pub constituent_vnfd: Vec<ImConstituentVnfd>,

    #[serde(default, deserialize_with = "de::nullable_vec")]
    pub vld: Vec<ImVld>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImConstituentVnfd {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub vnfd_id_ref: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub member_vnf_index: Option<String>,
}

/// Network service level virtual link
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImVld {
    #[serde(deserialize_with = "de::string")]
    pub id: String,

    #[serde(default)]
    pub mgmt_network: Option<Value>,

    #[serde(default)]
    pub vim_network_name: Option<Value>,

    #[serde(default, deserialize_with = "de::nullable_vec")]
    pub vnfd_connection_point_ref: Vec<ImVnfdConnectionPointRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImVnfdConnectionPointRef {
    /// Member index, stringified; an absent index groups under `""`
    #[serde(default, deserialize_with = "de::opt_string")]
    pub member_vnf_index_ref: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub vnfd_id_ref: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub vnfd_connection_point_ref: Option<String>,

    #[serde(default)]
    pub ip_address: Option<Value>,
}

impl ImVnfdConnectionPointRef {
    pub fn member_vnf_index(&self) -> &str {
        self.member_vnf_index_ref.as_deref().unwrap_or("")
    }
}

//! IM VNFD input model
//!
//! Only the leaves the translation reads are modelled; everything else in the
//! IM descriptor is ignored. Subtrees that SOL006 carries verbatim stay as
//! decoded [`Value`]s.

use super::de;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A single IM VNF descriptor, already unwrapped from its catalog envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImVnfd {
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

    #[serde(default)]
    pub mgmt_interface: Option<ImMgmtInterface>,

    #[serde(default, deserialize_with = "de::nullable_vec")]
    pub vdu: Vec<ImVdu>,

    #[serde(default, deserialize_with = "de::nullable_vec")]
    pub connection_point: Vec<ImConnectionPoint>,

    #[serde(default, deserialize_with = "de::nullable_vec")]
    pub internal_vld: Vec<ImInternalVld>,

    #[serde(default, deserialize_with = "de::nullable_vec")]
    pub ip_profiles: Vec<ImIpProfile>,

    #[serde(default, deserialize_with = "de::nullable_vec")]
    pub monitoring_param: Vec<ImMonitoringParam>,

    #[serde(default, deserialize_with = "de::nullable_vec")]
    pub scaling_group_descriptor: Vec<ImScalingGroupDescriptor>,

    #[serde(default)]
    pub vnf_configuration: Option<Value>,

    #[serde(default)]
    pub kdu: Option<Value>,

    #[serde(default)]
    pub k8s_cluster: Option<ImK8sCluster>,

    #[serde(default)]
    pub placement_groups: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImMgmtInterface {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub cp: Option<String>,
}

/// Virtual Deployment Unit
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImVdu {
    #[serde(deserialize_with = "de::string")]
    pub id: String,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "de::opt_u64")]
    pub count: Option<u64>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "de::nullable_vec")]
    pub alternative_images: Vec<ImAlternativeImage>,

    #[serde(default)]
    pub vm_flavor: Option<ImVmFlavor>,

    #[serde(default)]
    pub guest_epa: Option<ImGuestEpa>,

    #[serde(default, deserialize_with = "de::nullable_vec")]
    pub interface: Vec<ImInterface>,

    #[serde(default, deserialize_with = "de::nullable_vec")]
    pub monitoring_param: Vec<ImVduMonitoringParam>,

    #[serde(default)]
    pub vdu_configuration: Option<Value>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub cloud_init_file: Option<String>,

    #[serde(default)]
    pub supplemental_boot_data: Option<Value>,

    #[serde(default)]
    pub alarm: Option<Value>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub pdu_type: Option<String>,
}

impl ImVdu {
    /// Number of instances created at instantiation (IM default is 1)
    pub fn initial_count(&self) -> u64 {
        self.count.unwrap_or(1)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImAlternativeImage {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub vim_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImVmFlavor {
    #[serde(default, deserialize_with = "de::opt_u64")]
    pub vcpu_count: Option<u64>,

    #[serde(default, deserialize_with = "de::opt_f64")]
    pub memory_mb: Option<f64>,

    #[serde(default, deserialize_with = "de::opt_u64")]
    pub storage_gb: Option<u64>,
}

impl ImVmFlavor {
    pub fn vcpu_count(&self) -> Option<u64> {
        de::non_zero(self.vcpu_count)
    }

    pub fn memory_mb(&self) -> Option<f64> {
        self.memory_mb.filter(|mb| *mb != 0.0)
    }

    pub fn storage_gb(&self) -> Option<u64> {
        de::non_zero(self.storage_gb)
    }

    /// Whether the flavor yields a compute descriptor
    pub fn has_compute(&self) -> bool {
        self.vcpu_count().is_some() || self.memory_mb().is_some()
    }
}

/// Enhanced Platform Awareness hints
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImGuestEpa {
    #[serde(default)]
    pub mempage_size: Option<Value>,

    #[serde(default)]
    pub numa_node_policy: Option<Value>,

    #[serde(default)]
    pub mem_quota: Option<Value>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub cpu_pinning_policy: Option<String>,

    #[serde(default)]
    pub cpu_thread_pinning_policy: Option<Value>,

    #[serde(default)]
    pub cpu_quota: Option<Value>,

    #[serde(default)]
    pub disk_io_quota: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImInterface {
    #[serde(deserialize_with = "de::string")]
    pub name: String,

    #[serde(default)]
    pub virtual_interface: Option<Value>,

    #[serde(default, deserialize_with = "de::opt_u64")]
    pub position: Option<u64>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub external_connection_point_ref: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub internal_connection_point_ref: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImVduMonitoringParam {
    #[serde(deserialize_with = "de::string")]
    pub id: String,

    #[serde(default)]
    pub nfvi_metric: Option<Value>,
}

/// External connection point declared at VNFD scope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImConnectionPoint {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,

    #[serde(default)]
    pub port_security_enabled: Option<Value>,

    #[serde(default)]
    pub port_security_disable_strategy: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImInternalVld {
    #[serde(deserialize_with = "de::string")]
    pub id: String,

    #[serde(default, deserialize_with = "de::nullable_vec")]
    pub internal_connection_point: Vec<ImInternalConnectionPoint>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub ip_profile_ref: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImInternalConnectionPoint {
    #[serde(deserialize_with = "de::string")]
    pub id_ref: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImIpProfile {
    #[serde(deserialize_with = "de::string")]
    pub name: String,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub description: Option<String>,

    #[serde(default)]
    pub ip_profile_params: Option<ImIpProfileParams>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImIpProfileParams {
    #[serde(default)]
    pub ip_version: Option<Value>,

    #[serde(default)]
    pub subnet_address: Option<Value>,

    #[serde(default)]
    pub gateway_address: Option<Value>,

    #[serde(default)]
    pub security_group: Option<Value>,

    #[serde(default)]
    pub dhcp_params: Option<ImDhcpParams>,

    /// Leaves SOL006 has no slot for (dns-server, ...)
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ImIpProfileParams {
    /// Whether the parameter block declares anything at all
    pub fn is_empty(&self) -> bool {
        self.ip_version.is_none()
            && self.subnet_address.is_none()
            && self.gateway_address.is_none()
            && self.security_group.is_none()
            && self.dhcp_params.is_none()
            && self.other.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImDhcpParams {
    #[serde(default)]
    pub enabled: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImMonitoringParam {
    #[serde(deserialize_with = "de::string")]
    pub id: String,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub name: Option<String>,

    #[serde(default)]
    pub vdu_monitoring_param: Option<ImVduMonitoringParamRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImVduMonitoringParamRef {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub vdu_ref: Option<String>,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub vdu_monitoring_param_ref: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImScalingGroupDescriptor {
    #[serde(deserialize_with = "de::string")]
    pub name: String,

    #[serde(default, deserialize_with = "de::nullable_vec")]
    pub vdu: Vec<ImScalingGroupVdu>,

    #[serde(default, deserialize_with = "de::opt_u64")]
    pub min_instance_count: Option<u64>,

    #[serde(default, deserialize_with = "de::opt_u64")]
    pub max_instance_count: Option<u64>,

    #[serde(default)]
    pub scaling_policy: Option<Value>,

    #[serde(default)]
    pub scaling_config_action: Option<Value>,
}

impl ImScalingGroupDescriptor {
    /// Whether this group scales the given VDU
    pub fn references_vdu(&self, vdu_id: &str) -> bool {
        self.vdu
            .iter()
            .any(|member| member.vdu_id_ref.as_deref() == Some(vdu_id))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImScalingGroupVdu {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub vdu_id_ref: Option<String>,

    #[serde(default, deserialize_with = "de::opt_u64")]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImK8sCluster {
    #[serde(default)]
    pub version: Option<Value>,

    #[serde(default)]
    pub cni: Option<Value>,

    #[serde(default, deserialize_with = "de::nullable_vec")]
    pub nets: Vec<ImK8sNet>,
}

impl ImK8sCluster {
    pub fn is_empty(&self) -> bool {
        self.version.is_none() && self.cni.is_none() && self.nets.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImK8sNet {
    #[serde(deserialize_with = "de::string")]
    pub id: String,

    #[serde(default, deserialize_with = "de::opt_string")]
    pub external_connection_point_ref: Option<String>,
}

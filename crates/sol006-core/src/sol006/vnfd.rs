//! SOL006 VNFD output model
//!
//! Field order follows the order in which the pipeline fills the builder, so
//! the serialized document reads top-down like the translation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{"vnfd": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VnfdDocument {
    pub vnfd: Vnfd,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Vnfd {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mgmt_cp: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub virtual_storage_desc: Vec<VirtualStorageDesc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub virtual_compute_desc: Vec<VirtualComputeDesc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sw_image_desc: Vec<SwImageDesc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vdu: Vec<Vdu>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ext_cpd: Vec<ExtCpd>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub int_virtual_link_desc: Vec<IntVirtualLinkDesc>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub df: Vec<DeploymentFlavour>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vnf_configuration: Vec<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vdu_configuration: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdu: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k8s_cluster: Option<K8sCluster>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement_groups: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VirtualStorageDesc {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_of_storage: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_io_quota: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VirtualComputeDesc {
    pub id: String,

    #[serde(default, skip_serializing_if = "VirtualCpu::is_empty")]
    pub virtual_cpu: VirtualCpu,

    #[serde(default, skip_serializing_if = "VirtualMemory::is_empty")]
    pub virtual_memory: VirtualMemory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VirtualCpu {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_virtual_cpu: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinning: Option<CpuPinning>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_quota: Option<Value>,
}

impl VirtualCpu {
    pub fn is_empty(&self) -> bool {
        self.num_virtual_cpu.is_none() && self.pinning.is_none() && self.cpu_quota.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CpuPinning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<PinningPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_policy: Option<Value>,
}

/// SOL006 CPU pinning policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinningPolicy {
    Static,
    Dynamic,
}

impl PinningPolicy {
    /// Map an IM `cpu-pinning-policy`; only `SHARED` is dynamic
    pub fn from_im(policy: &str) -> Self {
        if policy == "SHARED" {
            PinningPolicy::Dynamic
        } else {
            PinningPolicy::Static
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VirtualMemory {
    /// Size in GiB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mempage_size: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numa_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numa_node_policy: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mem_quota: Option<Value>,
}

impl VirtualMemory {
    pub fn is_empty(&self) -> bool {
        self.size.is_none()
            && self.mempage_size.is_none()
            && self.numa_enabled.is_none()
            && self.numa_node_policy.is_none()
            && self.mem_quota.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SwImageDesc {
    pub id: String,
    pub name: String,
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vim_type: Option<String>,
}

impl SwImageDesc {
    pub fn new(image: &str) -> Self {
        Self {
            id: image.to_string(),
            name: image.to_string(),
            image: image.to_string(),
            vim_type: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Vdu {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_init_file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplemental_boot_data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdu_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sw_image_desc: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_sw_image_desc: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_compute_desc: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub virtual_storage_desc: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub int_cpd: Vec<IntCpd>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monitoring_parameter: Vec<MonitoringParameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IntCpd {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_virtual_link_desc: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub virtual_network_interface_requirement: Vec<VirtualNetworkInterfaceRequirement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VirtualNetworkInterfaceRequirement {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_interface: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MonitoringParameter {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_metric: Option<Value>,
}

/// External connection point; anchored either on a VDU int-cpd or on a
/// Kubernetes cluster network
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExtCpd {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int_cpd: Option<IntCpdRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k8s_cluster_net: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_security_enabled: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_security_disable_strategy: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IntCpdRef {
    pub vdu_id: String,
    pub cpd: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntVirtualLinkDesc {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeploymentFlavour {
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vdu_profile: Vec<VduProfile>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instantiation_level: Vec<InstantiationLevel>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scaling_aspect: Vec<ScalingAspect>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub virtual_link_profile: Vec<VirtualLinkProfile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vnf_configuration_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VduProfile {
    pub id: String,
    pub min_number_of_instances: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_number_of_instances: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vdu_configuration_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InstantiationLevel {
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vdu_level: Vec<VduLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VduLevel {
    pub vdu_id: String,
    pub number_of_instances: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScalingAspect {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_scale_level: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling_policy: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling_config_action: Option<Value>,

    pub aspect_delta_details: AspectDeltaDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AspectDeltaDetails {
    pub deltas: Vec<ScalingDelta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScalingDelta {
    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vdu_delta: Vec<VduDelta>,
}

/// Both leaves are optional: a scaling-group vdu entry may omit either
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VduDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_instances: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VirtualLinkProfile {
    pub id: String,
    pub flavour: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_link_protocol_data: Option<VirtualLinkProtocolData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VirtualLinkProtocolData {
    pub l3_protocol_data: L3ProtocolData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct L3ProtocolData {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_ip: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_group: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dhcp_enabled: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct K8sCluster {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cni: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nets: Vec<K8sClusterNet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct K8sClusterNet {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_fields_are_omitted() {
        let vnfd = Vnfd {
            id: "v".to_string(),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&vnfd).unwrap(), json!({"id": "v"}));
    }

    #[test]
    fn test_compute_desc_skips_empty_sections() {
        let vcd = VirtualComputeDesc {
            id: "vdu-compute".to_string(),
            virtual_cpu: VirtualCpu {
                num_virtual_cpu: Some(2),
                ..Default::default()
            },
            virtual_memory: VirtualMemory::default(),
        };
        assert_eq!(
            serde_json::to_value(&vcd).unwrap(),
            json!({"id": "vdu-compute", "virtual-cpu": {"num-virtual-cpu": 2}})
        );
    }

    #[test]
    fn test_pinning_policy_mapping() {
        assert_eq!(PinningPolicy::from_im("SHARED"), PinningPolicy::Dynamic);
        assert_eq!(PinningPolicy::from_im("DEDICATED"), PinningPolicy::Static);
        assert_eq!(PinningPolicy::from_im("ANY"), PinningPolicy::Static);
        assert_eq!(serde_json::to_value(PinningPolicy::Dynamic).unwrap(), json!("dynamic"));
    }
}

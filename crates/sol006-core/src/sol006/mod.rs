//! Typed SOL006 (target) descriptors
//!
//! Every optional key is an `Option` or a `Vec` that is skipped when empty,
//! so an absent source leaf never shows up as an empty container in the
//! serialized output.

pub mod nsd;
pub mod vnfd;

pub use nsd::{
    ConstituentCpdId, NsDeploymentFlavour, Nsd, NsdCatalog, NsdDocument, VirtualLinkConnectivity,
    VirtualLinkDesc, VnfProfile,
};
pub use vnfd::{
    AspectDeltaDetails, CpuPinning, DeploymentFlavour, ExtCpd, InstantiationLevel, IntCpd,
    IntCpdRef, IntVirtualLinkDesc, K8sCluster, K8sClusterNet, L3ProtocolData, MonitoringParameter,
    PinningPolicy, ScalingAspect, ScalingDelta, SwImageDesc, VirtualComputeDesc, VirtualCpu,
    VirtualLinkProfile, VirtualLinkProtocolData, VirtualMemory, VirtualNetworkInterfaceRequirement,
    VirtualStorageDesc, Vdu, VduDelta, VduLevel, VduProfile, Vnfd, VnfdDocument,
};

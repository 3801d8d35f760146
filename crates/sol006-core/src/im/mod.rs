//! Typed view of the IM (source) descriptors
//!
//! The raw document is decoded from [`serde_json::Value`] into these structs
//! once the envelope has been removed. Decoding only borrows the input, so
//! the caller's document is never touched.

pub(crate) mod de;
pub mod nsd;
pub mod vnfd;

pub use de::is_truthy;
pub use nsd::{ImConstituentVnfd, ImNsd, ImVld, ImVnfdConnectionPointRef};
pub use vnfd::{
    ImAlternativeImage, ImConnectionPoint, ImGuestEpa, ImInterface, ImInternalVld, ImIpProfile,
    ImIpProfileParams, ImK8sCluster, ImMonitoringParam, ImScalingGroupDescriptor, ImVdu,
    ImVmFlavor, ImVnfd,
};

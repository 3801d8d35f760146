//! Passthrough configuration blocks

use super::builder::{VnfdBuilder, DEFAULT_VNF_CONFIGURATION_ID};
use super::vdus::with_id;
use crate::error::Result;
use crate::im::de::present;
use crate::im::ImVnfd;

pub(super) fn add_vnf_configuration(im: &ImVnfd, builder: &mut VnfdBuilder) -> Result<()> {
    let Some(configuration) = present(&im.vnf_configuration) else {
        return Ok(());
    };
    let configuration = with_id(configuration, DEFAULT_VNF_CONFIGURATION_ID, "vnf-configuration")?;
    builder.vnfd_mut().vnf_configuration = vec![configuration];
    builder.default_df().vnf_configuration_id = Some(DEFAULT_VNF_CONFIGURATION_ID.to_string());
    Ok(())
}

pub(super) fn add_placement_groups(im: &ImVnfd, builder: &mut VnfdBuilder) -> Result<()> {
    builder.vnfd_mut().placement_groups = present(&im.placement_groups).cloned();
    Ok(())
}

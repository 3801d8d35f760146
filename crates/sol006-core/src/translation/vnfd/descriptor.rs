//! Descriptor-level scalar fields

use super::builder::{ext_cpd_id, VnfdBuilder};
use crate::error::Result;
use crate::im::de::{non_empty, present};
use crate::im::ImVnfd;

/// id, product-name, description, provider, version
pub(super) fn add_basic_data(im: &ImVnfd, builder: &mut VnfdBuilder) -> Result<()> {
    let vnfd = builder.vnfd_mut();
    vnfd.id = im.id.clone();
    vnfd.product_name = non_empty(&im.name).map(str::to_string);
    vnfd.description = non_empty(&im.description).map(str::to_string);
    vnfd.provider = non_empty(&im.vendor).map(str::to_string);
    vnfd.version = present(&im.version).cloned();
    Ok(())
}

pub(super) fn add_mgmt_cp(im: &ImVnfd, builder: &mut VnfdBuilder) -> Result<()> {
    let cp = im
        .mgmt_interface
        .as_ref()
        .and_then(|mgmt| non_empty(&mgmt.cp));
    builder.vnfd_mut().mgmt_cp = cp.map(ext_cpd_id);
    Ok(())
}

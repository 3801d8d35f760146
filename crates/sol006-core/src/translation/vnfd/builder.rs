//! Shared output builder for the VNFD pipeline
//!
//! Later stages patch entries earlier stages created (EPA onto flavors,
//! internal links onto int-cpds, monitoring parameters onto VDUs). The
//! builder keeps id-to-position indexes next to the lists so those patches
//! are map lookups instead of rescans.

use crate::index::IdIndex;
use crate::sol006::{
    DeploymentFlavour, InstantiationLevel, Vdu, VirtualComputeDesc, VirtualStorageDesc, Vnfd,
};

pub(crate) const DEFAULT_DF_ID: &str = "default-df";
pub(crate) const DEFAULT_INSTANTIATION_LEVEL_ID: &str = "default-instantiation-level";
pub(crate) const DEFAULT_VNF_CONFIGURATION_ID: &str = "default-vnf-configuration";

pub(crate) fn compute_desc_id(vdu_id: &str) -> String {
    format!("{}-compute", vdu_id)
}

pub(crate) fn storage_desc_id(vdu_id: &str) -> String {
    format!("{}-storage", vdu_id)
}

pub(crate) fn int_cpd_id(interface_name: &str) -> String {
    format!("{}-int", interface_name)
}

pub(crate) fn ext_cpd_id(connection_point: &str) -> String {
    format!("{}-ext", connection_point)
}

pub(crate) fn vdu_configuration_id(vdu_id: &str) -> String {
    format!("{}-vdu-configuration", vdu_id)
}

#[derive(Debug, Default)]
pub struct VnfdBuilder {
    vnfd: Vnfd,
    vdus: IdIndex,
    compute: IdIndex,
    storage: IdIndex,
}

impl VnfdBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            vnfd: Vnfd {
                id: id.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn vnfd(&self) -> &Vnfd {
        &self.vnfd
    }

    /// Direct access for fields no other stage patches
    pub fn vnfd_mut(&mut self) -> &mut Vnfd {
        &mut self.vnfd
    }

    pub fn push_compute_desc(&mut self, desc: VirtualComputeDesc) {
        self.compute.insert(&desc.id, self.vnfd.virtual_compute_desc.len());
        self.vnfd.virtual_compute_desc.push(desc);
    }

    pub fn push_storage_desc(&mut self, desc: VirtualStorageDesc) {
        self.storage.insert(&desc.id, self.vnfd.virtual_storage_desc.len());
        self.vnfd.virtual_storage_desc.push(desc);
    }

    /// The compute descriptor with `id`, appended empty if missing
    pub fn compute_desc_mut(&mut self, id: &str) -> &mut VirtualComputeDesc {
        let position = match self.compute.position(id) {
            Some(position) => position,
            None => {
                self.push_compute_desc(VirtualComputeDesc {
                    id: id.to_string(),
                    ..Default::default()
                });
                self.vnfd.virtual_compute_desc.len() - 1
            }
        };
        &mut self.vnfd.virtual_compute_desc[position]
    }

    /// The storage descriptor with `id`, appended empty if missing
    pub fn storage_desc_mut(&mut self, id: &str) -> &mut VirtualStorageDesc {
        let position = match self.storage.position(id) {
            Some(position) => position,
            None => {
                self.push_storage_desc(VirtualStorageDesc {
                    id: id.to_string(),
                    ..Default::default()
                });
                self.vnfd.virtual_storage_desc.len() - 1
            }
        };
        &mut self.vnfd.virtual_storage_desc[position]
    }

    pub fn push_vdu(&mut self, vdu: Vdu) {
        self.vdus.insert(&vdu.id, self.vnfd.vdu.len());
        self.vnfd.vdu.push(vdu);
    }

    pub fn vdu_mut(&mut self, id: &str) -> Option<&mut Vdu> {
        let position = self.vdus.position(id)?;
        self.vnfd.vdu.get_mut(position)
    }

    /// The single deployment flavour, created on first use
    pub fn default_df(&mut self) -> &mut DeploymentFlavour {
        if self.vnfd.df.is_empty() {
            self.vnfd.df.push(DeploymentFlavour {
                id: DEFAULT_DF_ID.to_string(),
                ..Default::default()
            });
        }
        &mut self.vnfd.df[0]
    }

    /// The single instantiation level of the default flavour
    pub fn default_instantiation_level(&mut self) -> &mut InstantiationLevel {
        let df = self.default_df();
        if df.instantiation_level.is_empty() {
            df.instantiation_level.push(InstantiationLevel {
                id: DEFAULT_INSTANTIATION_LEVEL_ID.to_string(),
                ..Default::default()
            });
        }
        &mut df.instantiation_level[0]
    }

    pub fn finish(mut self) -> Vnfd {
        self.default_df();
        self.vnfd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_desc_get_or_create() {
        let mut builder = VnfdBuilder::new("v");
        builder.push_compute_desc(VirtualComputeDesc {
            id: "a-compute".to_string(),
            ..Default::default()
        });
        builder.compute_desc_mut("a-compute").virtual_cpu.num_virtual_cpu = Some(2);
        builder.compute_desc_mut("b-compute");

        let vnfd = builder.vnfd();
        assert_eq!(vnfd.virtual_compute_desc.len(), 2);
        assert_eq!(vnfd.virtual_compute_desc[0].virtual_cpu.num_virtual_cpu, Some(2));
        assert_eq!(vnfd.virtual_compute_desc[1].id, "b-compute");
    }

    #[test]
    fn test_storage_desc_get_or_create() {
        let mut builder = VnfdBuilder::new("v");
        builder.storage_desc_mut("a-storage").size_of_storage = Some(10);
        builder.storage_desc_mut("a-storage").disk_io_quota = Some(serde_json::json!({"limit": 1}));
        assert_eq!(builder.vnfd().virtual_storage_desc.len(), 1);
    }

    #[test]
    fn test_single_default_df() {
        let mut builder = VnfdBuilder::new("v");
        builder.default_df();
        builder.default_instantiation_level();
        builder.default_instantiation_level();
        let vnfd = builder.finish();
        assert_eq!(vnfd.df.len(), 1);
        assert_eq!(vnfd.df[0].id, DEFAULT_DF_ID);
        assert_eq!(vnfd.df[0].instantiation_level.len(), 1);
    }

    #[test]
    fn test_finish_always_has_df() {
        let vnfd = VnfdBuilder::new("v").finish();
        assert_eq!(vnfd.df.len(), 1);
    }

    #[test]
    fn test_vdu_lookup() {
        let mut builder = VnfdBuilder::new("v");
        builder.push_vdu(Vdu {
            id: "mgmt".to_string(),
            ..Default::default()
        });
        assert!(builder.vdu_mut("mgmt").is_some());
        assert!(builder.vdu_mut("data").is_none());
    }
}

//! VNFD translation pipeline
//!
//! Fourteen stages run strictly in order against one [`VnfdBuilder`]. The
//! order carries data dependencies: EPA patches the descriptors the flavor
//! stage created, internal links and monitoring parameters patch the VDUs
//! built by the VDU stage.

mod builder;
mod compute;
mod configuration;
mod descriptor;
mod images;
mod kubernetes;
mod links;
mod monitoring;
mod scaling;
mod vdus;

use builder::VnfdBuilder;

use crate::error::Result;
use crate::im::ImVnfd;
use crate::sol006::Vnfd;

type Stage = fn(&ImVnfd, &mut VnfdBuilder) -> Result<()>;

const STAGES: [(&str, Stage); 14] = [
    ("basic-data", descriptor::add_basic_data),
    ("mgmt-cp", descriptor::add_mgmt_cp),
    ("flavors", compute::add_flavors),
    ("guest-epa", compute::add_guest_epa),
    ("images", images::add_images),
    ("vdus", vdus::add_vdus),
    ("internal-vlds", links::add_internal_vlds),
    ("vnf-configuration", configuration::add_vnf_configuration),
    ("ip-profiles", links::add_ip_profiles),
    ("monitoring-params", monitoring::add_monitoring_params),
    ("scaling-groups", scaling::add_scaling_aspects),
    ("kdus", kubernetes::add_kdus),
    ("k8s-cluster", kubernetes::add_k8s_cluster),
    ("placement-groups", configuration::add_placement_groups),
];

/// Run every stage over an unwrapped IM VNFD; validation is the caller's job
pub(crate) fn translate_im_vnfd(im: &ImVnfd) -> Result<Vnfd> {
    let mut builder = VnfdBuilder::new(im.id.clone());
    for (name, stage) in STAGES {
        tracing::debug!(stage = name, vnfd = %im.id, "running VNFD stage");
        stage(im, &mut builder)?;
    }
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stage_order() {
        let names: Vec<_> = STAGES.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), 14);
        assert_eq!(names.first(), Some(&"basic-data"));
        assert_eq!(names.last(), Some(&"placement-groups"));
        let position = |name| names.iter().position(|n| *n == name).unwrap();
        assert!(position("flavors") < position("guest-epa"));
        assert!(position("vdus") < position("internal-vlds"));
        assert!(position("vdus") < position("monitoring-params"));
    }

    #[test]
    fn test_minimal_descriptor() {
        let im: ImVnfd = serde_json::from_value(json!({"id": "empty"})).unwrap();
        let vnfd = translate_im_vnfd(&im).unwrap();
        assert_eq!(
            serde_json::to_value(&vnfd).unwrap(),
            json!({"id": "empty", "df": [{"id": "default-df"}]})
        );
    }
}

//! VDU entries, connection points and the default deployment flavour
//!
//! Flavor references are name-based: the VDU points at `<id>-compute` and
//! `<id>-storage` following the same rule the flavor stage used to create
//! those descriptors.

use super::builder::{
    compute_desc_id, ext_cpd_id, int_cpd_id, storage_desc_id, vdu_configuration_id, VnfdBuilder,
};
use crate::error::{Error, Result};
use crate::im::de::{non_empty, present};
use crate::im::{ImConnectionPoint, ImInterface, ImScalingGroupDescriptor, ImVdu, ImVnfd};
use crate::sol006::{
    ExtCpd, IntCpd, IntCpdRef, Vdu, VduLevel, VduProfile, VirtualNetworkInterfaceRequirement,
};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub(super) fn add_vdus(im: &ImVnfd, builder: &mut VnfdBuilder) -> Result<()> {
    let mut connection_points: HashMap<&str, &ImConnectionPoint> = HashMap::new();
    for cp in &im.connection_point {
        if let Some(name) = cp.name.as_deref() {
            connection_points.entry(name).or_insert(cp);
        }
    }

    for im_vdu in &im.vdu {
        let mut vdu = vdu_descriptor(im_vdu);
        for interface in &im_vdu.interface {
            let cpd = int_cpd(interface);
            if let Some(cp_ref) = non_empty(&interface.external_connection_point_ref) {
                let ext = ext_cpd(&im_vdu.id, &cpd.id, cp_ref, connection_points.get(cp_ref));
                builder.vnfd_mut().ext_cpd.push(ext);
            }
            vdu.int_cpd.push(cpd);
        }

        let configuration_id = match present(&im_vdu.vdu_configuration) {
            Some(configuration) => {
                let id = vdu_configuration_id(&im_vdu.id);
                let configuration = with_id(configuration, &id, "vdu-configuration")?;
                builder.vnfd_mut().vdu_configuration.push(configuration);
                Some(id)
            }
            None => None,
        };

        let profile = vdu_profile(im_vdu, im, configuration_id)?;
        builder.default_df().vdu_profile.push(profile);
        builder.default_instantiation_level().vdu_level.push(VduLevel {
            vdu_id: im_vdu.id.clone(),
            number_of_instances: im_vdu.initial_count(),
        });
        builder.push_vdu(vdu);
    }
    Ok(())
}

fn vdu_descriptor(im_vdu: &ImVdu) -> Vdu {
    let flavor = im_vdu.vm_flavor.as_ref();
    Vdu {
        id: im_vdu.id.clone(),
        name: non_empty(&im_vdu.name).map(str::to_string),
        description: non_empty(&im_vdu.description).map(str::to_string),
        cloud_init_file: non_empty(&im_vdu.cloud_init_file).map(str::to_string),
        supplemental_boot_data: present(&im_vdu.supplemental_boot_data).cloned(),
        alarm: present(&im_vdu.alarm).cloned(),
        pdu_type: non_empty(&im_vdu.pdu_type).map(str::to_string),
        sw_image_desc: non_empty(&im_vdu.image).map(str::to_string),
        alternative_sw_image_desc: im_vdu
            .alternative_images
            .iter()
            .filter_map(|alt| non_empty(&alt.image).map(str::to_string))
            .collect(),
        virtual_compute_desc: flavor
            .filter(|f| f.has_compute())
            .map(|_| compute_desc_id(&im_vdu.id)),
        virtual_storage_desc: flavor
            .and_then(|f| f.storage_gb())
            .map(|_| vec![storage_desc_id(&im_vdu.id)])
            .unwrap_or_default(),
        int_cpd: Vec::new(),
        monitoring_parameter: Vec::new(),
    }
}

fn int_cpd(interface: &ImInterface) -> IntCpd {
    IntCpd {
        id: int_cpd_id(&interface.name),
        int_virtual_link_desc: None,
        virtual_network_interface_requirement: vec![VirtualNetworkInterfaceRequirement {
            name: interface.name.clone(),
            virtual_interface: present(&interface.virtual_interface).cloned(),
            position: interface.position,
        }],
    }
}

fn ext_cpd(vdu_id: &str, cpd_id: &str, cp_ref: &str, cp: Option<&&ImConnectionPoint>) -> ExtCpd {
    ExtCpd {
        id: ext_cpd_id(cp_ref),
        int_cpd: Some(IntCpdRef {
            vdu_id: vdu_id.to_string(),
            cpd: cpd_id.to_string(),
        }),
        k8s_cluster_net: None,
        // an explicit `false` is kept, only a missing leaf is dropped
        port_security_enabled: cp
            .and_then(|cp| cp.port_security_enabled.as_ref())
            .filter(|v| !v.is_null())
            .cloned(),
        port_security_disable_strategy: cp
            .and_then(|cp| present(&cp.port_security_disable_strategy))
            .cloned(),
    }
}

/// Instance bounds of a VDU, widened by every scaling group naming it
fn vdu_profile(
    im_vdu: &ImVdu,
    im: &ImVnfd,
    configuration_id: Option<String>,
) -> Result<VduProfile> {
    let initial = im_vdu.initial_count();
    let groups: Vec<_> = im
        .scaling_group_descriptor
        .iter()
        .filter(|group| group.references_vdu(&im_vdu.id))
        .collect();

    let widen = |bound: &str, per_group: fn(&ImScalingGroupDescriptor) -> u64| {
        groups
            .iter()
            .try_fold(initial, |total, group| total.checked_add(per_group(*group)))
            .ok_or_else(|| {
                Error::malformed(format!(
                    "{} of vdu '{}' overflows an unsigned 64-bit integer",
                    bound, im_vdu.id
                ))
            })
    };

    let min_number_of_instances = widen("min-number-of-instances", min_scale_out)?;
    let max_number_of_instances = if groups.is_empty() {
        None
    } else {
        Some(widen("max-number-of-instances", max_scale_out)?)
    };

    Ok(VduProfile {
        id: im_vdu.id.clone(),
        min_number_of_instances,
        max_number_of_instances,
        vdu_configuration_id: configuration_id,
    })
}

fn min_scale_out(group: &ImScalingGroupDescriptor) -> u64 {
    group.min_instance_count.unwrap_or(0)
}

fn max_scale_out(group: &ImScalingGroupDescriptor) -> u64 {
    group.max_instance_count.unwrap_or(1)
}

/// Copy a passthrough configuration mapping and stamp the generated id on it
pub(super) fn with_id(configuration: &Value, id: &str, field: &str) -> Result<Value> {
    let map = configuration.as_object().ok_or_else(|| {
        Error::malformed(format!("'{}' must be a mapping", field))
    })?;
    let mut configuration: Map<String, Value> = map.clone();
    configuration.insert("id".to_string(), Value::String(id.to_string()));
    Ok(Value::Object(configuration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(value: Value) -> Result<crate::sol006::Vnfd> {
        let im: ImVnfd = serde_json::from_value(value).unwrap();
        let mut builder = VnfdBuilder::new(im.id.clone());
        add_vdus(&im, &mut builder)?;
        Ok(builder.finish())
    }

    #[test]
    fn test_interfaces_become_int_and_ext_cpds() {
        let vnfd = run(json!({
            "id": "v",
            "connection-point": [{"name": "eth0", "port-security-enabled": false}],
            "vdu": [{
                "id": "vdu",
                "interface": [
                    {"name": "eth0", "position": 1, "virtual-interface": {"type": "VIRTIO"},
                     "external-connection-point-ref": "eth0"},
                    {"name": "eth1", "internal-connection-point-ref": "int"}
                ]
            }]
        }))
        .unwrap();

        let vdu = &vnfd.vdu[0];
        assert_eq!(vdu.int_cpd.len(), 2);
        assert_eq!(vdu.int_cpd[0].id, "eth0-int");
        let requirement = &vdu.int_cpd[0].virtual_network_interface_requirement[0];
        assert_eq!(requirement.position, Some(1));
        assert_eq!(requirement.virtual_interface, Some(json!({"type": "VIRTIO"})));

        assert_eq!(
            vnfd.ext_cpd,
            vec![ExtCpd {
                id: "eth0-ext".to_string(),
                int_cpd: Some(IntCpdRef {
                    vdu_id: "vdu".to_string(),
                    cpd: "eth0-int".to_string()
                }),
                port_security_enabled: Some(json!(false)),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn test_flavor_references_follow_convention() {
        let vnfd = run(json!({
            "id": "v",
            "vdu": [
                {"id": "a", "image": "img", "vm-flavor": {"vcpu-count": 1, "storage-gb": 1}},
                {"id": "b", "vm-flavor": {"vcpu-count": 0}}
            ]
        }))
        .unwrap();
        assert_eq!(vnfd.vdu[0].virtual_compute_desc.as_deref(), Some("a-compute"));
        assert_eq!(vnfd.vdu[0].virtual_storage_desc, vec!["a-storage".to_string()]);
        assert_eq!(vnfd.vdu[0].sw_image_desc.as_deref(), Some("img"));
        assert_eq!(vnfd.vdu[1].virtual_compute_desc, None);
        assert!(vnfd.vdu[1].virtual_storage_desc.is_empty());
    }

    #[test]
    fn test_profile_without_scaling_has_no_max() {
        let vnfd = run(json!({"id": "v", "vdu": [{"id": "vdu", "count": 2}]})).unwrap();
        let df = &vnfd.df[0];
        assert_eq!(df.vdu_profile[0].min_number_of_instances, 2);
        assert_eq!(df.vdu_profile[0].max_number_of_instances, None);
        assert_eq!(df.instantiation_level[0].id, "default-instantiation-level");
        assert_eq!(df.instantiation_level[0].vdu_level[0].number_of_instances, 2);
    }

    #[test]
    fn test_profile_sums_scaling_groups() {
        let vnfd = run(json!({
            "id": "v",
            "vdu": [{"id": "vdu", "count": 1}],
            "scaling-group-descriptor": [
                {"name": "g1", "min-instance-count": 2, "max-instance-count": 5, "vdu": [{"vdu-id-ref": "vdu"}]},
                {"name": "g2", "vdu": [{"vdu-id-ref": "vdu"}, {"vdu-id-ref": "vdu"}]}
            ]
        }))
        .unwrap();
        let profile = &vnfd.df[0].vdu_profile[0];
        assert_eq!(profile.min_number_of_instances, 3);
        assert_eq!(profile.max_number_of_instances, Some(7));
    }

    #[test]
    fn test_instance_bounds_overflow_is_rejected() {
        let result = run(json!({
            "id": "v",
            "vdu": [{"id": "vdu", "count": "18446744073709551615"}],
            "scaling-group-descriptor": [{"name": "g", "vdu": [{"vdu-id-ref": "vdu"}]}]
        }));
        match result {
            Err(Error::MalformedDescriptor { message, .. }) => {
                assert!(message.contains("vdu 'vdu'"), "{}", message)
            }
            other => panic!("expected MalformedDescriptor, got {:?}", other),
        }

        let result = run(json!({
            "id": "v",
            "vdu": [{"id": "vdu", "count": 1}],
            "scaling-group-descriptor": [
                {"name": "g", "min-instance-count": u64::MAX, "vdu": [{"vdu-id-ref": "vdu"}]}
            ]
        }));
        assert!(matches!(result, Err(Error::MalformedDescriptor { .. })));
    }

    #[test]
    fn test_largest_count_without_scaling_is_kept() {
        let vnfd = run(json!({"id": "v", "vdu": [{"id": "vdu", "count": u64::MAX}]})).unwrap();
        assert_eq!(vnfd.df[0].vdu_profile[0].min_number_of_instances, u64::MAX);
    }

    #[test]
    fn test_vdu_configuration_gets_id() {
        let vnfd = run(json!({
            "id": "v",
            "vdu": [{"id": "vdu", "vdu-configuration": {"juju": {"charm": "simple"}}}]
        }))
        .unwrap();
        assert_eq!(
            vnfd.vdu_configuration,
            vec![json!({"juju": {"charm": "simple"}, "id": "vdu-vdu-configuration"})]
        );
        assert_eq!(
            vnfd.df[0].vdu_profile[0].vdu_configuration_id.as_deref(),
            Some("vdu-vdu-configuration")
        );
    }

    #[test]
    fn test_non_mapping_vdu_configuration_rejected() {
        let result = run(json!({"id": "v", "vdu": [{"id": "vdu", "vdu-configuration": "x"}]}));
        assert!(matches!(result, Err(Error::MalformedDescriptor { .. })));
    }
}

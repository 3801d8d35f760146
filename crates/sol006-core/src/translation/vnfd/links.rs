//! Internal virtual links and their IP profiles

use super::builder::{int_cpd_id, VnfdBuilder};
use crate::error::{Error, ReferenceKind, Result};
use crate::im::de::{non_empty, present};
use crate::im::{ImIpProfile, ImVnfd};
use crate::sol006::{IntVirtualLinkDesc, L3ProtocolData, VirtualLinkProfile, VirtualLinkProtocolData};
use std::collections::HashMap;

/// Emit int-virtual-link-desc entries and point the referenced int-cpds at them
pub(super) fn add_internal_vlds(im: &ImVnfd, builder: &mut VnfdBuilder) -> Result<()> {
    // internal-connection-point-ref -> (vdu id, interface name), later interfaces win
    let mut interfaces: HashMap<&str, (&str, &str)> = HashMap::new();
    for vdu in &im.vdu {
        for interface in &vdu.interface {
            if let Some(cp_ref) = non_empty(&interface.internal_connection_point_ref) {
                interfaces.insert(cp_ref, (vdu.id.as_str(), interface.name.as_str()));
            }
        }
    }

    for vld in &im.internal_vld {
        builder
            .vnfd_mut()
            .int_virtual_link_desc
            .push(IntVirtualLinkDesc { id: vld.id.clone() });

        for cp in &vld.internal_connection_point {
            let unresolved =
                || Error::unresolved(ReferenceKind::InternalConnectionPoint, &cp.id_ref, &vld.id);
            let (vdu_id, interface_name) =
                interfaces.get(cp.id_ref.as_str()).copied().ok_or_else(unresolved)?;

            let cpd_id = int_cpd_id(interface_name);
            let cpd = builder
                .vdu_mut(vdu_id)
                .and_then(|vdu| vdu.int_cpd.iter_mut().find(|cpd| cpd.id == cpd_id))
                .ok_or_else(unresolved)?;
            tracing::trace!(vld = %vld.id, vdu = vdu_id, cpd = %cpd_id, "linked int-cpd");
            cpd.int_virtual_link_desc = Some(vld.id.clone());
        }
    }
    Ok(())
}

/// Attach each IP profile to the default flavour as a virtual-link-profile
///
/// A profile shared by several internal-vlds is owned by the last one listed.
pub(super) fn add_ip_profiles(im: &ImVnfd, builder: &mut VnfdBuilder) -> Result<()> {
    let owners: HashMap<&str, &str> = im
        .internal_vld
        .iter()
        .filter_map(|vld| Some((non_empty(&vld.ip_profile_ref)?, vld.id.as_str())))
        .collect();

    for profile in &im.ip_profiles {
        let vld_id = owners.get(profile.name.as_str()).copied().ok_or_else(|| {
            Error::unresolved(ReferenceKind::IpProfile, &profile.name, "internal-vld")
        })?;
        tracing::trace!(profile = %profile.name, vld = vld_id, "resolved ip-profile-ref");

        let link_profile = VirtualLinkProfile {
            id: vld_id.to_string(),
            flavour: String::new(),
            virtual_link_protocol_data: l3_protocol_data(profile, vld_id)
                .map(|l3_protocol_data| VirtualLinkProtocolData { l3_protocol_data }),
        };
        builder.default_df().virtual_link_profile.push(link_profile);
    }
    Ok(())
}

fn l3_protocol_data(profile: &ImIpProfile, vld_id: &str) -> Option<L3ProtocolData> {
    let params = profile
        .ip_profile_params
        .as_ref()
        .filter(|params| !params.is_empty())?;
    Some(L3ProtocolData {
        name: format!("{}-l3-protocol-data", vld_id),
        ip_version: present(&params.ip_version).cloned(),
        cidr: present(&params.subnet_address).cloned(),
        gateway_ip: present(&params.gateway_address).cloned(),
        security_group: present(&params.security_group).cloned(),
        dhcp_enabled: params
            .dhcp_params
            .as_ref()
            .and_then(|dhcp| present(&dhcp.enabled))
            .cloned(),
        description: non_empty(&profile.description).map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::super::vdus::add_vdus;
    use super::*;
    use serde_json::json;

    fn run(value: serde_json::Value) -> Result<crate::sol006::Vnfd> {
        let im: ImVnfd = serde_json::from_value(value).unwrap();
        let mut builder = VnfdBuilder::new(im.id.clone());
        add_vdus(&im, &mut builder)?;
        add_internal_vlds(&im, &mut builder)?;
        add_ip_profiles(&im, &mut builder)?;
        Ok(builder.finish())
    }

    fn linked_vnfd() -> serde_json::Value {
        json!({
            "id": "v",
            "vdu": [
                {"id": "mgmtVM", "interface": [{"name": "eth1", "internal-connection-point-ref": "mgmtVM-internal"}]},
                {"id": "dataVM", "interface": [{"name": "eth0", "internal-connection-point-ref": "dataVM-internal"}]}
            ],
            "internal-vld": [{
                "id": "internal",
                "ip-profile-ref": "internal",
                "internal-connection-point": [{"id-ref": "mgmtVM-internal"}, {"id-ref": "dataVM-internal"}]
            }],
            "ip-profiles": [{
                "name": "internal",
                "description": "Internal network",
                "ip-profile-params": {
                    "ip-version": "ipv4",
                    "subnet-address": "192.168.1.0/24",
                    "gateway-address": "0.0.0.0",
                    "dhcp-params": {"enabled": true, "start-address": "192.168.1.2"}
                }
            }]
        })
    }

    #[test]
    fn test_internal_vld_links_int_cpds() {
        let vnfd = run(linked_vnfd()).unwrap();
        assert_eq!(vnfd.int_virtual_link_desc, vec![IntVirtualLinkDesc { id: "internal".into() }]);
        for vdu in &vnfd.vdu {
            assert_eq!(vdu.int_cpd[0].int_virtual_link_desc.as_deref(), Some("internal"));
        }
    }

    #[test]
    fn test_ip_profile_becomes_link_profile() {
        let vnfd = run(linked_vnfd()).unwrap();
        let profile = &vnfd.df[0].virtual_link_profile[0];
        assert_eq!(profile.id, "internal");
        assert_eq!(profile.flavour, "");
        let l3 = &profile.virtual_link_protocol_data.as_ref().unwrap().l3_protocol_data;
        assert_eq!(l3.name, "internal-l3-protocol-data");
        assert_eq!(l3.cidr, Some(json!("192.168.1.0/24")));
        assert_eq!(l3.gateway_ip, Some(json!("0.0.0.0")));
        assert_eq!(l3.dhcp_enabled, Some(json!(true)));
        assert_eq!(l3.description.as_deref(), Some("Internal network"));
    }

    #[test]
    fn test_unresolved_internal_connection_point() {
        let mut doc = linked_vnfd();
        doc["internal-vld"][0]["internal-connection-point"][0]["id-ref"] = json!("missing");
        match run(doc) {
            Err(Error::UnresolvedReference { kind, reference, target }) => {
                assert_eq!(kind, ReferenceKind::InternalConnectionPoint);
                assert_eq!(reference, "missing");
                assert_eq!(target, "internal");
            }
            other => panic!("expected UnresolvedReference, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_ip_profile() {
        let mut doc = linked_vnfd();
        doc["ip-profiles"][0]["name"] = json!("orphan");
        assert!(matches!(
            run(doc),
            Err(Error::UnresolvedReference { kind: ReferenceKind::IpProfile, .. })
        ));
    }

    #[test]
    fn test_shared_ip_profile_belongs_to_last_vld() {
        let mut doc = linked_vnfd();
        doc["internal-vld"] = json!([
            {"id": "first", "ip-profile-ref": "internal"},
            {"id": "second", "ip-profile-ref": "internal"}
        ]);
        let vnfd = run(doc).unwrap();

        let profiles = &vnfd.df[0].virtual_link_profile;
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].id, "second");
        let l3 = &profiles[0].virtual_link_protocol_data.as_ref().unwrap().l3_protocol_data;
        assert_eq!(l3.name, "second-l3-protocol-data");
    }

    #[test]
    fn test_repeated_internal_cp_ref_links_last_interface() {
        let mut doc = linked_vnfd();
        doc["vdu"][1]["interface"][0]["internal-connection-point-ref"] = json!("mgmtVM-internal");
        doc["internal-vld"][0]["internal-connection-point"] = json!([{"id-ref": "mgmtVM-internal"}]);
        let vnfd = run(doc).unwrap();

        assert_eq!(vnfd.vdu[0].int_cpd[0].int_virtual_link_desc, None);
        assert_eq!(vnfd.vdu[1].int_cpd[0].int_virtual_link_desc.as_deref(), Some("internal"));
    }

    #[test]
    fn test_empty_ip_profile_params() {
        let mut doc = linked_vnfd();
        doc["ip-profiles"][0]["ip-profile-params"] = json!({});
        let vnfd = run(doc).unwrap();
        assert_eq!(vnfd.df[0].virtual_link_profile[0].virtual_link_protocol_data, None);
    }
}

//! NSD translation pipeline
//!
//! The interesting part is the connectivity fold: every (vld, connection
//! point ref) pair becomes a row, rows are grouped by member-vnf-index into
//! vnf-profiles, and rows of one profile that land on the same vld are
//! merged into a single virtual-link-connectivity entry.

use crate::error::Result;
use crate::im::de::{non_empty, present};
use crate::im::{ImNsd, ImVld, ImVnfdConnectionPointRef};
use crate::index::{dedup_ordered, group_ordered};
use crate::sol006::{
    ConstituentCpdId, NsDeploymentFlavour, Nsd, VirtualLinkConnectivity, VirtualLinkDesc,
    VnfProfile,
};

const DEFAULT_DF_ID: &str = "default-df";

type Stage = fn(&ImNsd, &mut Nsd) -> Result<()>;

const STAGES: [(&str, Stage); 3] = [
    ("basic-data", add_basic_data),
    ("constituent-vnfds", add_constituent_vnfds),
    ("vlds", add_vlds),
];

/// Run every stage over an unwrapped IM NSD; validation is the caller's job
pub(crate) fn translate_im_nsd(im: &ImNsd) -> Result<Nsd> {
    let mut nsd = Nsd::default();
    for (name, stage) in STAGES {
        tracing::debug!(stage = name, nsd = %im.id, "running NSD stage");
        stage(im, &mut nsd)?;
    }
    Ok(nsd)
}

fn add_basic_data(im: &ImNsd, nsd: &mut Nsd) -> Result<()> {
    nsd.id = im.id.clone();
    nsd.name = non_empty(&im.name).map(str::to_string);
    nsd.description = non_empty(&im.description).map(str::to_string);
    nsd.designer = non_empty(&im.vendor).map(str::to_string);
    nsd.version = present(&im.version).cloned();
    Ok(())
}

fn add_constituent_vnfds(im: &ImNsd, nsd: &mut Nsd) -> Result<()> {
    let ids = im
        .constituent_vnfd
        .iter()
        .filter_map(|constituent| non_empty(&constituent.vnfd_id_ref))
        .map(str::to_string);
    nsd.vnfd_id = dedup_ordered(ids, String::clone);
    Ok(())
}

/// One (vld, connection point ref) pair
struct LinkRow<'a> {
    vld: &'a ImVld,
    cp_ref: &'a ImVnfdConnectionPointRef,
}

fn add_vlds(im: &ImNsd, nsd: &mut Nsd) -> Result<()> {
    let rows = im.vld.iter().flat_map(|vld| {
        vld.vnfd_connection_point_ref
            .iter()
            .map(move |cp_ref| LinkRow { vld, cp_ref })
    });

    let vnf_profile = group_ordered(rows, |row| row.cp_ref.member_vnf_index().to_string())
        .into_iter()
        .map(|(member_vnf_index, rows)| vnf_profile(member_vnf_index, &rows))
        .collect();
    nsd.df = vec![NsDeploymentFlavour {
        id: DEFAULT_DF_ID.to_string(),
        vnf_profile,
    }];

    nsd.virtual_link_desc = im
        .vld
        .iter()
        .map(|vld| VirtualLinkDesc {
            id: vld.id.clone(),
            mgmt_network: present(&vld.mgmt_network).cloned(),
            vim_network_name: present(&vld.vim_network_name).cloned(),
        })
        .collect();
    Ok(())
}

fn vnf_profile(member_vnf_index: String, rows: &[LinkRow<'_>]) -> VnfProfile {
    let vnfd_id = rows
        .first()
        .and_then(|row| row.cp_ref.vnfd_id_ref.clone());

    let connectivity = group_ordered(rows, |row| row.vld.id.clone())
        .into_iter()
        .map(|(vld_id, rows)| {
            tracing::trace!(member = %member_vnf_index, vld = %vld_id, rows = rows.len(), "merged link rows");
            VirtualLinkConnectivity {
                virtual_link_profile_id: vld_id,
                constituent_cpd_id: rows
                    .iter()
                    .map(|row| constituent_cpd(&member_vnf_index, row.cp_ref))
                    .collect(),
            }
        })
        .collect();

    VnfProfile {
        id: member_vnf_index,
        vnfd_id,
        virtual_link_connectivity: connectivity,
    }
}

fn constituent_cpd(member_vnf_index: &str, cp_ref: &ImVnfdConnectionPointRef) -> ConstituentCpdId {
    let cp = cp_ref.vnfd_connection_point_ref.as_deref().unwrap_or_default();
    ConstituentCpdId {
        constituent_base_element_id: member_vnf_index.to_string(),
        constituent_cpd_id: format!("{}-ext", cp),
        ip_address: present(&cp_ref.ip_address).cloned(),
    }
}

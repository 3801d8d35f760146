//! KDUs and the Kubernetes cluster block

use super::builder::{ext_cpd_id, VnfdBuilder};
use crate::error::Result;
use crate::im::de::{non_empty, present};
use crate::im::ImVnfd;
use crate::sol006::{ExtCpd, K8sCluster, K8sClusterNet};

pub(super) fn add_kdus(im: &ImVnfd, builder: &mut VnfdBuilder) -> Result<()> {
    if let Some(kdu) = present(&im.kdu) {
        builder.vnfd_mut().kdu = Some(kdu.clone());
        builder.default_df();
    }
    Ok(())
}

pub(super) fn add_k8s_cluster(im: &ImVnfd, builder: &mut VnfdBuilder) -> Result<()> {
    let Some(cluster) = im.k8s_cluster.as_ref().filter(|cluster| !cluster.is_empty()) else {
        return Ok(());
    };

    let vnfd = builder.vnfd_mut();
    for net in &cluster.nets {
        if let Some(cp_ref) = non_empty(&net.external_connection_point_ref) {
            vnfd.ext_cpd.push(ExtCpd {
                id: ext_cpd_id(cp_ref),
                k8s_cluster_net: Some(net.id.clone()),
                ..Default::default()
            });
        }
    }
    vnfd.k8s_cluster = Some(K8sCluster {
        version: present(&cluster.version).cloned(),
        cni: present(&cluster.cni).cloned(),
        nets: cluster
            .nets
            .iter()
            .map(|net| K8sClusterNet { id: net.id.clone() })
            .collect(),
    });
    Ok(())
}

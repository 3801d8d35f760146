//! Compute and storage descriptors from VDU flavors and guest EPA

use super::builder::{compute_desc_id, storage_desc_id, VnfdBuilder};
use crate::error::Result;
use crate::im::de::{non_empty, present};
use crate::im::{ImGuestEpa, ImVnfd};
use crate::sol006::{
    CpuPinning, PinningPolicy, VirtualComputeDesc, VirtualCpu, VirtualMemory, VirtualStorageDesc,
};

const MIB_PER_GIB: f64 = 1024.0;

pub(super) fn add_flavors(im: &ImVnfd, builder: &mut VnfdBuilder) -> Result<()> {
    for vdu in &im.vdu {
        let Some(flavor) = vdu.vm_flavor.as_ref() else {
            continue;
        };

        if let Some(storage_gb) = flavor.storage_gb() {
            builder.push_storage_desc(VirtualStorageDesc {
                id: storage_desc_id(&vdu.id),
                size_of_storage: Some(storage_gb),
                disk_io_quota: None,
            });
        }

        if flavor.has_compute() {
            builder.push_compute_desc(VirtualComputeDesc {
                id: compute_desc_id(&vdu.id),
                virtual_cpu: VirtualCpu {
                    num_virtual_cpu: flavor.vcpu_count(),
                    ..Default::default()
                },
                virtual_memory: VirtualMemory {
                    size: flavor.memory_mb().map(|mb| mb / MIB_PER_GIB),
                    ..Default::default()
                },
            });
        }
    }
    Ok(())
}

pub(super) fn add_guest_epa(im: &ImVnfd, builder: &mut VnfdBuilder) -> Result<()> {
    for vdu in &im.vdu {
        let Some(epa) = vdu.guest_epa.as_ref() else {
            continue;
        };

        let memory = epa_memory(epa);
        let cpu = epa_cpu(epa);
        if !memory.is_empty() || !cpu.is_empty() {
            let desc = builder.compute_desc_mut(&compute_desc_id(&vdu.id));
            merge_memory(&mut desc.virtual_memory, memory);
            merge_cpu(&mut desc.virtual_cpu, cpu);
        }

        if let Some(quota) = present(&epa.disk_io_quota) {
            builder.storage_desc_mut(&storage_desc_id(&vdu.id)).disk_io_quota = Some(quota.clone());
        }
    }
    Ok(())
}

fn epa_memory(epa: &ImGuestEpa) -> VirtualMemory {
    let numa_node_policy = present(&epa.numa_node_policy).cloned();
    VirtualMemory {
        size: None,
        mempage_size: present(&epa.mempage_size).cloned(),
        numa_enabled: numa_node_policy.as_ref().map(|_| true),
        numa_node_policy,
        mem_quota: present(&epa.mem_quota).cloned(),
    }
}

fn epa_cpu(epa: &ImGuestEpa) -> VirtualCpu {
    let policy = non_empty(&epa.cpu_pinning_policy).map(PinningPolicy::from_im);
    let thread_policy = present(&epa.cpu_thread_pinning_policy).cloned();
    let pinning = (policy.is_some() || thread_policy.is_some()).then_some(CpuPinning {
        policy,
        thread_policy,
    });
    VirtualCpu {
        num_virtual_cpu: None,
        pinning,
        cpu_quota: present(&epa.cpu_quota).cloned(),
    }
}

// EPA leaves overwrite only the keys they set; flavor-derived size and
// vCPU count survive.
fn merge_memory(target: &mut VirtualMemory, epa: VirtualMemory) {
    if epa.mempage_size.is_some() {
        target.mempage_size = epa.mempage_size;
    }
    if epa.numa_enabled.is_some() {
        target.numa_enabled = epa.numa_enabled;
    }
    if epa.numa_node_policy.is_some() {
        target.numa_node_policy = epa.numa_node_policy;
    }
    if epa.mem_quota.is_some() {
        target.mem_quota = epa.mem_quota;
    }
}

fn merge_cpu(target: &mut VirtualCpu, epa: VirtualCpu) {
    if epa.pinning.is_some() {
        target.pinning = epa.pinning;
    }
    if epa.cpu_quota.is_some() {
        target.cpu_quota = epa.cpu_quota;
    }
}

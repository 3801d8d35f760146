//! Scaling groups as scaling aspects of the default flavour

use super::builder::VnfdBuilder;
use crate::error::Result;
use crate::im::de::{non_empty, non_zero, present};
use crate::im::{ImScalingGroupDescriptor, ImVnfd};
use crate::sol006::{AspectDeltaDetails, ScalingAspect, ScalingDelta, VduDelta};

pub(super) fn add_scaling_aspects(im: &ImVnfd, builder: &mut VnfdBuilder) -> Result<()> {
    for group in &im.scaling_group_descriptor {
        builder.default_df().scaling_aspect.push(scaling_aspect(group));
    }
    Ok(())
}

fn scaling_aspect(group: &ImScalingGroupDescriptor) -> ScalingAspect {
    let vdu_delta = group
        .vdu
        .iter()
        .map(|member| VduDelta {
            id: non_empty(&member.vdu_id_ref).map(str::to_string),
            number_of_instances: non_zero(member.count),
        })
        .collect();

    ScalingAspect {
        id: group.name.clone(),
        name: group.name.clone(),
        max_scale_level: non_zero(group.max_instance_count),
        scaling_policy: present(&group.scaling_policy).cloned(),
        scaling_config_action: present(&group.scaling_config_action).cloned(),
        aspect_delta_details: AspectDeltaDetails {
            deltas: vec![ScalingDelta {
                id: format!("{}-delta", group.name),
                vdu_delta,
            }],
        },
    }
}

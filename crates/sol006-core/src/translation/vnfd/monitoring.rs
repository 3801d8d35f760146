//! VNF monitoring parameters, resolved to VDU-local NFVI metrics

use super::builder::VnfdBuilder;
use crate::error::{Error, ReferenceKind, Result};
use crate::im::de::{non_empty, present};
use crate::im::ImVnfd;
use crate::sol006::MonitoringParameter;
use serde_json::Value;
use std::collections::HashMap;

pub(super) fn add_monitoring_params(im: &ImVnfd, builder: &mut VnfdBuilder) -> Result<()> {
    let mut metrics: HashMap<(&str, &str), &Value> = HashMap::new();
    for vdu in &im.vdu {
        for param in &vdu.monitoring_param {
            if let Some(metric) = present(&param.nfvi_metric) {
                metrics.insert((vdu.id.as_str(), param.id.as_str()), metric);
            }
        }
    }

    for param in &im.monitoring_param {
        let Some(vdu_ref) = param
            .vdu_monitoring_param
            .as_ref()
            .and_then(|reference| non_empty(&reference.vdu_ref))
        else {
            tracing::warn!(param = %param.id, "monitoring-param has no vdu-ref, skipping");
            continue;
        };
        let local_ref = param
            .vdu_monitoring_param
            .as_ref()
            .and_then(|reference| non_empty(&reference.vdu_monitoring_param_ref))
            .unwrap_or_default();

        let entry = MonitoringParameter {
            id: param.id.clone(),
            name: non_empty(&param.name).map(str::to_string),
            performance_metric: metrics.get(&(vdu_ref, local_ref)).map(|m| (*m).clone()),
        };
        tracing::trace!(param = %param.id, vdu = vdu_ref, "resolved monitoring vdu-ref");

        let vdu = builder
            .vdu_mut(vdu_ref)
            .ok_or_else(|| Error::unresolved(ReferenceKind::Vdu, vdu_ref, &param.id))?;
        vdu.monitoring_parameter.push(entry);
    }
    Ok(())
}

//! Structural validation of OSM IM VNF and network service descriptors
//!
//! Rules are layered by [`ValidationMode`]:
//!
//! - **Basic**: catalog envelope shape and required keys
//! - **Partial**: leaf types and uniqueness of list keys
//! - **Strict**: enumerations and name-based cross references
//!
//! Every error is collected with its `$.`-rooted path; the first one in
//! document order is what [`SchemaValidator::validate`] reports.
//!
//! Copyright (c) 2025 SOL006 Translator Team
//! Licensed under the Apache-2.0 license

use crate::validation::base::{SchemaValidator, ValidationContext, ValidationHelpers, ValidationMode};
use crate::validation::error::{ValidationError, ValidationErrors, ValidationResult};
use serde_json::Value;
use sol006_core::{descriptor_kind, DescriptorKind, DescriptorValidator};
use std::collections::HashSet;

const CPU_PINNING_POLICIES: &[&str] = &["DEDICATED", "SHARED", "ANY"];
const CPU_THREAD_PINNING_POLICIES: &[&str] = &["AVOID", "SEPARATE", "ISOLATE", "PREFER"];
const MEMPAGE_SIZES: &[&str] = &["LARGE", "SMALL", "SIZE_2MB", "SIZE_1GB", "PREFER_LARGE"];

/// Validator for IM descriptor documents
///
/// Plugs into the translator as its [`DescriptorValidator`], applying the
/// rules of the configured mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImDescriptorValidator {
    mode: ValidationMode,
}

impl ImDescriptorValidator {
    /// Strict validator
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ValidationMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Collect every error using the configured mode
    pub fn collect(&self, document: &Value) -> ValidationErrors {
        self.collect_with_context(document, &ValidationContext::new(self.mode))
    }
}

impl SchemaValidator for ImDescriptorValidator {
    type Input = Value;

    fn collect_with_context(&self, document: &Value, context: &ValidationContext) -> ValidationErrors {
        let mut checker = Checker::default();
        checker.envelope(document, context);
        tracing::debug!(
            mode = %context.mode,
            errors = checker.errors.len(),
            "validated IM document"
        );
        checker.errors
    }
}

impl DescriptorValidator for ImDescriptorValidator {
    fn validate(&self, kind: DescriptorKind, document: &Value) -> anyhow::Result<()> {
        let errors = self.collect(document);
        match errors.into_iter().next() {
            None => Ok(()),
            Some(first) => {
                tracing::debug!(%kind, path = %first.path, "IM document rejected");
                Err(first.into())
            }
        }
    }
}

/// Accumulates errors while walking one document
#[derive(Default)]
struct Checker {
    errors: ValidationErrors,
}

impl Checker {
    fn push(&mut self, result: ValidationResult<()>) {
        if let Err(error) = result {
            self.errors.add(error);
        }
    }

    fn required(&mut self, parent: &Value, field: &str, context: &ValidationContext) {
        self.push(ValidationHelpers::validate_required(parent, field, context));
    }

    fn string(&mut self, parent: &Value, field: &str, context: &ValidationContext) {
        if let Some(value) = self.partial_leaf(parent, field, context) {
            self.push(ValidationHelpers::validate_string(value, &context.child(field)));
        }
    }

    fn strings(&mut self, parent: &Value, fields: &[&str], context: &ValidationContext) {
        for field in fields {
            self.string(parent, field, context);
        }
    }

    fn integer(&mut self, parent: &Value, field: &str, context: &ValidationContext) {
        if let Some(value) = self.partial_leaf(parent, field, context) {
            self.push(ValidationHelpers::validate_integer(value, &context.child(field)));
        }
    }

    fn number(&mut self, parent: &Value, field: &str, context: &ValidationContext) {
        if let Some(value) = self.partial_leaf(parent, field, context) {
            self.push(ValidationHelpers::validate_number(value, &context.child(field)));
        }
    }

    fn partial_leaf<'a>(&self, parent: &'a Value, field: &str, context: &ValidationContext) -> Option<&'a Value> {
        if context.runs(ValidationMode::Partial) {
            parent.get(field)
        } else {
            None
        }
    }

    /// Items of a list leaf; a non-list is reported in Partial and read as empty
    fn list<'a>(&mut self, parent: &'a Value, field: &str, context: &ValidationContext) -> &'a [Value] {
        match parent.get(field) {
            Some(Value::Array(items)) => items,
            Some(value) => {
                if context.runs(ValidationMode::Partial) {
                    self.push(ValidationHelpers::validate_list(value, &context.child(field)));
                }
                &[]
            }
            None => &[],
        }
    }

    /// A mapping leaf; a non-mapping is reported in Partial and read as absent
    fn mapping<'a>(&mut self, parent: &'a Value, field: &str, context: &ValidationContext) -> Option<&'a Value> {
        match parent.get(field) {
            Some(value @ Value::Object(_)) => Some(value),
            Some(value) => {
                if context.runs(ValidationMode::Partial) {
                    self.push(ValidationHelpers::validate_mapping(value, &context.child(field)));
                }
                None
            }
            None => None,
        }
    }

    fn unique(&mut self, items: &[Value], key: &str, context: &ValidationContext) {
        if context.runs(ValidationMode::Partial) {
            for error in ValidationHelpers::validate_unique_keys(items, key, context) {
                self.errors.add(error);
            }
        }
    }

    fn enumeration(&mut self, parent: &Value, field: &str, allowed: &[&str], context: &ValidationContext) {
        if !context.runs(ValidationMode::Strict) {
            return;
        }
        if let Some(value) = parent.get(field).and_then(Value::as_str) {
            self.push(ValidationHelpers::validate_enum_value(
                value,
                allowed,
                field,
                &context.child(field),
            ));
        }
    }

    fn reference(
        &mut self,
        parent: &Value,
        field: &str,
        known: &HashSet<String>,
        target: &str,
        context: &ValidationContext,
    ) {
        if !context.runs(ValidationMode::Strict) {
            return;
        }
        if let Some(reference) = parent.get(field).and_then(ValidationHelpers::key_of) {
            self.push(ValidationHelpers::validate_reference(
                &reference,
                known,
                target,
                &context.child(field),
            ));
        }
    }

    fn envelope(&mut self, document: &Value, context: &ValidationContext) {
        let Some(map) = document.as_object() else {
            self.push(Err(ValidationError::with_violation(
                &context.path,
                "Document root must be a mapping",
                ValidationError::create_violation("envelope", "a mapping with one catalog key", "not a mapping"),
            )));
            return;
        };
        if map.len() != 1 {
            self.push(Err(ValidationError::with_violation(
                &context.path,
                "Document root must have exactly one key",
                ValidationError::create_violation(
                    "envelope",
                    "exactly one catalog key",
                    format!("{} keys", map.len()),
                ),
            )));
            return;
        }
        let kind = match descriptor_kind(document) {
            Ok(kind) => kind,
            Err(error) => {
                self.push(Err(ValidationError::with_violation(
                    &context.path,
                    error.to_string(),
                    ValidationError::create_violation("descriptor_kind", "a VNFD or NSD catalog", "unknown root"),
                )));
                return;
            }
        };

        for (root, catalog) in map {
            let catalog_context = context.child(root);
            if !catalog.is_object() {
                self.push(Err(ValidationError::with_violation(
                    &catalog_context.path,
                    "Catalog must be a mapping",
                    ValidationError::create_violation("envelope", "a mapping", "not a mapping"),
                )));
                continue;
            }
            self.descriptors(catalog, kind, &catalog_context);
        }
    }

    fn descriptors(&mut self, catalog: &Value, kind: DescriptorKind, context: &ValidationContext) {
        let field = kind.as_str();
        let list_context = context.child(field);
        let items = match catalog.get(field) {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => {
                self.push(Err(ValidationError::with_violation(
                    &list_context.path,
                    format!("Catalog must contain a non-empty {} list", field),
                    ValidationError::create_violation(
                        "envelope",
                        format!("a non-empty {} list", field),
                        "missing or empty",
                    ),
                )));
                return;
            }
        };

        for (i, descriptor) in items.iter().enumerate() {
            let item_context = list_context.child_index(i);
            if !descriptor.is_object() {
                self.push(Err(ValidationError::with_violation(
                    &item_context.path,
                    format!("Each {} must be a mapping", field),
                    ValidationError::create_violation("envelope", "a mapping", "not a mapping"),
                )));
                continue;
            }
            match kind {
                DescriptorKind::Vnfd => self.vnfd(descriptor, &item_context),
                DescriptorKind::Nsd => self.nsd(descriptor, &item_context),
            }
        }
    }

    fn vnfd(&mut self, vnfd: &Value, context: &ValidationContext) {
        self.required(vnfd, "id", context);
        self.strings(vnfd, &["id", "name", "description", "vendor"], context);

        let connection_points = self.list(vnfd, "connection-point", context);
        let cp_context = context.child("connection-point");
        for (i, cp) in connection_points.iter().enumerate() {
            self.string(cp, "name", &cp_context.child_index(i));
        }
        self.unique(connection_points, "name", &cp_context);
        let cp_names = keys(connection_points, "name");

        if let Some(mgmt) = self.mapping(vnfd, "mgmt-interface", context) {
            let mgmt_context = context.child("mgmt-interface");
            self.required(mgmt, "cp", &mgmt_context);
            self.string(mgmt, "cp", &mgmt_context);
            self.reference(mgmt, "cp", &cp_names, "connection-point", &mgmt_context);
        }

        let vdus = self.list(vnfd, "vdu", context);
        let vdu_context = context.child("vdu");
        self.unique(vdus, "id", &vdu_context);
        let vdu_ids = keys(vdus, "id");
        let mut internal_cps = HashSet::new();
        for (i, vdu) in vdus.iter().enumerate() {
            internal_cps.extend(self.vdu(vdu, &cp_names, &vdu_context.child_index(i)));
        }

        let vlds = self.list(vnfd, "internal-vld", context);
        let vld_context = context.child("internal-vld");
        self.unique(vlds, "id", &vld_context);
        let profile_names = keys(self.list_quiet(vnfd, "ip-profiles"), "name");
        for (i, vld) in vlds.iter().enumerate() {
            let ctx = vld_context.child_index(i);
            self.required(vld, "id", &ctx);
            self.strings(vld, &["id", "ip-profile-ref"], &ctx);
            self.reference(vld, "ip-profile-ref", &profile_names, "ip-profile", &ctx);

            let icp_context = ctx.child("internal-connection-point");
            for (j, icp) in self.list(vld, "internal-connection-point", &ctx).iter().enumerate() {
                let icp_ctx = icp_context.child_index(j);
                self.required(icp, "id-ref", &icp_ctx);
                self.string(icp, "id-ref", &icp_ctx);
                self.reference(icp, "id-ref", &internal_cps, "internal connection point", &icp_ctx);
            }
        }

        let profiles_context = context.child("ip-profiles");
        for (i, profile) in self.list(vnfd, "ip-profiles", context).iter().enumerate() {
            let ctx = profiles_context.child_index(i);
            self.required(profile, "name", &ctx);
            self.strings(profile, &["name", "description"], &ctx);
            self.mapping(profile, "ip-profile-params", &ctx);
        }

        let monitoring_context = context.child("monitoring-param");
        for (i, param) in self.list(vnfd, "monitoring-param", context).iter().enumerate() {
            let ctx = monitoring_context.child_index(i);
            self.required(param, "id", &ctx);
            self.strings(param, &["id", "name"], &ctx);
            if let Some(vdu_param) = self.mapping(param, "vdu-monitoring-param", &ctx) {
                let ref_ctx = ctx.child("vdu-monitoring-param");
                self.strings(vdu_param, &["vdu-ref", "vdu-monitoring-param-ref"], &ref_ctx);
                self.reference(vdu_param, "vdu-ref", &vdu_ids, "vdu", &ref_ctx);
            }
        }

        let scaling_context = context.child("scaling-group-descriptor");
        for (i, group) in self.list(vnfd, "scaling-group-descriptor", context).iter().enumerate() {
            let ctx = scaling_context.child_index(i);
            self.required(group, "name", &ctx);
            self.string(group, "name", &ctx);
            self.integer(group, "min-instance-count", &ctx);
            self.integer(group, "max-instance-count", &ctx);

            let group_vdu_context = ctx.child("vdu");
            for (j, member) in self.list(group, "vdu", &ctx).iter().enumerate() {
                let member_ctx = group_vdu_context.child_index(j);
                self.string(member, "vdu-id-ref", &member_ctx);
                self.integer(member, "count", &member_ctx);
                self.reference(member, "vdu-id-ref", &vdu_ids, "vdu", &member_ctx);
            }
        }

        self.mapping(vnfd, "vnf-configuration", context);
        self.list(vnfd, "kdu", context);

        if let Some(cluster) = self.mapping(vnfd, "k8s-cluster", context) {
            let cluster_context = context.child("k8s-cluster");
            let nets_context = cluster_context.child("nets");
            for (i, net) in self.list(cluster, "nets", &cluster_context).iter().enumerate() {
                let ctx = nets_context.child_index(i);
                self.required(net, "id", &ctx);
                self.strings(net, &["id", "external-connection-point-ref"], &ctx);
                self.reference(net, "external-connection-point-ref", &cp_names, "connection-point", &ctx);
            }
        }
    }

    /// Checks one VDU and returns the internal connection point names it declares
    fn vdu(&mut self, vdu: &Value, cp_names: &HashSet<String>, context: &ValidationContext) -> HashSet<String> {
        self.required(vdu, "id", context);
        self.strings(vdu, &["id", "name", "description", "image", "cloud-init-file"], context);
        self.integer(vdu, "count", context);

        let alternatives_context = context.child("alternative-images");
        for (i, alt) in self.list(vdu, "alternative-images", context).iter().enumerate() {
            self.strings(alt, &["image", "vim-type"], &alternatives_context.child_index(i));
        }

        if let Some(flavor) = self.mapping(vdu, "vm-flavor", context) {
            let ctx = context.child("vm-flavor");
            self.integer(flavor, "vcpu-count", &ctx);
            self.number(flavor, "memory-mb", &ctx);
            self.integer(flavor, "storage-gb", &ctx);
        }

        if let Some(epa) = self.mapping(vdu, "guest-epa", context) {
            let ctx = context.child("guest-epa");
            self.enumeration(epa, "cpu-pinning-policy", CPU_PINNING_POLICIES, &ctx);
            self.enumeration(epa, "cpu-thread-pinning-policy", CPU_THREAD_PINNING_POLICIES, &ctx);
            self.enumeration(epa, "mempage-size", MEMPAGE_SIZES, &ctx);
        }

        let interfaces = self.list(vdu, "interface", context);
        let interface_context = context.child("interface");
        self.unique(interfaces, "name", &interface_context);
        let mut internal_cps = keys(self.list_quiet(vdu, "internal-connection-point"), "id");
        for (i, interface) in interfaces.iter().enumerate() {
            let ctx = interface_context.child_index(i);
            self.required(interface, "name", &ctx);
            self.strings(
                interface,
                &["name", "external-connection-point-ref", "internal-connection-point-ref"],
                &ctx,
            );
            self.integer(interface, "position", &ctx);
            self.reference(interface, "external-connection-point-ref", cp_names, "connection-point", &ctx);
            if let Some(internal) = interface
                .get("internal-connection-point-ref")
                .and_then(ValidationHelpers::key_of)
            {
                internal_cps.insert(internal);
            }
        }

        let monitoring_context = context.child("monitoring-param");
        for (i, param) in self.list(vdu, "monitoring-param", context).iter().enumerate() {
            self.string(param, "id", &monitoring_context.child_index(i));
        }
        self.mapping(vdu, "vdu-configuration", context);

        internal_cps
    }

    fn nsd(&mut self, nsd: &Value, context: &ValidationContext) {
        self.required(nsd, "id", context);
        self.strings(nsd, &["id", "name", "description", "vendor"], context);

        let constituents = self.list(nsd, "constituent-vnfd", context);
        let constituent_context = context.child("constituent-vnfd");
        for (i, constituent) in constituents.iter().enumerate() {
            self.strings(
                constituent,
                &["member-vnf-index", "vnfd-id-ref"],
                &constituent_context.child_index(i),
            );
        }
        let vnfd_ids = keys(constituents, "vnfd-id-ref");

        let vlds = self.list(nsd, "vld", context);
        let vld_context = context.child("vld");
        self.unique(vlds, "id", &vld_context);
        for (i, vld) in vlds.iter().enumerate() {
            let ctx = vld_context.child_index(i);
            self.required(vld, "id", &ctx);
            self.strings(vld, &["id", "name", "vim-network-name"], &ctx);

            let refs_context = ctx.child("vnfd-connection-point-ref");
            for (j, cp_ref) in self.list(vld, "vnfd-connection-point-ref", &ctx).iter().enumerate() {
                let ref_ctx = refs_context.child_index(j);
                self.strings(
                    cp_ref,
                    &["member-vnf-index-ref", "vnfd-id-ref", "vnfd-connection-point-ref"],
                    &ref_ctx,
                );
                self.reference(cp_ref, "vnfd-id-ref", &vnfd_ids, "constituent-vnfd", &ref_ctx);
            }
        }
    }

    /// Items of a list leaf without reporting type errors
    fn list_quiet<'a>(&self, parent: &'a Value, field: &str) -> &'a [Value] {
        parent
            .get(field)
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice)
    }
}

/// Key values of a list, for cross-reference lookups
fn keys(items: &[Value], key: &str) -> HashSet<String> {
    items
        .iter()
        .filter_map(|item| item.get(key).and_then(ValidationHelpers::key_of))
        .collect()
}

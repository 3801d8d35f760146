//! Property-based tests for the translation engine
//!
//! These tests verify invariants that should hold for every well-formed
//! descriptor, whatever its size or naming.


use proptest::prelude::*;
use serde_json::{json, Value};
use sol006_core::translate;
use std::collections::{HashMap, HashSet};
use test_support::{accept_all, nsd_catalog, vnfd_catalog};

/// Strategy for YANG-ish identifiers
fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,11}"
}

/// Strategy for VDUs drawing images from a small pool so duplicates are common
fn vdus_strategy() -> impl Strategy<Value = Vec<(String, String, Vec<String>)>> {
    let image = prop::sample::select(vec!["cirros", "ubuntu", "alpine", "centos"]).prop_map(String::from);
    prop::collection::vec(
        (identifier_strategy(), image.clone(), prop::collection::vec(image, 0..3)),
        1..8,
    )
    .prop_map(|vdus| {
        // VDU ids are unique within a descriptor
        let mut seen = HashSet::new();
        vdus.into_iter()
            .filter(|(id, _, _)| seen.insert(id.clone()))
            .collect()
    })
}

/// Strategy for NSD link rows: (vld id, member index, connection point)
fn link_rows_strategy() -> impl Strategy<Value = Vec<(String, u8, String)>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["mgmt", "data", "ctrl"]).prop_map(String::from),
            1u8..4,
            identifier_strategy(),
        ),
        1..12,
    )
}

fn vnfd_with_vdus(vdus: &[(String, String, Vec<String>)]) -> Value {
    let vdus: Vec<Value> = vdus
        .iter()
        .map(|(id, image, alternatives)| {
            json!({
                "id": id,
                "image": image,
                "alternative-images": alternatives.iter().map(|alt| json!({"image": alt})).collect::<Vec<_>>()
            })
        })
        .collect();
    vnfd_catalog(json!({"id": "prop_vnfd", "vdu": vdus}))
}

fn nsd_with_rows(rows: &[(String, u8, String)]) -> Value {
    let mut vld_order: Vec<&str> = Vec::new();
    let mut refs: HashMap<&str, Vec<Value>> = HashMap::new();
    for (vld, member, cp) in rows {
        if !refs.contains_key(vld.as_str()) {
            vld_order.push(vld);
        }
        refs.entry(vld).or_default().push(json!({
            "member-vnf-index-ref": member,
            "vnfd-id-ref": format!("vnfd{}", member),
            "vnfd-connection-point-ref": cp
        }));
    }
    let vlds: Vec<Value> = vld_order
        .iter()
        .map(|vld| json!({"id": vld, "vnfd-connection-point-ref": refs[vld]}))
        .collect();
    nsd_catalog(json!({"id": "prop_nsd", "vld": vlds}))
}

proptest! {
    #[test]
    fn prop_image_catalog_is_deduplicated(vdus in vdus_strategy()) {
        let translated = translate(&vnfd_with_vdus(&vdus), &accept_all).unwrap();
        let vnfd = &translated["vnfd"];

        let catalog: Vec<&str> = vnfd["sw-image-desc"]
            .as_array()
            .unwrap()
            .iter()
            .map(|desc| desc["id"].as_str().unwrap())
            .collect();
        let unique: HashSet<&str> = catalog.iter().copied().collect();
        prop_assert_eq!(unique.len(), catalog.len());

        let referenced: HashSet<&str> = vdus
            .iter()
            .flat_map(|(_, image, alts)| std::iter::once(image.as_str()).chain(alts.iter().map(String::as_str)))
            .collect();
        prop_assert_eq!(unique, referenced);

        // per-VDU image fields are not deduplicated
        for (i, (_, image, alts)) in vdus.iter().enumerate() {
            prop_assert_eq!(vnfd["vdu"][i]["sw-image-desc"].as_str(), Some(image.as_str()));
            let listed = vnfd["vdu"][i]["alternative-sw-image-desc"]
                .as_array()
                .map_or(0, Vec::len);
            prop_assert_eq!(listed, alts.len());
        }
    }

    #[test]
    fn prop_nsd_connectivity_is_merged(rows in link_rows_strategy()) {
        let translated = translate(&nsd_with_rows(&rows), &accept_all).unwrap();
        let profiles = translated["nsd"]["nsd"][0]["df"][0]["vnf-profile"].as_array().unwrap().clone();

        let members: HashSet<u8> = rows.iter().map(|(_, member, _)| *member).collect();
        prop_assert_eq!(profiles.len(), members.len());

        let mut total_cpds = 0;
        for profile in &profiles {
            let links = profile["virtual-link-connectivity"].as_array().unwrap();
            let link_ids: Vec<&str> = links
                .iter()
                .map(|link| link["virtual-link-profile-id"].as_str().unwrap())
                .collect();
            let unique: HashSet<&&str> = link_ids.iter().collect();
            prop_assert_eq!(unique.len(), link_ids.len(), "one connectivity entry per vld");

            for link in links {
                for cpd in link["constituent-cpd-id"].as_array().unwrap() {
                    prop_assert_eq!(&cpd["constituent-base-element-id"], &profile["id"]);
                    total_cpds += 1;
                }
            }
        }
        prop_assert_eq!(total_cpds, rows.len());
    }

    #[test]
    fn prop_translation_is_pure(vdus in vdus_strategy()) {
        let document = vnfd_with_vdus(&vdus);
        let snapshot = document.clone();

        let first = translate(&document, &accept_all).unwrap();
        let second = translate(&document, &accept_all).unwrap();

        prop_assert_eq!(&document, &snapshot);
        prop_assert_eq!(first, second);
    }
}

//! Integration tests for the translation engine


use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use sol006_core::{translate, DescriptorKind, Error, ReferenceKind, Sol006Document, Translator};
use test_support::{accept_all, nsd_catalog, vnfd_catalog};

fn translate_ok(document: &Value) -> Value {
    translate(document, &accept_all).expect("translation should succeed")
}

#[test]
fn test_minimal_vnfd_scenario() {
    let im = vnfd_catalog(json!({
        "id": "minimal",
        "mgmt-interface": {"cp": "eth0"},
        "connection-point": [{"name": "eth0"}],
        "vdu": [{
            "id": "vdu",
            "vm-flavor": {"vcpu-count": 1, "memory-mb": 256, "storage-gb": 2},
            "interface": [{"name": "eth0", "external-connection-point-ref": "eth0"}]
        }]
    }));

    let vnfd = &translate_ok(&im)["vnfd"];
    assert_eq!(
        vnfd["virtual-compute-desc"],
        json!([{"id": "vdu-compute", "virtual-cpu": {"num-virtual-cpu": 1}, "virtual-memory": {"size": 0.25}}])
    );
    assert_eq!(
        vnfd["virtual-storage-desc"],
        json!([{"id": "vdu-storage", "size-of-storage": 2}])
    );
    assert_eq!(vnfd["mgmt-cp"], json!("eth0-ext"));
    assert_eq!(
        vnfd["ext-cpd"],
        json!([{"id": "eth0-ext", "int-cpd": {"vdu-id": "vdu", "cpd": "eth0-int"}}])
    );
}

#[test]
fn test_scaling_scenario() {
    let im = vnfd_catalog(json!({
        "id": "scaled",
        "vdu": [{"id": "vdu", "count": 1}],
        "scaling-group-descriptor": [{
            "name": "scale",
            "min-instance-count": 2,
            "max-instance-count": 5,
            "vdu": [{"vdu-id-ref": "vdu", "count": 1}]
        }]
    }));

    let df = &translate_ok(&im)["vnfd"]["df"];
    assert_eq!(df.as_array().map(Vec::len), Some(1));
    assert_eq!(
        df[0]["vdu-profile"],
        json!([{"id": "vdu", "min-number-of-instances": 3, "max-number-of-instances": 6}])
    );
}

#[test]
fn test_nsd_basic_scenario() {
    let im = nsd_catalog(json!({
        "id": "ns",
        "constituent-vnfd": [{"member-vnf-index": 1, "vnfd-id-ref": "vnf"}],
        "vld": [{
            "id": "mgmt",
            "vnfd-connection-point-ref": [
                {"member-vnf-index-ref": 1, "vnfd-id-ref": "vnf", "vnfd-connection-point-ref": "eth0"},
                {"member-vnf-index-ref": 1, "vnfd-id-ref": "vnf", "vnfd-connection-point-ref": "eth1"}
            ]
        }]
    }));

    let nsd = &translate_ok(&im)["nsd"]["nsd"][0];
    assert_eq!(nsd["vnfd-id"], json!(["vnf"]));
    assert_eq!(
        nsd["df"],
        json!([{
            "id": "default-df",
            "vnf-profile": [{
                "id": "1",
                "vnfd-id": "vnf",
                "virtual-link-connectivity": [{
                    "virtual-link-profile-id": "mgmt",
                    "constituent-cpd-id": [
                        {"constituent-base-element-id": "1", "constituent-cpd-id": "eth0-ext"},
                        {"constituent-base-element-id": "1", "constituent-cpd-id": "eth1-ext"}
                    ]
                }]
            }]
        }])
    );
    assert_eq!(nsd["virtual-link-desc"], json!([{"id": "mgmt"}]));
}

#[test]
fn test_compute_descriptor_exists_only_when_sourced() {
    let im = vnfd_catalog(json!({
        "id": "v",
        "vdu": [
            {"id": "flavored", "vm-flavor": {"memory-mb": 512}},
            {"id": "pinned", "guest-epa": {"cpu-pinning-policy": "DEDICATED"}},
            {"id": "quota", "guest-epa": {"cpu-quota": {"limit": 100}}},
            {"id": "storage-only", "vm-flavor": {"storage-gb": 5}},
            {"id": "bare"}
        ]
    }));

    let vnfd = translate_ok(&im);
    let ids: Vec<&str> = vnfd["vnfd"]["virtual-compute-desc"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|desc| desc["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["flavored-compute", "pinned-compute", "quota-compute"]);
}

#[test]
fn test_internal_link_resolution() {
    let im = vnfd_catalog(json!({
        "id": "v",
        "vdu": [{"id": "V", "interface": [{"name": "I", "internal-connection-point-ref": "V-I"}]}],
        "internal-vld": [{"id": "X", "internal-connection-point": [{"id-ref": "V-I"}]}]
    }));

    let vnfd = translate_ok(&im);
    assert_eq!(vnfd["vnfd"]["vdu"][0]["int-cpd"][0]["int-virtual-link-desc"], json!("X"));
}

#[test]
fn test_absent_data_is_omitted_not_empty() {
    let im = vnfd_catalog(json!({
        "id": "v",
        "name": "",
        "vdu": [{"id": "vdu", "alternative-images": [], "interface": []}],
        "kdu": [],
        "placement-groups": null
    }));

    let vnfd = translate_ok(&im);
    let vdu = vnfd["vnfd"]["vdu"][0].as_object().unwrap();
    assert!(!vdu.contains_key("int-cpd"));
    assert!(!vdu.contains_key("alternative-sw-image-desc"));
    let root = vnfd["vnfd"].as_object().unwrap();
    for key in ["product-name", "sw-image-desc", "ext-cpd", "kdu", "placement-groups"] {
        assert!(!root.contains_key(key), "unexpected key {}", key);
    }
}

#[test]
fn test_unresolved_internal_connection_point_is_typed() {
    let im = vnfd_catalog(json!({
        "id": "v",
        "vdu": [{"id": "vdu"}],
        "internal-vld": [{"id": "net", "internal-connection-point": [{"id-ref": "nowhere"}]}]
    }));

    match translate(&im, &accept_all) {
        Err(Error::UnresolvedReference { kind, reference, target }) => {
            assert_eq!(kind, ReferenceKind::InternalConnectionPoint);
            assert_eq!(reference, "nowhere");
            assert_eq!(target, "net");
        }
        other => panic!("expected UnresolvedReference, got {:?}", other),
    }
}

#[test]
fn test_validation_failure_is_wrapped() {
    let reject = |_: DescriptorKind, _: &Value| -> anyhow::Result<()> {
        anyhow::bail!("vnfd: missing id")
    };
    let err = translate(&vnfd_catalog(json!({})), &reject).unwrap_err();
    assert_eq!(err.to_string(), "Error on input model validation: vnfd: missing id");
}

#[test]
fn test_unknown_root_message() {
    let err = translate(&json!({"pnfd:pnfd-catalog": {}}), &accept_all).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error in translation: cannot determine the type of OSM-IM descriptor. \
         Found pnfd:pnfd-catalog, expected one of: vnfd:vnfd-catalog, vnfd-catalog, nsd:nsd-catalog, nsd-catalog."
    );
}

#[test]
fn test_translator_is_reusable_across_threads() {
    let translator = Translator::new(accept_all);
    let documents: Vec<Value> = (0..4)
        .map(|i| vnfd_catalog(json!({"id": format!("vnf{}", i), "vdu": [{"id": "vdu", "image": "img"}]})))
        .collect();

    let translator = &translator;
    std::thread::scope(|scope| {
        let handles: Vec<_> = documents
            .iter()
            .map(|doc| scope.spawn(move || translator.translate(doc)))
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            match handle.join().unwrap().unwrap() {
                Sol006Document::Vnfd(doc) => assert_eq!(doc.vnfd.id, format!("vnf{}", i)),
                Sol006Document::Nsd(_) => panic!("expected a VNFD"),
            }
        }
    });
}

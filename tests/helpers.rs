#![allow(dead_code)]

use affinity_webhook::review::AdmissionReview;
use serde_json::{json, Value};

// Get the repo's example pod manifest
pub fn example_pod(name: &str) -> Value {
    let manifest = std::fs::read_to_string(format!("{}/{}", env!("CARGO_MANIFEST_DIR"), name))
        .expect("Failed to read pod manifest");
    serde_yaml::from_str(&manifest).expect("Unable to parse pod manifest into yaml")
}

// Wrap a pod into the AdmissionReview the API server sends on CREATE
pub fn admission_review(uid: &str, pod: Value) -> Value {
    json!({
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview",
        "request": {
            "uid": uid,
            "kind": {"group": "", "version": "v1", "kind": "Pod"},
            "resource": {"group": "", "version": "v1", "resource": "pods"},
            "requestKind": {"group": "", "version": "v1", "kind": "Pod"},
            "requestResource": {"group": "", "version": "v1", "resource": "pods"},
            "name": pod["metadata"]["name"].clone(),
            "namespace": "default",
            "operation": "CREATE",
            "userInfo": {
                "username": "system:serviceaccount:kube-system:replicaset-controller",
                "uid": "014fbff9a07c",
                "groups": ["system:serviceaccounts", "system:authenticated"]
            },
            "object": pod,
            "oldObject": null,
            "dryRun": false,
            "options": {"apiVersion": "meta.k8s.io/v1", "kind": "CreateOptions"}
        }
    })
}

// The patch carried by a response envelope, decoded from base64 into JSON
pub fn response_patch(review: &AdmissionReview) -> Value {
    let response = review.response.as_ref().expect("response should be set");
    let patch = response.patch.as_ref().expect("patch should be set");
    serde_json::from_slice(&patch.0).expect("patch should be JSON")
}

pub fn required_affinity() -> Value {
    json!({"nodeAffinity": {"requiredDuringSchedulingIgnoredDuringExecution": {"nodeSelectorTerms": [
        {"matchExpressions": [{"key": "node.kubernetes.io/capacity", "operator": "In", "values": ["on-demand"]}]}
    ]}}})
}

pub fn preferred_affinity() -> Value {
    json!({"nodeAffinity": {"preferredDuringSchedulingIgnoredDuringExecution": [
        {"weight": 10, "preference": {"matchExpressions": [
            {"key": "node.kubernetes.io/capacity", "operator": "In", "values": ["spot"]}
        ]}}
    ]}})
}

pub fn affinity_patch(affinity: Value) -> Value {
    json!([{"op": "add", "path": "/spec/affinity", "value": affinity}])
}

//! CRD manifest specs
//!
//! Verify `jobopd --crd` prints the Job CustomResourceDefinition that
//! cluster operators install before starting the daemon.

use crate::prelude::*;

fn crd() -> serde_json::Value {
    let output = jobopd(&["--crd"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    serde_json::from_str(&stdout(&output)).unwrap()
}

#[test]
fn crd_names_the_job_resource() {
    let crd = crd();
    assert_eq!(crd["kind"], "CustomResourceDefinition");
    assert_eq!(crd["metadata"]["name"], "jobs.cronjobs.example.com");
    assert_eq!(crd["spec"]["group"], "cronjobs.example.com");
    assert_eq!(crd["spec"]["scope"], "Namespaced");
    assert_eq!(crd["spec"]["names"]["kind"], "Job");
    assert_eq!(crd["spec"]["names"]["plural"], "jobs");
}

#[test]
fn crd_serves_v1_with_spec_schema() {
    let crd = crd();
    let version = &crd["spec"]["versions"][0];
    assert_eq!(version["name"], "v1");
    assert_eq!(version["served"], true);
    assert_eq!(version["storage"], true);

    let spec = &version["schema"]["openAPIV3Schema"]["properties"]["spec"];
    for field in ["schedule", "image", "command"] {
        assert!(
            spec["properties"].get(field).is_some(),
            "missing {field} in {spec}"
        );
    }
}

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn kdeploy() -> assert_cmd::Command {
    cargo_bin_cmd!("kdeploy")
}

const CONFIG: &str = r#"
image_prefix = "acme"

[registry]
dev = "localhost:5000"
prod = "registry.example.com/acme"

[services.root]
go = "services/go"

[services.go]
billing = "billing"
"#;

const DEPLOYMENT: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: acme_billing-deployment
spec:
  replicas: 1
  template:
    spec:
      containers:
        - name: billing
          image: localhost:5000/acme_billing:1.2.99
          ports:
            - containerPort: 8080
"#;

/// Project with one Go service `billing` and its dev + prod manifests.
fn init_project(dir: &Path) {
    std::fs::write(dir.join("kdeploy.toml"), CONFIG).unwrap();
    let k8s = dir.join("services/go/billing/k8s");
    std::fs::create_dir_all(&k8s).unwrap();
    std::fs::write(k8s.join("deployment.dev.yaml"), DEPLOYMENT).unwrap();
    std::fs::write(k8s.join("deployment.prod.yaml"), DEPLOYMENT).unwrap();
}

fn read_dev_manifest(dir: &Path) -> String {
    std::fs::read_to_string(dir.join("services/go/billing/k8s/deployment.dev.yaml")).unwrap()
}

// ── Help / Version ──

#[test]
fn shows_help() {
    kdeploy()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Version container images in Kubernetes deployment manifests",
        ));
}

#[test]
fn shows_version() {
    kdeploy()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kdeploy"));
}

// ── next-version ──

#[test]
fn next_version_increments_patch() {
    kdeploy()
        .args(["next-version", "registry/svc:1.2.3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current version: 1.2.3"))
        .stdout(predicate::str::contains("Next version:    1.2.4"))
        .stdout(predicate::str::contains("parsed"));
}

#[test]
fn next_version_untagged_uses_default() {
    kdeploy()
        .args(["next-version", "registry/svc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current version: 1.0.0"))
        .stdout(predicate::str::contains("Next version:    1.0.1"))
        .stdout(predicate::str::contains("untagged"));
}

#[test]
fn next_version_untagged_logs_default_note() {
    kdeploy()
        .env("RUST_LOG", "info")
        .args(["next-version", "registry/svc"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no version set on image"));
}

#[test]
fn next_version_tagged_has_no_default_note() {
    kdeploy()
        .env("RUST_LOG", "info")
        .args(["next-version", "registry/svc:1.2.3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no version set on image").not());
}

#[test]
fn next_version_json_output() {
    let output = kdeploy()
        .args(["next-version", "registry/svc:1.99.99", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["current"], "1.99.99");
    assert_eq!(report["next"], "2.0.0");
    assert_eq!(report["source"], "parsed");
    assert_eq!(report["well_formed"], true);
}

#[test]
fn next_version_json_flags_malformed_tag() {
    let output = kdeploy()
        .args(["next-version", "registry/svc:latest", "--json"])
        .output()
        .unwrap();

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["current"], "latest");
    assert_eq!(report["next"], "1.0.1");
    assert_eq!(report["well_formed"], false);
}

// ── image-ref ──

#[test]
fn image_ref_with_prefix() {
    kdeploy()
        .args([
            "image-ref",
            "--registry",
            "reg.example.com",
            "--prefix",
            "acme",
            "--svc",
            "billing",
            "--version",
            "2.0.1",
        ])
        .assert()
        .success()
        .stdout("reg.example.com/acme_billing:2.0.1\n");
}

#[test]
fn image_ref_defaults() {
    kdeploy()
        .args(["image-ref", "--registry", "reg.example.com", "--svc", "billing"])
        .assert()
        .success()
        .stdout("reg.example.com/billing:1.0.0\n");
}

// ── show ──

#[test]
fn show_prints_current_and_next_images() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());

    kdeploy()
        .args(["show", "--svc", "billing", "-C"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("acme_billing (go, dev)"))
        .stdout(predicate::str::contains(
            "Current image:   localhost:5000/acme_billing:1.2.99",
        ))
        .stdout(predicate::str::contains(
            "Next image:      localhost:5000/acme_billing:1.3.0",
        ));

    assert_eq!(read_dev_manifest(tmp.path()), DEPLOYMENT);
}

#[test]
fn show_json_uses_prod_registry() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());

    let output = kdeploy()
        .args(["show", "--svc", "billing", "--mode", "prod", "--json", "-C"])
        .arg(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "prod");
    assert_eq!(report["image_name"], "acme_billing");
    assert_eq!(
        report["current_reference"],
        "registry.example.com/acme/acme_billing:1.2.99"
    );
    assert_eq!(
        report["next_reference"],
        "registry.example.com/acme/acme_billing:1.3.0"
    );
    assert!(
        report["deployment_manifest"]
            .as_str()
            .unwrap()
            .ends_with("deployment.prod.yaml")
    );
}

// ── bump ──

#[test]
fn bump_rewrites_deployment_manifest() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());

    kdeploy()
        .args(["bump", "--svc", "billing", "-C"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "'bump' operation completed successfully for acme_billing.",
        ));

    let written: serde_yaml::Value = serde_yaml::from_str(&read_dev_manifest(tmp.path())).unwrap();
    let container = &written["spec"]["template"]["spec"]["containers"][0];
    assert_eq!(
        container["image"].as_str(),
        Some("localhost:5000/acme_billing:1.3.0")
    );
    assert_eq!(container["ports"][0]["containerPort"].as_u64(), Some(8080));
}

#[test]
fn bump_twice_advances_twice() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());

    for _ in 0..2 {
        kdeploy()
            .args(["bump", "--svc", "billing", "-C"])
            .arg(tmp.path())
            .assert()
            .success();
    }

    let written: serde_yaml::Value = serde_yaml::from_str(&read_dev_manifest(tmp.path())).unwrap();
    assert_eq!(
        written["spec"]["template"]["spec"]["containers"][0]["image"].as_str(),
        Some("localhost:5000/acme_billing:1.3.1")
    );
}

#[test]
fn bump_dry_run_leaves_manifest_untouched() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());

    kdeploy()
        .args(["bump", "--svc", "billing", "--dry-run", "-C"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("localhost:5000/acme_billing:1.3.0"));

    assert_eq!(read_dev_manifest(tmp.path()), DEPLOYMENT);
}

// ── Errors ──

#[test]
fn missing_config_fails() {
    let tmp = TempDir::new().unwrap();

    kdeploy()
        .args(["show", "--svc", "billing", "-C"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("kdeploy.toml"));
}

#[test]
fn unknown_service_fails() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());

    kdeploy()
        .args(["bump", "--svc", "payments", "-C"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("payments"));
}

#[test]
fn unknown_mode_is_rejected() {
    kdeploy()
        .args(["show", "--svc", "billing", "--mode", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn missing_manifest_fails() {
    let tmp = TempDir::new().unwrap();
    init_project(tmp.path());

    std::fs::remove_file(tmp.path().join("services/go/billing/k8s/deployment.prod.yaml")).unwrap();

    kdeploy()
        .args(["bump", "--svc", "billing", "--mode", "prod", "-C"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read current image"));
}

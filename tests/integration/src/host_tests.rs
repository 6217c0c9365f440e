//! Per-host scenarios: vendor detection picks the manager, the manager's
//! table row shapes every subprocess.

use std::fs;

use pretty_assertions::assert_eq;
use rstest::rstest;
use scfg_core::{ConfigStore, PackageService};
use scfg_managers::{Host, ManagerRegistry, ManagerResolver};
use scfg_model::Mode;
use scfg_test_utils::{StubRunner, TestHome};
use serde_json::json;

fn linux_host(home: &TestHome, vendor: &str) -> ManagerResolver {
    let os_release = home.root().join("os-release");
    fs::write(&os_release, format!("ID=\"{}\"\n", vendor)).unwrap();
    ManagerResolver::new(ManagerRegistry::with_builtins(), Host::linux(os_release))
}

fn service<'a>(
    mode: Mode,
    home: &TestHome,
    resolver: &'a ManagerResolver,
    runner: &'a StubRunner,
) -> PackageService<'a> {
    PackageService::new(
        mode,
        ConfigStore::new(home.config_path()).unwrap(),
        resolver,
        runner,
    )
}

#[rstest]
#[case::alpine("alpine", "apk", "^apk list --installed$", "^apk add curl=8.5.0-r0$")]
#[case::fedora("fedora", "dnf", "^dnf list --installed$", "^dnf install -y curl-8.5.0-r0$")]
#[case::arch("arch", "pacman", "^pacman -Q$", "^pacman -S --noconfirm curl=8.5.0-r0$")]
fn system_sync_per_vendor(
    #[case] vendor: &str,
    #[case] manager: &str,
    #[case] list: &str,
    #[case] install: &str,
) {
    let home = TestHome::new();
    home.write_packages(json!(["curl@8.5.0-r0"]));
    let resolver = linux_host(&home, vendor);
    let runner = StubRunner::new();
    runner.mark_found(manager);
    runner.register(list, "");
    runner.register(install, "");

    service(Mode::System, &home, &resolver, &runner)
        .sync()
        .unwrap();

    runner.assert_all_matched();
    assert_eq!(resolver.cached().map(|d| d.id.as_str()), Some(manager));
}

#[test]
fn fedora_configuration_sync_reads_dnf_versions() {
    let home = TestHome::new();
    let resolver = linux_host(&home, "fedora");
    let runner = StubRunner::new();
    runner.mark_found("dnf");
    runner.register(
        "^dnf list --installed$",
        "Installed Packages\n\
         bash.aarch64          5.2.26-1.fc39       @updates\n\
         tzdata.noarch         2024a-2.fc39        @updates\n",
    );

    service(Mode::Configuration, &home, &resolver, &runner)
        .sync()
        .unwrap();

    assert_eq!(
        home.read_packages(),
        vec![json!("bash@5.2.26"), json!("tzdata@2024a")]
    );
}

#[test]
fn ubuntu_falls_through_to_snap_without_listing() {
    let home = TestHome::new();
    home.write_packages(json!(["go@1.22/stable"]));
    let resolver = linux_host(&home, "ubuntu");
    let runner = StubRunner::new();
    runner.mark_found("snap");
    runner.register("^snap install --classic go --channel=1.22/stable$", "");

    let report = service(Mode::Hybrid, &home, &resolver, &runner)
        .sync()
        .unwrap();

    assert_eq!(
        report.actions,
        vec!["[System] Adding package `go --channel=1.22/stable`"]
    );
    assert_eq!(
        runner.calls(),
        vec![vec![
            "snap".to_string(),
            "install".to_string(),
            "--classic".to_string(),
            "go".to_string(),
            "--channel=1.22/stable".to_string(),
        ]]
    );
    assert_eq!(home.read_packages(), vec![json!("go@1.22/stable")]);
}

#[test]
fn macos_removes_through_brew() {
    let home = TestHome::new();
    home.write_packages(json!(["wget", "jq"]));
    let resolver = ManagerResolver::new(ManagerRegistry::with_builtins(), Host::macos());
    let runner = StubRunner::new();
    runner.mark_found("brew");
    runner.register("^brew remove wget$", "");

    let report = service(Mode::Hybrid, &home, &resolver, &runner)
        .remove(&["wget".to_string()])
        .unwrap();

    assert_eq!(report.actions, vec!["Successfully removed 1 packages"]);
    assert_eq!(home.read_packages(), vec![json!("jq")]);
}

#[test]
fn unknown_vendor_without_any_manager_aborts_before_mutation() {
    let home = TestHome::new();
    home.write_packages(json!(["jq"]));
    let resolver = linux_host(&home, "plan9");
    let runner = StubRunner::new();

    let err = service(Mode::Hybrid, &home, &resolver, &runner)
        .add(&["bat".to_string()])
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "unable to find a supported package manager on host system"
    );
    assert_eq!(home.read_packages(), vec![json!("jq")]);
    assert!(runner.calls().is_empty());
}

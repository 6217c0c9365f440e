//! SyncEngine and the sync flow.

use std::fs;

use pretty_assertions::assert_eq;
use scfg_core::{ConfigStore, Configuration, PackageService, SyncEngine};
use scfg_managers::{Host, ManagerRegistry, ManagerResolver, PackageManager};
use scfg_model::{Mode, Package};
use scfg_test_utils::{StubRunner, TestHome};
use serde_json::json;

const APT_LIST: &str = "^apt list --installed$";

fn declared() -> Configuration {
    let mut pkg = Package::new("some-package", "1.2.3");
    pkg.add_alternate("apt", Package::new("apt-some-package", "1.2.3"))
        .unwrap();
    let mut config = Configuration::new();
    config.insert(pkg).unwrap();
    config
}

fn installed_output() -> &'static str {
    "Listing... Done\napt-some-sys-package/now 1.2.3 amd64 [installed]\n"
}

#[test]
fn test_configuration_mode_adds_installed_only() {
    let registry = ManagerRegistry::with_builtins();
    let runner = StubRunner::new();
    runner.register(APT_LIST, installed_output());
    let manager = PackageManager::new(registry.get("apt").unwrap(), &runner);

    let mut config = declared();
    let report = SyncEngine::new(Mode::Configuration, manager)
        .sync(&mut config)
        .unwrap();

    assert_eq!(
        report.actions,
        vec!["[Configuration] Adding package `apt-some-sys-package@1.2.3`"]
    );
    assert!(report.is_clean());
    assert_eq!(
        config.find("apt-some-sys-package"),
        Some(&Package::new("apt-some-sys-package", "1.2.3"))
    );
    assert_eq!(runner.call_lines(), vec!["apt list --installed"]);
}

#[test]
fn test_system_mode_installs_declared_only_with_alternate() {
    let registry = ManagerRegistry::with_builtins();
    let runner = StubRunner::new();
    runner.register(APT_LIST, installed_output());
    runner.register("^apt install -y apt-some-package=1.2.3$", "");
    let manager = PackageManager::new(registry.get("apt").unwrap(), &runner);

    let mut config = declared();
    let before = config.clone();
    let report = SyncEngine::new(Mode::System, manager)
        .sync(&mut config)
        .unwrap();

    assert_eq!(
        report.actions,
        vec!["[System] Adding package `apt-some-package=1.2.3`"]
    );
    assert_eq!(config, before);
    runner.assert_all_matched();
}

#[test]
fn test_hybrid_mode_fills_both_sides() {
    let registry = ManagerRegistry::with_builtins();
    let runner = StubRunner::new();
    runner.register(APT_LIST, installed_output());
    runner.register("^apt install -y apt-some-package=1.2.3$", "");
    let manager = PackageManager::new(registry.get("apt").unwrap(), &runner);

    let mut config = declared();
    let report = SyncEngine::new(Mode::Hybrid, manager)
        .sync(&mut config)
        .unwrap();

    assert_eq!(
        report.actions,
        vec![
            "[Configuration] Adding package `apt-some-sys-package@1.2.3`",
            "[System] Adding package `apt-some-package=1.2.3`",
        ]
    );
    assert_eq!(config.len(), 2);
    assert!(config.find("some-package").is_some());
}

#[test]
fn test_failed_install_is_a_warning() {
    let registry = ManagerRegistry::with_builtins();
    let runner = StubRunner::new();
    runner.register(APT_LIST, "Listing... Done\n");
    runner.register_error("^apt install -y apt-some-package=1.2.3$", 100, "E: not found");
    let manager = PackageManager::new(registry.get("apt").unwrap(), &runner);

    let mut config = declared();
    let report = SyncEngine::new(Mode::System, manager)
        .sync(&mut config)
        .unwrap();

    assert_eq!(
        report.warnings,
        vec!["[System] Failed to add package `apt-some-package=1.2.3`: E: not found\napt: exit status 100"]
    );
}

#[test]
fn test_version_drift_in_configuration_mode_warns() {
    let registry = ManagerRegistry::with_builtins();
    let runner = StubRunner::new();
    runner.register(APT_LIST, "curl/now 8.1 amd64 [installed]\n");
    let manager = PackageManager::new(registry.get("apt").unwrap(), &runner);

    let mut config = Configuration::new();
    config.insert(Package::new("curl", "8.0")).unwrap();
    let report = SyncEngine::new(Mode::Configuration, manager)
        .sync(&mut config)
        .unwrap();

    assert_eq!(
        report.warnings,
        vec!["[Configuration] Failed to add package `curl@8.1`: package already exists in configuration"]
    );
    assert_eq!(config.find("curl").unwrap().version(), Some("8.0"));
}

#[test]
fn test_sync_flow_saves_only_when_configuration_is_managed() {
    let home = TestHome::new();
    home.write_packages(json!(["zsh"]));
    let os_release = home.root().join("os-release");
    fs::write(&os_release, "ID=ubuntu\n").unwrap();
    let resolver = ManagerResolver::new(ManagerRegistry::with_builtins(), Host::linux(&os_release));

    let runner = StubRunner::new();
    runner.mark_found("apt");
    runner.register(APT_LIST, "curl/now 8.0 amd64 [installed]\n");
    runner.register("^apt install -y zsh$", "");
    let system = PackageService::new(
        Mode::System,
        ConfigStore::new(home.config_path()).unwrap(),
        &resolver,
        &runner,
    );
    system.sync().unwrap();
    assert_eq!(home.read_packages(), vec![json!("zsh")]);

    runner.register(APT_LIST, "curl/now 8.0 amd64 [installed]\n");
    let configuration = PackageService::new(
        Mode::Configuration,
        ConfigStore::new(home.config_path()).unwrap(),
        &resolver,
        &runner,
    );
    configuration.sync().unwrap();
    assert_eq!(home.read_packages(), vec![json!("curl@8.0"), json!("zsh")]);
}

#[test]
fn test_multiarch_rows_are_not_added_twice() {
    let registry = ManagerRegistry::with_builtins();
    let runner = StubRunner::new();
    runner.register(
        "^dnf list --installed$",
        "Installed Packages\n\
         glibc.i686            2.38-16.fc39        @updates\n\
         glibc.x86_64          2.38-16.fc39        @updates\n",
    );
    let manager = PackageManager::new(registry.get("dnf").unwrap(), &runner);

    let mut config = Configuration::new();
    config.insert(Package::new("glibc", "2.38")).unwrap();
    let report = SyncEngine::new(Mode::Hybrid, manager)
        .sync(&mut config)
        .unwrap();

    assert!(report.actions.is_empty());
    assert!(report.is_clean());
    assert_eq!(config.len(), 1);
}

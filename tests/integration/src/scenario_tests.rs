//! End-to-end scenarios across the configuration store, the reconciliation
//! engine and the manager layer.
//!
//! Flow: config file on disk -> PackageService -> resolved manager -> stubbed
//! subprocesses -> config file on disk.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use rstest::rstest;
use scfg_core::{ConfigStore, Configuration, PackageService};
use scfg_managers::{Host, ManagerRegistry, ManagerResolver};
use scfg_model::{Mode, Package};
use scfg_test_utils::{StubRunner, TestHome};
use serde_json::json;

const APT_LIST: &str = "^apt list --installed$";

fn host_resolver(root: &Path, vendor: &str) -> ManagerResolver {
    let os_release = root.join("os-release");
    fs::write(&os_release, format!("NAME=\"Test\"\nID={}\n", vendor)).unwrap();
    ManagerResolver::new(ManagerRegistry::with_builtins(), Host::linux(os_release))
}

fn declared_with_alternate(home: &TestHome) {
    home.write_packages(json!([{
        "name": "some-package",
        "version": "1.2.3",
        "alternates": { "apt": { "name": "apt-some-package", "version": "1.2.3" } }
    }]));
}

#[test]
fn configuration_sync_records_installed_only_package() {
    let home = TestHome::new();
    declared_with_alternate(&home);
    let resolver = host_resolver(home.root(), "ubuntu");
    let runner = StubRunner::new();
    runner.mark_found("apt");
    runner.register(APT_LIST, "Listing... Done\napt-some-sys-package/now 1.2.3 amd64 [installed]\n");

    let service = PackageService::new(
        Mode::Configuration,
        ConfigStore::new(home.config_path()).unwrap(),
        &resolver,
        &runner,
    );
    let report = service.sync().unwrap();

    assert_eq!(
        report.actions,
        vec!["[Configuration] Adding package `apt-some-sys-package@1.2.3`"]
    );
    assert_eq!(runner.call_lines(), vec!["apt list --installed"]);

    let packages = home.read_packages();
    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0], json!("apt-some-sys-package@1.2.3"));
    assert_eq!(packages[1]["name"], json!("some-package"));
}

#[test]
fn system_sync_installs_through_alternate_and_template() {
    let home = TestHome::new();
    declared_with_alternate(&home);
    let before = fs::read_to_string(home.config_path()).unwrap();
    let resolver = host_resolver(home.root(), "debian");
    let runner = StubRunner::new();
    runner.mark_found("apt");
    runner.register(APT_LIST, "Listing... Done\napt-some-sys-package/now 1.2.3 amd64 [installed]\n");
    runner.register("^apt install -y apt-some-package=1.2.3$", "");

    let service = PackageService::new(
        Mode::System,
        ConfigStore::new(home.config_path()).unwrap(),
        &resolver,
        &runner,
    );
    let report = service.sync().unwrap();

    assert_eq!(
        report.actions,
        vec!["[System] Adding package `apt-some-package=1.2.3`"]
    );
    runner.assert_all_matched();
    assert_eq!(fs::read_to_string(home.config_path()).unwrap(), before);
}

#[test]
fn hybrid_list_marks_each_side_in_sorted_order() {
    let home = TestHome::new();
    home.write_packages(json!(["zsh", "curl@8.0"]));
    let resolver = host_resolver(home.root(), "ubuntu");
    let runner = StubRunner::new();
    runner.mark_found("apt");
    runner.register(
        APT_LIST,
        "Listing... Done\nbash/now 5.2 amd64 [installed]\ncurl/now 8.0 amd64 [installed]\n",
    );

    let service = PackageService::new(
        Mode::Hybrid,
        ConfigStore::new(home.config_path()).unwrap(),
        &resolver,
        &runner,
    );
    let listing = service.list().unwrap();

    assert_eq!(listing.lines(), vec!["- bash@5.2", "  curl@8.0", "+ zsh"]);
}

#[test]
fn multi_add_with_one_failure_still_succeeds() {
    let home = TestHome::new();
    let resolver = host_resolver(home.root(), "ubuntu");
    let runner = StubRunner::new();
    runner.mark_found("apt");
    runner.register("^apt install -y jq$", "");
    runner.register_error(
        "^apt install -y not-a-package$",
        100,
        "E: Unable to locate package not-a-package",
    );
    runner.register("^apt install -y ripgrep=14.1.0$", "");

    let service = PackageService::new(
        Mode::Hybrid,
        ConfigStore::new(home.config_path()).unwrap(),
        &resolver,
        &runner,
    );
    let specs: Vec<String> = ["jq", "not-a-package", "ripgrep@14.1.0"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let report = service.add(&specs).unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("`not-a-package`"));
    assert!(report.warnings[0].contains("E: Unable to locate package not-a-package"));
    assert!(report.warnings[0].ends_with("apt: exit status 100"));
    assert_eq!(report.actions, vec!["Successfully added 2 packages"]);
    assert_eq!(
        runner.call_lines(),
        vec![
            "apt install -y jq",
            "apt install -y not-a-package",
            "apt install -y ripgrep=14.1.0",
        ]
    );
    assert_eq!(home.read_packages(), vec![json!("jq"), json!("ripgrep@14.1.0")]);
}

#[test]
fn alternate_then_system_sync_uses_it() {
    let home = TestHome::new();
    home.write_packages(json!(["fd@9.0"]));
    let resolver = host_resolver(home.root(), "ubuntu");
    let runner = StubRunner::new();
    runner.mark_found("apt");

    let service = PackageService::new(
        Mode::System,
        ConfigStore::new(home.config_path()).unwrap(),
        &resolver,
        &runner,
    );
    service.add_alternate("fd", "fd-find@9.0", "apt").unwrap();

    runner.register(APT_LIST, "Listing... Done\n");
    runner.register("^apt install -y fd-find=9.0$", "");
    let report = service.sync().unwrap();

    assert_eq!(report.actions, vec!["[System] Adding package `fd-find=9.0`"]);
    runner.assert_all_matched();
}

#[rstest]
#[case::toml("packages.toml", "packages = [\"zsh\"]\n")]
#[case::yaml("packages.yaml", "packages:\n  - zsh\n")]
#[case::json("packages.json", "{\"packages\": [\"zsh\"]}")]
fn configuration_sync_in_every_file_format(#[case] file: &str, #[case] content: &str) {
    let home = TestHome::new();
    let config_path = home.root().join(file);
    fs::write(&config_path, content).unwrap();
    let resolver = host_resolver(home.root(), "ubuntu");
    let runner = StubRunner::new();
    runner.mark_found("apt");
    runner.register(APT_LIST, "Listing... Done\ncurl/now 8.0 amd64 [installed]\nzsh/now 5.9 amd64 [installed]\n");

    let service = PackageService::new(
        Mode::Configuration,
        ConfigStore::new(&config_path).unwrap(),
        &resolver,
        &runner,
    );
    let report = service.sync().unwrap();

    assert_eq!(
        report.actions,
        vec![
            "[Configuration] Adding package `curl@8.0`",
            "[Configuration] Adding package `zsh@5.9`",
        ]
    );
    assert_eq!(
        report.warnings,
        vec!["[Configuration] Failed to add package `zsh@5.9`: package already exists in configuration"]
    );

    let stored: Configuration = ConfigStore::new(&config_path).unwrap().load().unwrap();
    assert_eq!(
        stored.packages(),
        &[Package::new("curl", "8.0"), Package::new("zsh", "")]
    );
}

#[test]
fn missing_configuration_file_is_created_on_first_save() {
    let home = TestHome::new();
    let config_path = home.root().join("nested").join("dir").join("config.json");
    let resolver = host_resolver(home.root(), "ubuntu");
    let runner = StubRunner::new();

    let service = PackageService::new(
        Mode::Configuration,
        ConfigStore::new(&config_path).unwrap(),
        &resolver,
        &runner,
    );
    service.add(&["bat".to_string()]).unwrap();

    assert!(config_path.exists());
    assert!(runner.calls().is_empty());
}

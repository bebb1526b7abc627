//! Install, update and presence checks against a scripted CMS.

use bridge_core::{
    BridgeSettings, Environment, Error, ExtensionInstaller, HostError, INSTALLER_TYPE,
    InstallError, LifecycleState, Operation, Outcome, Package, PathConstant, QueuedMessage,
    Verbosity,
};
use bridge_manifest::{ExtensionType, FileEntry, Manifest};
use bridge_test_utils::{
    FakeApplication, FakeFactory, FakePlacer, FakeRepository, HostCall, RecordingExtman,
    RecordingReporter, ReportEvent, Response,
};
use pretty_assertions::assert_eq;

const STAGED: &str = "tmp/vendor/pkg";

fn env_with(application: FakeApplication) -> Environment<FakeFactory> {
    Environment::new(
        FakeFactory::new(application),
        BridgeSettings::default(),
        Verbosity::Normal,
        "/srv/www",
    )
}

fn component(name: &str) -> Manifest {
    Manifest::new(Some("component"), name)
}

#[test]
fn test_supports_only_installer_type() {
    let mut env = env_with(FakeApplication::new());
    let installer = ExtensionInstaller::new(&mut env, FakePlacer::new());

    assert!(installer.supports(INSTALLER_TYPE));
    assert!(installer.supports("joomlatools-installer"));
    assert!(!installer.supports("library"));
    assert!(!installer.supports("Joomlatools-Installer"));
}

#[test]
fn test_install_path_ignores_configuration() {
    let mut env = Environment::new(
        FakeFactory::new(FakeApplication::new()),
        BridgeSettings {
            basedir: Some("site".to_string()),
            ..BridgeSettings::default()
        },
        Verbosity::Normal,
        "/srv/www",
    );
    let installer = ExtensionInstaller::new(&mut env, FakePlacer::new());
    let package = Package::new("vendor/pkg");

    assert_eq!(installer.install_path(&package).as_str(), STAGED);
    assert_eq!(installer.install_path(&package).as_str(), STAGED);
    assert_eq!(installer.state(), LifecycleState::Uninitialized);
}

#[test]
fn test_install_component_defines_component_paths() {
    let mut env = env_with(FakeApplication::new().with_manifest(STAGED, component("Foo Bar!")));
    let mut repo = FakeRepository::default();
    {
        let mut installer = ExtensionInstaller::new(&mut env, FakePlacer::new());
        let outcome = installer
            .install(&mut repo, &Package::new("vendor/pkg"))
            .unwrap();
        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(installer.state(), LifecycleState::Settled);
    }

    assert_eq!(repo.packages, vec!["vendor/pkg"]);
    let paths = env.paths();
    assert_eq!(
        paths.get(PathConstant::Component).unwrap().as_str(),
        "/srv/www/components/com_foobar"
    );
    assert_eq!(
        paths.get(PathConstant::ComponentSite).unwrap().as_str(),
        "/srv/www/components/com_foobar"
    );
    assert_eq!(
        paths.get(PathConstant::ComponentAdministrator).unwrap().as_str(),
        "/srv/www/administrator/components/com_foobar"
    );

    let application = env.application().unwrap();
    assert_eq!(application.calls(), vec![HostCall::Install(STAGED.to_string())]);
    assert!(
        application
            .installer_paths()
            .contains(&("source".to_string(), STAGED.to_string()))
    );
}

#[test]
fn test_component_paths_are_defined_once_per_process() {
    let mut env = env_with(
        FakeApplication::new()
            .with_manifest("tmp/vendor/first", component("First"))
            .with_manifest("tmp/vendor/second", component("Second")),
    );
    let mut repo = FakeRepository::default();
    {
        let mut installer = ExtensionInstaller::new(&mut env, FakePlacer::new());
        installer
            .install(&mut repo, &Package::new("vendor/first"))
            .unwrap();
        installer
            .install(&mut repo, &Package::new("vendor/second"))
            .unwrap();
    }

    assert_eq!(
        env.paths().get(PathConstant::Component).unwrap().as_str(),
        "/srv/www/components/com_first"
    );
}

#[test]
fn test_non_component_defines_no_component_paths() {
    let manifest = Manifest::new(Some("module"), "Login")
        .with_file(FileEntry::new("mod_login.php").with_attribute("module", "mod_login"));
    let mut env = env_with(FakeApplication::new().with_manifest(STAGED, manifest));
    let mut repo = FakeRepository::default();
    {
        let mut installer = ExtensionInstaller::new(&mut env, FakePlacer::new());
        installer
            .install(&mut repo, &Package::new("vendor/pkg"))
            .unwrap();
    }

    assert!(!env.paths().is_defined(PathConstant::Component));
    assert_eq!(
        env.application().unwrap().installed(),
        &[("mod_login".to_string(), ExtensionType::Module)]
    );
}

#[test]
fn test_rejected_install_is_reported_not_raised() {
    let reporter = RecordingReporter::new();
    let mut env = env_with(
        FakeApplication::new()
            .with_manifest(STAGED, component("Pkg"))
            .with_queued(QueuedMessage::new("message", "Starting"))
            .on_install(Response::Reject(vec![
                QueuedMessage::error("bad xml"),
                QueuedMessage::new("warning", "slow disk"),
                QueuedMessage::error("no perms"),
            ])),
    );
    let mut repo = FakeRepository::default();
    let mut installer =
        ExtensionInstaller::new(&mut env, FakePlacer::new()).with_reporter(reporter.clone());

    let outcome = installer
        .install(&mut repo, &Package::new("vendor/pkg"))
        .unwrap();

    let error = outcome.error().unwrap();
    assert!(matches!(error, InstallError::Rejected(_)));
    assert_eq!(
        error.to_string(),
        "Error while installing vendor/pkg:\nbad xml\nno perms"
    );
    assert_eq!(
        reporter.events(),
        vec![
            ReportEvent::Started(Operation::Install, "vendor/pkg".to_string()),
            ReportEvent::Failed(
                "[vendor/pkg]: Error while installing vendor/pkg:\nbad xml\nno perms".to_string()
            ),
        ]
    );
    assert_eq!(installer.state(), LifecycleState::Settled);
}

#[test]
fn test_host_error_during_install_is_swallowed() {
    let reporter = RecordingReporter::new();
    let mut env = env_with(FakeApplication::new().on_install(Response::Raise(
        HostError::new("Table locked").with_origin("table.php:87"),
    )));
    let mut repo = FakeRepository::default();
    let mut installer =
        ExtensionInstaller::new(&mut env, FakePlacer::new()).with_reporter(reporter.clone());

    let outcome = installer
        .install(&mut repo, &Package::new("vendor/pkg"))
        .unwrap();

    assert!(!outcome.is_completed());
    assert_eq!(
        reporter.failures(),
        vec!["[vendor/pkg]: Table locked\n[origin]: table.php:87".to_string()]
    );
}

#[test]
fn test_placement_failure_propagates() {
    let mut env = env_with(FakeApplication::new());
    let mut repo = FakeRepository::default();
    {
        let mut installer = ExtensionInstaller::new(&mut env, FakePlacer::failing());
        let err = installer
            .install(&mut repo, &Package::new("vendor/pkg"))
            .unwrap_err();
        assert!(matches!(err, Error::Placement { ref package, .. } if package == "vendor/pkg"));
    }

    assert!(env.application().unwrap().calls().is_empty());
}

#[test]
fn test_broken_manifest_does_not_stop_install() {
    let mut env = env_with(
        FakeApplication::new().with_broken_manifest(STAGED, HostError::new("XML parse error")),
    );
    let mut repo = FakeRepository::default();
    {
        let mut installer = ExtensionInstaller::new(&mut env, FakePlacer::new());
        let outcome = installer
            .install(&mut repo, &Package::new("vendor/pkg"))
            .unwrap();
        assert!(outcome.is_completed());
    }

    assert!(!env.paths().is_defined(PathConstant::Component));
    assert_eq!(
        env.application().unwrap().calls(),
        vec![HostCall::Install(STAGED.to_string())]
    );
}

#[test]
fn test_update_uses_target_package() {
    let reporter = RecordingReporter::new();
    let mut env = env_with(
        FakeApplication::new()
            .with_manifest("tmp/vendor/pkg-next", component("Pkg"))
            .on_update(Response::Reject(vec![QueuedMessage::error("downgrade refused")])),
    );
    let mut repo = FakeRepository {
        packages: vec!["vendor/pkg".to_string()],
    };
    {
        let mut installer =
            ExtensionInstaller::new(&mut env, FakePlacer::new()).with_reporter(reporter.clone());
        let outcome = installer
            .update(
                &mut repo,
                &Package::new("vendor/pkg"),
                &Package::new("vendor/pkg-next"),
            )
            .unwrap();
        assert_eq!(
            outcome.error().map(ToString::to_string).as_deref(),
            Some("Error while updating vendor/pkg-next:\ndowngrade refused")
        );
    }

    assert_eq!(repo.packages, vec!["vendor/pkg-next"]);
    assert_eq!(
        env.application().unwrap().calls(),
        vec![HostCall::Update("tmp/vendor/pkg-next".to_string())]
    );
    assert_eq!(
        reporter.events()[0],
        ReportEvent::Started(Operation::Update, "vendor/pkg-next".to_string())
    );
    assert_eq!(
        env.paths().get(PathConstant::Component).unwrap().as_str(),
        "/srv/www/components/com_pkg"
    );
    assert_eq!(
        env.paths()
            .get(PathConstant::ComponentAdministrator)
            .unwrap()
            .as_str(),
        "/srv/www/administrator/components/com_pkg"
    );
}

#[test]
fn test_is_installed_queries_resolved_identity() {
    let manifest = Manifest::new(Some("template"), "My-Theme_2");
    let mut env = env_with(
        FakeApplication::new()
            .with_manifest(STAGED, manifest)
            .with_extension("my-theme_2", ExtensionType::Template),
    );
    let repo = FakeRepository::default();
    {
        let mut installer = ExtensionInstaller::new(&mut env, FakePlacer::new());
        assert!(installer.is_installed(&repo, &Package::new("vendor/pkg")).unwrap());
        assert_eq!(installer.state(), LifecycleState::Settled);
    }

    assert_eq!(
        env.application().unwrap().calls(),
        vec![HostCall::HasExtension(
            "my-theme_2".to_string(),
            ExtensionType::Template
        )]
    );
}

#[test]
fn test_unresolved_plugin_is_not_installed_without_query() {
    let manifest = Manifest::new(Some("plugin"), "Koowa").with_file(FileEntry::new("koowa.php"));
    let mut env = env_with(FakeApplication::new().with_manifest(STAGED, manifest));
    let repo = FakeRepository::default();
    {
        let mut installer = ExtensionInstaller::new(&mut env, FakePlacer::new());
        assert!(!installer.is_installed(&repo, &Package::new("vendor/pkg")).unwrap());
    }

    assert_eq!(env.application().unwrap().extension_queries(), 0);
}

#[test]
fn test_missing_or_broken_manifest_is_not_installed() {
    let mut env = env_with(
        FakeApplication::new()
            .with_broken_manifest("tmp/vendor/broken", HostError::new("manifest not found")),
    );
    let repo = FakeRepository::default();
    {
        let mut installer = ExtensionInstaller::new(&mut env, FakePlacer::new());
        assert!(!installer.is_installed(&repo, &Package::new("vendor/broken")).unwrap());
        assert!(!installer.is_installed(&repo, &Package::new("vendor/absent")).unwrap());
    }

    assert_eq!(env.application().unwrap().extension_queries(), 0);
}

#[test]
fn test_install_then_is_installed() {
    let mut env = env_with(FakeApplication::new().with_manifest(STAGED, component("Pkg")));
    let mut repo = FakeRepository::default();
    let mut installer = ExtensionInstaller::new(&mut env, FakePlacer::new());
    let package = Package::new("vendor/pkg");

    assert!(!installer.is_installed(&repo, &package).unwrap());
    installer.install(&mut repo, &package).unwrap();
    assert!(installer.is_installed(&repo, &package).unwrap());
}

#[test]
fn test_extman_hook_runs_for_vendor_packages_only() {
    let extman = RecordingExtman::new();
    let mut env = env_with(FakeApplication::new());
    let mut repo = FakeRepository::default();
    let mut installer =
        ExtensionInstaller::new(&mut env, FakePlacer::new()).with_extman(extman.clone());

    installer
        .install(&mut repo, &Package::new("acme/widget"))
        .unwrap();
    assert!(extman.imported_plugins().is_empty());

    installer
        .install(&mut repo, &Package::new("joomlatools/extman"))
        .unwrap();
    assert!(extman.imported_plugins().is_empty());

    installer
        .install(&mut repo, &Package::new("joomlatools/docman"))
        .unwrap();
    installer
        .update(
            &mut repo,
            &Package::new("joomlatools/docman"),
            &Package::new("joomlatools/docman"),
        )
        .unwrap();
    assert_eq!(extman.imported_plugins(), vec!["system/koowa", "system/koowa"]);
    assert_eq!(
        extman.loaded_objects(),
        vec!["com://admin/extman.database.row.extension"]
    );
}

#[test]
fn test_first_call_bootstraps_lazily() {
    let mut env = env_with(FakeApplication::new());
    let repo = FakeRepository::default();
    {
        let mut installer = ExtensionInstaller::new(&mut env, FakePlacer::new());
        assert_eq!(installer.state(), LifecycleState::Uninitialized);
        installer.bootstrap().unwrap();
        assert_eq!(installer.state(), LifecycleState::Bootstrapped);
        installer.is_installed(&repo, &Package::new("vendor/pkg")).unwrap();
        installer.bootstrap().unwrap();
        assert_eq!(installer.state(), LifecycleState::Settled);
    }
    assert_eq!(env.factory().created(), 1);
}

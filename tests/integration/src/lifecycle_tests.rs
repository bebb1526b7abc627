//! End-to-end package-manager runs against a scripted CMS.
//!
//! Each test plays one package-manager process: settings come from a
//! package manager config block, several packages go through the bridge,
//! and the environment is torn down at the end.

use std::path::PathBuf;

use bridge_core::{
    BridgeSettings, Environment, ExtensionInstaller, HostError, LifecycleState, Package,
    PathConstant, QueuedMessage, Verbosity,
};
use bridge_manifest::{ExtensionType, Manifest};
use bridge_test_utils::{
    FakeApplication, FakeFactory, FakePlacer, FakeRepository, HostCall, RecordingExtman,
    RecordingReporter, ReportEvent, Response,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn fixture(name: &str) -> Manifest {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name);
    Manifest::from_path(&path).unwrap()
}

fn docman_site() -> FakeApplication {
    FakeApplication::new()
        .with_manifest("tmp/joomlatools/docman", fixture("com_docman.toml"))
        .with_manifest(
            "tmp/joomlatools/docman-module",
            fixture("mod_docman_documents.toml"),
        )
        .with_manifest("tmp/joomlatools/framework", fixture("plg_koowa.toml"))
        .with_manifest("tmp/acme/theme", fixture("tpl_broken.toml"))
}

#[test]
fn test_full_run_installs_vendor_suite() {
    let settings = BridgeSettings::from_package_config(&json!({
        "joomla": { "basedir": "site", "username": "deploy" }
    }))
    .unwrap();
    let temp = tempfile::TempDir::new().unwrap();
    let mut env = Environment::new(
        FakeFactory::new(docman_site()),
        settings,
        Verbosity::VeryVerbose,
        temp.path(),
    );
    let reporter = RecordingReporter::new();
    let extman = RecordingExtman::new();
    let mut repo = FakeRepository::default();

    {
        let mut installer = ExtensionInstaller::new(&mut env, FakePlacer::new())
            .with_reporter(reporter.clone())
            .with_extman(extman.clone());

        for name in [
            "joomlatools/framework",
            "joomlatools/docman",
            "joomlatools/docman-module",
        ] {
            let package = Package::new(name);
            assert!(!installer.is_installed(&repo, &package).unwrap());
            let outcome = installer.install(&mut repo, &package).unwrap();
            assert!(outcome.is_completed(), "{name}: {outcome:?}");
            assert!(installer.is_installed(&repo, &package).unwrap());
        }
        assert_eq!(installer.state(), LifecycleState::Settled);
    }

    assert_eq!(env.factory().created(), 1);
    assert_eq!(repo.packages.len(), 3);

    let application = env.application().unwrap();
    assert_eq!(application.authenticated_as().unwrap().username, "deploy");
    assert_eq!(
        application.installed(),
        &[
            ("koowa".to_string(), ExtensionType::Plugin),
            ("com_docman".to_string(), ExtensionType::Component),
            ("mod_docman_documents".to_string(), ExtensionType::Module),
        ]
    );

    let base = format!("{}/site", bridge_fs::NormalizedPath::new(temp.path()));
    assert_eq!(
        env.paths().get(PathConstant::ComponentAdministrator).unwrap().as_str(),
        format!("{base}/administrator/components/com_docman")
    );

    assert_eq!(extman.imported_plugins().len(), 3);
    assert_eq!(extman.loaded_objects().len(), 1);
    assert!(reporter.failures().is_empty());
    assert_eq!(
        reporter.events().first(),
        Some(&ReportEvent::Started(
            bridge_core::Operation::Install,
            "joomlatools/framework".to_string()
        ))
    );

    env.shutdown().unwrap();
    assert_eq!(env.application().unwrap().sessions_closed(), 1);
}

#[test]
fn test_failed_install_does_not_abort_the_run() {
    let application = docman_site().on_install(Response::Reject(vec![
        QueuedMessage::error("bad xml"),
        QueuedMessage::error("no perms"),
    ]));
    let mut env = Environment::new(
        FakeFactory::new(application),
        BridgeSettings::default(),
        Verbosity::Normal,
        "/srv/www",
    );
    let reporter = RecordingReporter::new();
    let mut repo = FakeRepository::default();

    {
        let mut installer =
            ExtensionInstaller::new(&mut env, FakePlacer::new()).with_reporter(reporter.clone());
        for name in ["joomlatools/docman", "joomlatools/docman-module"] {
            let package = Package::new(name);
            installer.install(&mut repo, &package).unwrap();
            assert!(!installer.is_installed(&repo, &package).unwrap());
        }
    }

    assert_eq!(repo.packages.len(), 2);
    assert_eq!(
        reporter.failures(),
        vec![
            "[joomlatools/docman]: Error while installing joomlatools/docman:\nbad xml\nno perms"
                .to_string(),
            // The queue is never drained, so earlier errors repeat.
            "[joomlatools/docman-module]: Error while installing joomlatools/docman-module:\nbad xml\nno perms\nbad xml\nno perms"
                .to_string(),
        ]
    );
}

#[test]
fn test_unresolvable_template_is_never_queried() {
    let mut env = Environment::new(
        FakeFactory::new(docman_site()),
        BridgeSettings::default(),
        Verbosity::Normal,
        "/srv/www",
    );
    let repo = FakeRepository::default();
    {
        let mut installer = ExtensionInstaller::new(&mut env, FakePlacer::new());
        assert!(!installer.is_installed(&repo, &Package::new("acme/theme")).unwrap());
    }
    assert_eq!(env.application().unwrap().extension_queries(), 0);
}

#[test]
fn test_update_after_broken_manifest() {
    let application = docman_site()
        .with_broken_manifest("tmp/joomlatools/docman-next", HostError::new("Invalid manifest"));
    let mut env = Environment::new(
        FakeFactory::new(application),
        BridgeSettings::default(),
        Verbosity::Normal,
        "/srv/www",
    );
    let mut repo = FakeRepository::default();
    {
        let mut installer = ExtensionInstaller::new(&mut env, FakePlacer::new());
        let outcome = installer
            .update(
                &mut repo,
                &Package::new("joomlatools/docman"),
                &Package::new("joomlatools/docman-next"),
            )
            .unwrap();
        assert!(outcome.is_completed());
    }

    assert!(!env.paths().is_defined(PathConstant::Component));
    assert_eq!(
        env.application().unwrap().calls(),
        vec![HostCall::Update("tmp/joomlatools/docman-next".to_string())]
    );
}

//! Integration tests for module loading.
//!
//! Covers resolution, idempotent loads, batch loads, route merging and the
//! unload behaviour against an in-memory file system.

use fuelkit_core::adapters::Collaborators;
use fuelkit_core::adapters::router::Route;
use fuelkit_core::adapters::fs_mock::MockFsAdapter;
use fuelkit_core::extension::display_dir;
use fuelkit_core::{ExtensionKind, FuelConfig, FuelError, LoadEntry, ModuleManager};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn setup(roots: &[&str], dirs: &[&str], module_routes: bool) -> (ModuleManager, MockFsAdapter) {
    let fs = MockFsAdapter::new();
    for dir in dirs {
        fs.add_dir(dir);
    }
    let mut config = FuelConfig::new(PathBuf::from("/app"));
    config.module_paths = roots.iter().map(PathBuf::from).collect();
    config.routing.module_routes = module_routes;

    let collaborators = Collaborators::with_fs(Arc::new(fs.clone()), vec![]);
    (ModuleManager::new(&config, collaborators), fs)
}

fn route_names(modules: &ModuleManager) -> Vec<String> {
    modules
        .collaborators()
        .router
        .routes()
        .into_iter()
        .map(|r| r.name)
        .collect()
}

#[test]
fn test_load_blog_from_search_root() {
    let (mut modules, _fs) = setup(&["/ext/"], &["/ext/blog/"], false);

    assert!(modules.load("blog", None).unwrap());

    let path = modules.path_of("blog").unwrap();
    assert_eq!(display_dir(&path), "/ext/blog/");
    assert_eq!(
        modules.collaborators().binder.namespace_path("\\Blog"),
        Some(PathBuf::from("/ext/blog/classes"))
    );
}

#[test]
fn test_second_load_is_noop() {
    let (mut modules, fs) = setup(&["/ext/"], &["/ext/blog"], false);

    assert!(modules.load("blog", None).unwrap());
    fs.add_dir("/elsewhere/blog");
    assert!(!modules.load("blog", Some(Path::new("/elsewhere/blog"))).unwrap());
    assert!(!modules.load("BLOG", None).unwrap());

    assert_eq!(modules.loaded().len(), 1);
    assert_eq!(modules.path_of("blog"), Some(PathBuf::from("/ext/blog")));
}

#[test]
fn test_missing_module_is_not_found_and_registry_unchanged() {
    let (mut modules, _fs) = setup(&["/ext/"], &["/ext/blog"], false);
    modules.load("blog", None).unwrap();
    let before = modules.loaded();

    let err = modules.load("missing", None).unwrap_err();
    assert!(matches!(
        err,
        FuelError::NotFound { kind: ExtensionKind::Module, ref name } if name == "missing"
    ));
    assert_eq!(modules.loaded(), before);
    assert!(modules.is_unloaded("missing"));
}

#[test]
fn test_names_are_case_normalized() {
    let (mut modules, _fs) = setup(&["/ext/"], &["/ext/blog"], false);
    modules.load("BlOg", None).unwrap();

    assert!(modules.is_loaded("blog"));
    assert!(modules.is_loaded("BLOG"));
    assert_eq!(
        modules.loaded().keys().cloned().collect::<Vec<_>>(),
        vec!["Blog".to_string()]
    );
}

#[test]
fn test_search_roots_in_order() {
    let (mut modules, _fs) = setup(
        &["/app/modules/", "/shared/modules/"],
        &["/shared/modules/shop", "/app/modules/blog", "/shared/modules/blog"],
        false,
    );

    modules.load_many(["blog", "shop"]).unwrap();
    assert_eq!(modules.path_of("blog"), Some(PathBuf::from("/app/modules/blog")));
    assert_eq!(modules.path_of("shop"), Some(PathBuf::from("/shared/modules/shop")));
}

#[test]
fn test_load_many_with_paths_equals_individual_loads() {
    let (mut batch, _fs) = setup(&[], &["/x/a", "/y/b"], false);
    let (mut single, _fs2) = setup(&[], &["/x/a", "/y/b"], false);

    let batch_result = batch
        .load_many([("a", Path::new("/x/a/")), ("b", Path::new("/y/b"))])
        .unwrap();
    let single_result = single.load("a", Some(Path::new("/x/a/"))).unwrap()
        && single.load("b", Some(Path::new("/y/b"))).unwrap();

    assert!(batch_result);
    assert_eq!(batch_result, single_result);
    assert_eq!(batch.loaded(), single.loaded());
}

#[test]
fn test_load_many_is_false_if_any_already_loaded() {
    let (mut modules, _fs) = setup(&["/ext/"], &["/ext/a", "/ext/b"], false);
    modules.load("a", None).unwrap();

    let result = modules
        .load_many(vec![LoadEntry::named("a"), LoadEntry::named("b")])
        .unwrap();

    assert!(!result);
    assert!(modules.is_loaded("b"), "entries after a no-op still load");
}

#[test]
fn test_load_many_propagates_not_found() {
    let (mut modules, _fs) = setup(&["/ext/"], &["/ext/a"], false);
    let result = modules.load_many(["a", "ghost"]);

    assert!(matches!(result, Err(FuelError::NotFound { .. })));
    assert!(modules.is_loaded("a"));
}

#[test]
fn test_module_routes_merged_ahead_of_app_routes() {
    let (mut modules, fs) = setup(&["/ext/"], &[], true);
    fs.add_file(
        "/ext/blog/config/routes.toml",
        "_root_ = \"blog/index\"\nabout = \"blog/about\"\n_404_ = \"blog/missing\"\n",
    );
    modules
        .collaborators()
        .router
        .add(vec![Route::new("_root_", "welcome/index")], false);

    modules.load("blog", None).unwrap();

    assert_eq!(
        route_names(&modules),
        vec!["blog", "blog/about", "_404_", "_root_"]
    );
}

#[test]
fn test_routes_not_merged_when_disabled() {
    let (mut modules, fs) = setup(&["/ext/"], &[], false);
    fs.add_file("/ext/blog/config/routes.toml", "about = \"blog/about\"\n");

    modules.load("blog", None).unwrap();
    assert!(route_names(&modules).is_empty());
}

#[test]
fn test_broken_route_file_leaves_registry_unchanged() {
    let (mut modules, fs) = setup(&["/ext/"], &[], true);
    fs.add_file("/ext/blog/config/routes.toml", "about = 12\n");

    let err = modules.load("blog", None).unwrap_err();
    assert!(matches!(err, FuelError::InvalidRoute { .. }));
    assert!(modules.is_unloaded("blog"));
    assert!(modules.collaborators().binder.namespace_path("Blog").is_none());
}

#[test]
fn test_unload_removes_exactly_module_routes() {
    let (mut modules, fs) = setup(&["/ext/"], &[], true);
    fs.add_file("/ext/blog/config/routes.toml", "about = \"blog/about\"\n");
    fs.add_file("/ext/shop/config/routes.toml", "cart = \"shop/cart\"\n");
    modules.load_many(["blog", "shop"]).unwrap();

    modules.unload("blog").unwrap();

    assert!(modules.is_unloaded("blog"));
    assert_eq!(route_names(&modules), vec!["shop/cart"]);
}

#[test]
fn test_unload_without_merged_routes_keeps_app_routes() {
    let (mut modules, fs) = setup(&["/ext/"], &[], false);
    fs.add_file(
        "/ext/blog/config/routes.toml",
        "_404_ = \"blog/missing\"\nabout = \"blog/about\"\n",
    );
    modules.collaborators().router.add(
        vec![
            Route::new("_404_", "welcome/404"),
            Route::new("blog/about", "pages/about"),
        ],
        false,
    );

    modules.load("blog", None).unwrap();
    modules.unload("blog").unwrap();

    assert!(modules.is_unloaded("blog"));
    assert_eq!(route_names(&modules), vec!["_404_", "blog/about"]);
    assert_eq!(
        modules.collaborators().router.get("blog/about").unwrap().target,
        "pages/about"
    );
}

#[test]
fn test_explicit_path_to_missing_directory_is_not_found() {
    let (mut modules, _fs) = setup(&["/ext/"], &["/ext/blog"], false);

    let err = modules
        .load("blog", Some(Path::new("/does/not/exist")))
        .unwrap_err();
    assert!(matches!(
        err,
        FuelError::NotFound { kind: ExtensionKind::Module, ref name } if name == "blog"
    ));
    assert!(modules.is_unloaded("blog"));
    assert!(modules.collaborators().binder.namespace_path("Blog").is_none());
}

#[test]
fn test_relative_explicit_path_is_taken_from_app_root() {
    let (mut modules, _fs) = setup(&["/ext/"], &["/app/local/blog"], false);

    assert!(modules.load("blog", Some(Path::new("local/blog"))).unwrap());
    assert_eq!(modules.path_of("blog"), Some(PathBuf::from("/app/local/blog")));
}

#[test]
fn test_unload_keeps_namespace_binding() {
    let (mut modules, _fs) = setup(&["/ext/"], &["/ext/blog"], false);
    modules.load("blog", None).unwrap();
    modules.unload("blog").unwrap();

    assert!(modules.is_unloaded("blog"));
    assert_eq!(
        modules.collaborators().binder.namespace_path("Blog"),
        Some(PathBuf::from("/ext/blog/classes"))
    );
    assert!(modules.load("blog", None).unwrap(), "reload after unload works");
}

#[test]
fn test_unload_never_loaded_is_noop() {
    let (mut modules, _fs) = setup(&["/ext/"], &["/ext/blog"], false);
    modules.load("blog", None).unwrap();
    let before = modules.loaded();

    modules.unload("never").unwrap();
    assert_eq!(modules.loaded(), before);
}

#[test]
fn test_exists_probe_is_read_only() {
    let (mut modules, _fs) = setup(&["/ext/", "/more/"], &["/more/blog", "/custom/blog"], false);

    assert_eq!(modules.exists("blog"), Some(PathBuf::from("/more/blog")));
    assert!(modules.is_unloaded("blog"));
    assert!(modules.exists("ghost").is_none());

    modules.load("blog", Some(Path::new("/custom/blog"))).unwrap();
    assert_eq!(modules.exists("blog"), Some(PathBuf::from("/custom/blog")));
}

#[test]
fn test_empty_name_is_rejected() {
    let (mut modules, _fs) = setup(&["/ext/"], &["/ext"], false);
    assert!(matches!(
        modules.load("   ", None),
        Err(FuelError::InvalidName(_))
    ));
}

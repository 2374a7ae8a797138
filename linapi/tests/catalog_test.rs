use echo_api::{CATALOG, EchoTransport};
use linapi::catalog::{Catalog, CatalogError, ParamType};
use linapi::{CallArgs, LinodeClient};
use std::fs;

#[test]
fn test_catalog_from_path() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("api.json");
    fs::write(&path, CATALOG).expect("Failed to write catalog");

    let catalog = Catalog::from_path(&path).unwrap();

    assert_eq!(catalog.len(), 5);
    let spec = catalog.lookup("linode_update").unwrap();
    assert_eq!(spec.params[1].kind, ParamType::Boolean);
    assert!(spec.params[0].required);
    assert!(!spec.params[2].required);
}

#[test]
fn test_missing_catalog_file() {
    let dir = tempfile::tempdir().unwrap();

    let err = Catalog::from_path(dir.path().join("missing.json")).unwrap_err();

    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn test_methods_are_listed_by_name() {
    let catalog = Catalog::from_document(CATALOG).unwrap();

    let names: Vec<&str> = catalog.methods().map(|m| m.name.as_str()).collect();

    assert_eq!(
        names,
        vec![
            "domain.create",
            "domain.list",
            "domain.resource.update",
            "linode.config.create",
            "linode.update",
        ]
    );
}

#[test]
fn test_builtin_catalog_names_are_canonical() {
    let catalog = Catalog::builtin().unwrap();

    for method in catalog.methods() {
        assert_eq!(method.name, method.name.to_lowercase());
        assert!(!method.name.contains('_'), "'{}' is not canonical", method.name);
    }
}

#[tokio::test]
async fn test_client_over_loaded_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("api.json");
    fs::write(&path, CATALOG).unwrap();

    let transport = EchoTransport::new();
    let recorder = transport.recorder();
    let catalog = Catalog::from_path(&path).unwrap();
    let mut client = LinodeClient::from_transport("test-key", false, catalog, transport).unwrap();

    client.invoke("domain.list", CallArgs::none()).await.unwrap();

    assert_eq!(recorder.count(), 1);
}

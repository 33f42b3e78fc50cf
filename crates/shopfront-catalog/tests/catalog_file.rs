//! End-to-end: catalog file on disk → Store → orders.

use std::fs;

use shopfront_catalog::{init_tracing, CatalogConfig, CatalogError};
use shopfront_core::{CoreError, LineItem, Money};

const CATALOG: &str = r#"
[store]
name = "Electronics Outlet"

[[promotions]]
name = "Second Half price!"
kind = "second_half_price"

[[promotions]]
name = "30% off!"
kind = "percent_discount"
percent = 30.0

[[products]]
name = "MacBook Air M2"
price_cents = 145000
quantity = 100
promotion = "Second Half price!"

[[products]]
name = "Google Pixel 7"
price_cents = 50000
quantity = 2
promotion = "30% off!"

[[products]]
name = "Shipping"
kind = "limited"
price_cents = 1000
quantity = 250
maximum = 1
"#;

#[test]
fn test_load_toml_catalog_and_order() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, CATALOG).unwrap();

    let store = CatalogConfig::load(Some(path)).unwrap().build_store().unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(store.get_total_quantity(), 352);

    let mac = store.find_by_name("MacBook Air M2").unwrap();
    let pixel = store.find_by_name("Google Pixel 7").unwrap();
    let shipping = store.find_by_name("Shipping").unwrap();

    let total = store
        .order(vec![
            LineItem::new(&mac, 3),
            LineItem::new(&pixel, 2),
            LineItem::new(&shipping, 1),
        ])
        .unwrap();
    // (1450 + 725 + 1450) + 1000 × 0.7 + 10
    assert_eq!(total, Money::from_major_minor(4335, 0));

    // Pixel sold out: gone from the active listing
    assert!(!pixel.is_active());
    assert_eq!(store.get_all_products().len(), 2);
    assert_eq!(store.get_total_quantity(), 97 + 249);
}

#[test]
fn test_partial_order_failure_keeps_earlier_lines() {
    let store = CatalogConfig::from_toml_str(CATALOG)
        .unwrap()
        .build_store()
        .unwrap();
    let mac = store.find_by_name("MacBook Air M2").unwrap();
    let shipping = store.find_by_name("Shipping").unwrap();

    let err = store.order([(&mac, 1), (&shipping, 5)]).unwrap_err();
    assert!(matches!(err, CoreError::ExceedsOrderLimit { .. }));
    assert_eq!(mac.quantity(), 99);
    assert_eq!(shipping.quantity(), 250);
}

#[test]
fn test_load_json_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r#"{
            "products": [
                { "name": "Windows License", "kind": "non_stocked", "price_cents": 12500 }
            ]
        }"#,
    )
    .unwrap();

    let store = CatalogConfig::load(Some(path)).unwrap().build_store().unwrap();
    let license = store.find_by_name("Windows License").unwrap();
    assert_eq!(license.buy(4).unwrap(), Money::from_major_minor(500, 0));
    assert_eq!(store.get_total_quantity(), 0);
    assert_eq!(store.get_all_products().len(), 1);
}

#[test]
fn test_missing_file_yields_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let config = CatalogConfig::load(Some(dir.path().join("absent.toml"))).unwrap();
    assert!(config.products.is_empty());
    assert!(config.build_store().unwrap().is_empty());
}

#[test]
fn test_malformed_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, "[[products]]\nname = 42\n").unwrap();

    assert!(matches!(
        CatalogConfig::load(Some(path.clone())).unwrap_err(),
        CatalogError::TomlParse(_)
    ));
    assert!(CatalogConfig::load_or_default(Some(path)).products.is_empty());
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("catalog.toml");

    let config = CatalogConfig::builtin();
    config.save(&path).unwrap();

    let reloaded = CatalogConfig::from_file(&path).unwrap();
    assert_eq!(reloaded.products, config.products);
    assert_eq!(reloaded.promotions, config.promotions);
}

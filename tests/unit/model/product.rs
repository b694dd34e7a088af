use shopfront::error::AppErrorCode;
use shopfront::model::{ProductCatalogModel, StockProjection};

use crate::ut_setup_catalog_entries;

fn ut_setup_catalog(data: Vec<(u64, u32, &str, i64, u32, bool)>) -> ProductCatalogModel {
    let mut catalog = ProductCatalogModel::new();
    ut_setup_catalog_entries(data)
        .into_iter()
        .map(|e| catalog.upsert(e))
        .count();
    catalog
}

#[test]
fn projection_decrements_once() {
    let mut catalog = ut_setup_catalog(vec![(140, 21, "red rice", 9500, 3, true)]);
    let result = catalog.project_stock_decrement(140);
    assert_eq!(result.unwrap(), StockProjection::InStock(2));
    assert_eq!(catalog.get(140).unwrap().stock, 2);
}

#[test]
fn projection_clamps_at_zero() {
    let mut catalog = ut_setup_catalog(vec![(140, 21, "red rice", 9500, 1, false)]);
    let result = catalog.project_stock_decrement(140);
    assert_eq!(result.unwrap(), StockProjection::SoldOut);
    assert_eq!(catalog.get(140).unwrap().stock, 0);
    // one more add past the displayed stock never goes negative
    let result = catalog.project_stock_decrement(140);
    assert_eq!(result.unwrap(), StockProjection::SoldOut);
    assert_eq!(catalog.get(140).unwrap().stock, 0);
}

#[test]
fn projection_unknown_product_error() {
    let mut catalog = ut_setup_catalog(vec![(140, 21, "red rice", 9500, 3, false)]);
    let result = catalog.project_stock_decrement(999);
    let e = result.unwrap_err();
    assert_eq!(e.code, AppErrorCode::ProductNotExist);
}

#[test]
fn derived_views_observe_single_decrement() {
    let mut catalog = ut_setup_catalog(vec![
        (140, 21, "red rice", 9500, 4, true),
        (141, 21, "mung beans", 6200, 7, false),
        (152, 23, "sweet corn", 4800, 2, true),
    ]);
    let _ = catalog.project_stock_decrement(140).unwrap();
    // both selectors read through the same keyed entry, the decrement
    // is never applied twice
    let bests = catalog.best_sellers();
    assert_eq!(bests.len(), 2);
    assert_eq!(bests[0].id_, 140);
    assert_eq!(bests[0].stock, 3);
    let all = catalog.all();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].stock, 3);
    assert_eq!(all[1].stock, 7);
}

#[test]
fn reconcile_discards_projection() {
    let mut catalog = ut_setup_catalog(vec![(140, 21, "red rice", 9500, 4, false)]);
    let _ = catalog.project_stock_decrement(140).unwrap();
    assert_eq!(catalog.get(140).unwrap().stock, 3);
    let authoritative = ut_setup_catalog_entries(vec![(140, 21, "red rice", 9500, 1, false)]);
    catalog.reconcile(authoritative);
    assert_eq!(catalog.get(140).unwrap().stock, 1);
    assert_eq!(catalog.num_entries(), 1);
}

use rust_decimal::Decimal;

use shopfront::api::dto::{CartDto, CartLineDto};
use shopfront::model::CartModel;

use super::ut_setup_sync_items;

#[test]
fn add_repeated_product_merges_quantity() {
    let items = ut_setup_sync_items(vec![(140, 21, "red rice", 9500)]);
    let mut cart = CartModel::new(501);
    cart.add_item(&items[0]);
    cart.add_item(&items[0]);
    assert_eq!(cart.num_lines(), 1);
    let line = &cart.lines()[0];
    assert_eq!(line.product_id, 140);
    assert_eq!(line.quantity, 2);
}

#[test]
fn add_preserves_insertion_order() {
    let items = ut_setup_sync_items(vec![
        (140, 21, "red rice", 9500),
        (141, 21, "mung beans", 6200),
    ]);
    let mut cart = CartModel::new(501);
    cart.add_item(&items[0]);
    cart.add_item(&items[1]);
    cart.add_item(&items[0]);
    assert_eq!(cart.num_lines(), 2);
    assert_eq!(cart.lines()[0].product_id, 140);
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.lines()[1].product_id, 141);
    assert_eq!(cart.lines()[1].quantity, 1);
}

#[test]
fn subtotal_sums_price_times_quantity() {
    let items = ut_setup_sync_items(vec![
        (140, 21, "red rice", 10000),
        (141, 21, "mung beans", 5000),
    ]);
    let mut cart = CartModel::new(501);
    cart.add_item(&items[0]);
    cart.add_item(&items[0]);
    cart.add_item(&items[1]);
    assert_eq!(cart.subtotal(), Decimal::new(25000, 2));
}

#[test]
fn clear_then_restore_brings_lines_back() {
    let items = ut_setup_sync_items(vec![
        (140, 21, "red rice", 9500),
        (141, 21, "mung beans", 6200),
    ]);
    let mut cart = CartModel::new(501);
    cart.add_item(&items[0]);
    cart.add_item(&items[1]);
    let snapshot = cart.clear();
    assert!(cart.is_empty());
    assert_eq!(snapshot.num_lines(), 2);
    cart.restore(snapshot);
    assert_eq!(cart.num_lines(), 2);
    assert_eq!(cart.lines()[0].product_id, 140);
    assert_eq!(cart.lines()[1].product_id, 141);
}

#[test]
fn replace_from_overwrites_optimistic_lines() {
    let items = ut_setup_sync_items(vec![(140, 21, "red rice", 9500)]);
    let mut cart = CartModel::new(501);
    cart.add_item(&items[0]);
    let snapshot = CartDto {
        lines: vec![CartLineDto {
            product_id: 152,
            seller_id: 23,
            name: "sweet corn".to_string(),
            description: "crop product sweet corn".to_string(),
            price: Decimal::new(4800, 2),
            image: "img-152.jpg".to_string(),
            quantity: 3,
        }],
    };
    cart.replace_from(snapshot);
    assert_eq!(cart.num_lines(), 1);
    assert_eq!(cart.lines()[0].product_id, 152);
    assert_eq!(cart.lines()[0].quantity, 3);
}

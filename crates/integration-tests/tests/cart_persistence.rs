//! Integration tests for file-backed cart persistence.
//!
//! These tests drive the cart through `FileStorage` in a temporary directory
//! and reload it from disk to check write-through and recovery behaviour.

use std::sync::Arc;

use driftwear_core::ProductId;
use driftwear_integration_tests::{ReadOnlyStorage, UnreadableStorage, item};
use driftwear_storefront::storage::{FileStorage, KeyValueStore};
use driftwear_storefront::{CartOutcome, CartStore, PricingPolicy, StoreConfig, StorefrontSession};
use rust_decimal::Decimal;

fn open(dir: &std::path::Path) -> CartStore<FileStorage> {
    CartStore::load(FileStorage::new(dir), "cart", PricingPolicy::default())
}

// =============================================================================
// Round-trip Tests
// =============================================================================

#[test]
fn test_reload_preserves_lines_and_order() {
    let dir = tempfile::tempdir().expect("failed to create tmpdir");
    let mut cart = open(dir.path());

    cart.add_item(item("P3", 12, 5).with_size("S"), 2);
    cart.add_item(item("P1", 20, 3).with_color("black"), 1);
    cart.add_item(
        item("P2", 45, 10)
            .with_size("XL")
            .with_color("olive")
            .with_image("/img/p2.webp"),
        4,
    );

    let reloaded = open(dir.path());
    assert_eq!(reloaded.lines(), cart.lines());
    assert_eq!(reloaded.totals(), cart.totals());
}

#[test]
fn test_decimal_prices_survive_reload() {
    let dir = tempfile::tempdir().expect("failed to create tmpdir");
    let mut cart = open(dir.path());
    cart.add_item(
        driftwear_storefront::models::CartItem::new("P1", "Socks", Decimal::new(799, 2), 9),
        3,
    );

    let reloaded = open(dir.path());
    assert_eq!(reloaded.subtotal(), Decimal::new(2397, 2));
}

#[test]
fn test_every_mutation_writes_through() {
    let dir = tempfile::tempdir().expect("failed to create tmpdir");
    let mut cart = open(dir.path());
    let id = ProductId::new("P1");

    cart.add_item(item("P1", 20, 3), 2);
    assert_eq!(open(dir.path()).count(), 2);

    cart.update_quantity(&id, 1, None, None);
    assert_eq!(open(dir.path()).count(), 1);

    cart.remove_item(&id, None, None);
    assert!(open(dir.path()).is_empty());
}

#[test]
fn test_slot_file_is_versioned_json() {
    let dir = tempfile::tempdir().expect("failed to create tmpdir");
    let mut cart = open(dir.path());
    cart.add_item(item("P1", 20, 3), 2);

    let raw = std::fs::read_to_string(dir.path().join("cart.json")).expect("slot file");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(value["version"], 1);
    assert_eq!(value["items"][0]["productId"], "P1");
    assert_eq!(value["items"][0]["quantity"], 2);
    assert_eq!(value["items"][0]["stockLimit"], 3);
}

// =============================================================================
// Recovery Tests
// =============================================================================

#[test]
fn test_corrupted_slot_starts_empty() {
    let dir = tempfile::tempdir().expect("failed to create tmpdir");
    std::fs::write(dir.path().join("cart.json"), "{\"version\": 1, \"items\": [oops")
        .expect("write fixture");

    let mut cart = open(dir.path());
    assert!(cart.is_empty());

    cart.add_item(item("P1", 20, 3), 1);
    assert_eq!(open(dir.path()).count(), 1);
}

#[test]
fn test_legacy_browser_payload_loads() {
    let dir = tempfile::tempdir().expect("failed to create tmpdir");
    let legacy = r#"[
        {"productId":"P1","name":"Tee","unitPrice":20,"imageRef":"/t.webp","quantity":2,"size":"M","stockLimit":3},
        {"productId":"P2","name":"Cap","unitPrice":15,"quantity":1,"stockLimit":8}
    ]"#;
    std::fs::write(dir.path().join("cart.json"), legacy).expect("write fixture");

    let cart = open(dir.path());
    assert_eq!(cart.lines().len(), 2);
    assert_eq!(cart.count(), 3);
    assert_eq!(cart.subtotal(), Decimal::from(55));
    assert_eq!(cart.lines()[0].size.as_deref(), Some("M"));
}

#[test]
fn test_future_version_starts_empty() {
    let dir = tempfile::tempdir().expect("failed to create tmpdir");
    std::fs::write(
        dir.path().join("cart.json"),
        r#"{"version":99,"savedAt":"2030-01-01T00:00:00Z","items":[]}"#,
    )
    .expect("write fixture");

    assert!(open(dir.path()).is_empty());
}

#[test]
fn test_unreadable_backend_starts_empty() {
    let cart = CartStore::load(UnreadableStorage, "cart", PricingPolicy::default());
    assert!(cart.is_empty());
    assert_eq!(cart.count(), 0);
}

#[test]
fn test_failed_write_keeps_in_memory_state() {
    let storage = Arc::new(ReadOnlyStorage::default());
    let mut cart = CartStore::load(Arc::clone(&storage), "cart", PricingPolicy::default());

    let outcome = cart.add_item(item("P1", 20, 3), 2);

    assert!(outcome.is_change());
    assert_eq!(cart.count(), 2);
    assert_eq!(storage.rejected_writes(), 1);
}

#[test]
fn test_clear_overwrites_corrupted_slot() {
    let dir = tempfile::tempdir().expect("failed to create tmpdir");
    std::fs::write(dir.path().join("cart.json"), "garbage").expect("write fixture");

    let mut cart = open(dir.path());
    assert_eq!(cart.clear(), CartOutcome::Cleared);

    let raw = FileStorage::new(dir.path())
        .read("cart")
        .expect("read")
        .expect("slot written");
    assert!(raw.contains("\"items\":[]"));
}

// =============================================================================
// Session Tests
// =============================================================================

#[test]
fn test_session_uses_configured_slots_and_pricing() {
    let dir = tempfile::tempdir().expect("failed to create tmpdir");
    let config = StoreConfig {
        cart_slot: "guest-cart".to_string(),
        pricing: PricingPolicy {
            tax_rate: Decimal::ZERO,
            free_shipping_threshold: Decimal::from(30),
            flat_shipping: Decimal::from(5),
        },
        ..StoreConfig::default()
    };
    let storage = Arc::new(FileStorage::new(dir.path()));

    let mut session = StorefrontSession::open(Arc::clone(&storage), &config);
    session.cart_mut().add_item(item("P1", 20, 3), 2);

    assert!(dir.path().join("guest-cart.json").exists());
    assert_eq!(session.cart().shipping(), Decimal::ZERO);
    assert_eq!(session.cart().grand_total(), Decimal::from(40));

    let reopened = StorefrontSession::open(storage, &config);
    assert_eq!(reopened.cart().count(), 2);
}

//! Integration tests for file-backed wishlist persistence.

use std::sync::{Arc, Mutex};

use driftwear_core::ProductId;
use driftwear_integration_tests::{ReadOnlyStorage, entry};
use driftwear_storefront::WishlistStore;
use driftwear_storefront::services::WishlistView;
use driftwear_storefront::storage::FileStorage;

fn open(dir: &std::path::Path) -> WishlistStore<FileStorage> {
    WishlistStore::load(FileStorage::new(dir), "wishlist")
}

#[test]
fn test_reload_preserves_entries_and_order() {
    let dir = tempfile::tempdir().expect("failed to create tmpdir");
    let mut wishlist = open(dir.path());

    wishlist.add_item(entry("P2", 60).with_brand("Driftwear").with_sizes(["M", "L"]));
    wishlist.add_item(entry("P1", 30).with_colors(["sand"]).with_image("/p1.webp"));
    wishlist.add_item(entry("P3", 90));

    let reloaded = open(dir.path());
    assert_eq!(reloaded.entries(), wishlist.entries());
    let ids: Vec<&str> = reloaded.entries().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["P2", "P1", "P3"]);
}

#[test]
fn test_duplicate_add_is_noop_on_disk() {
    let dir = tempfile::tempdir().expect("failed to create tmpdir");
    let mut wishlist = open(dir.path());

    assert!(wishlist.add_item(entry("P1", 30)));
    assert!(!wishlist.add_item(entry("P1", 30)));

    assert_eq!(open(dir.path()).count(), 1);
}

#[test]
fn test_remove_and_clear_write_through() {
    let dir = tempfile::tempdir().expect("failed to create tmpdir");
    let mut wishlist = open(dir.path());
    wishlist.add_item(entry("P1", 30));
    wishlist.add_item(entry("P2", 40));

    wishlist.remove_item(&ProductId::new("P1"));
    let reloaded = open(dir.path());
    assert!(!reloaded.contains(&ProductId::new("P1")));
    assert!(reloaded.contains(&ProductId::new("P2")));

    wishlist.clear();
    assert!(open(dir.path()).is_empty());
}

#[test]
fn test_unparseable_slot_starts_empty() {
    let dir = tempfile::tempdir().expect("failed to create tmpdir");
    std::fs::write(dir.path().join("wishlist.json"), "\u{0}\u{1}binary").expect("write fixture");

    let wishlist = open(dir.path());
    assert!(wishlist.is_empty());
    assert_eq!(wishlist.count(), 0);
}

#[test]
fn test_failed_write_still_notifies() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let storage = Arc::new(ReadOnlyStorage::with_slot("wishlist", "[]"));
    let mut wishlist = WishlistStore::load(Arc::clone(&storage), "wishlist");

    let sink = Arc::clone(&seen);
    wishlist.subscribe(move |view: &WishlistView| {
        if let Ok(mut seen) = sink.lock() {
            seen.push(view.count);
        }
    });

    assert!(wishlist.toggle(entry("P1", 30)));
    assert!(!wishlist.toggle(entry("P1", 30)));

    assert_eq!(storage.rejected_writes(), 2);
    assert_eq!(*seen.lock().expect("lock"), vec![1, 0]);
}

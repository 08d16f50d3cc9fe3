//! Full preview -> review -> apply cycle against the in-memory store.
//!
//! Covers: classification and stock flows, partial failure isolation,
//! idempotent retry, and the report shape handed to the admin layer.

use std::sync::Arc;
use std::time::Duration;

use stockwise_core::ProductId;
use stockwise_infra::{
    ApplyConfig, FaultInjectingStore, InMemoryProductStore, ProductStore, ReconcileEngine,
};
use stockwise_products::{Product, TagSet};

type Store = FaultInjectingStore<InMemoryProductStore>;

fn catalog() -> Vec<Product> {
    [
        "Lavender Dreams Soy Candle",
        "Vanilla Bean Beeswax Candle",
        "Sandalwood Reed Diffuser",
        "Lemon & Mint Room Spray",
        "Pumpkin Spice Wax Melt",
    ]
    .into_iter()
    .enumerate()
    .map(|(i, title)| Product::new(ProductId::new(), title).with_inventory_quantity(i as u64 * 2))
    .collect()
}

fn setup(products: &[Product]) -> (Arc<Store>, ReconcileEngine<Store>) {
    stockwise_observability::init();
    let store = Arc::new(FaultInjectingStore::new(InMemoryProductStore::with_products(
        products.iter().cloned(),
    )));
    let engine = ReconcileEngine::new(Arc::clone(&store)).with_apply_config(
        ApplyConfig::default()
            .with_max_concurrent(2)
            .with_write_timeout(Duration::from_secs(2)),
    );
    (store, engine)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn partial_failure_is_isolated_and_retry_is_safe() {
    let products = catalog();
    let (store, engine) = setup(&products);
    let broken = products[2].id_typed();
    store.fail_writes_for(broken, "row locked");

    let batch = engine.generate_classification_preview(None).await.unwrap();
    assert_eq!(batch.change_count(), 5);

    let report = engine.apply_changes(&batch.approve_all()).await;
    assert_eq!(report.success_count, 4);
    assert_eq!(report.error_count, 1);

    for p in &products {
        let stored = store.get_by_id(p.id_typed()).await.unwrap();
        if p.id_typed() == broken {
            assert_eq!(stored.product_type(), None);
        } else {
            assert!(stored.product_type().is_some());
        }
    }

    // Re-applying the same batch after healing: the already-written items
    // rewrite identical values, the broken one finally lands.
    store.heal(broken);
    let retry = engine.apply_changes(&batch.approve_all()).await;
    assert_eq!(retry.error_count, 0);
    let after_retry = store.get_all().await.unwrap();

    let again = engine.generate_classification_preview(None).await.unwrap();
    assert_eq!(again.change_count(), 0);
    assert_eq!(store.get_all().await.unwrap(), after_retry);

    let diffuser = store.get_by_id(broken).await.unwrap();
    assert_eq!(diffuser.product_type(), Some("DIFFUSER"));
    let expected: TagSet = ["diffuser", "home-fragrance", "woody"].into_iter().collect();
    assert_eq!(diffuser.tags(), &expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stock_flow_clamps_and_applies_selected_lines() {
    let products = catalog();
    let (store, engine) = setup(&products);
    let ids: Vec<ProductId> = products.iter().map(Product::id_typed).collect();

    let mut session = engine.open_stock_session(Some(&ids[..3])).await.unwrap();
    assert_eq!(session.len(), 3);
    session.adjust(ids[1], -100).unwrap();
    session.set_absolute(ids[2], -3).unwrap();
    session.increment(ids[0], 5).unwrap();

    let batch = engine.generate_stock_preview(&session).await.unwrap();
    let proposed: Vec<u64> = batch.items().iter().map(|i| i.proposed().quantity).collect();
    assert_eq!(proposed, vec![5, 0, 0]);

    let report = engine.apply_changes(&batch.select(&ids[1..3])).await;
    assert_eq!(report.success_count, 2);

    assert_eq!(store.get_by_id(ids[0]).await.unwrap().inventory_quantity(), 0);
    assert_eq!(store.get_by_id(ids[1]).await.unwrap().inventory_quantity(), 0);
    assert_eq!(store.get_by_id(ids[2]).await.unwrap().inventory_quantity(), 0);
    assert_eq!(store.write_attempts(ids[0]), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn report_serializes_for_the_admin_layer() {
    let products = catalog();
    let (store, engine) = setup(&products);
    store.fail_writes_for(products[0].id_typed(), "quota exceeded");

    let batch = engine.generate_classification_preview(Some(&[products[0].id_typed()][..])).await.unwrap();
    let report = engine.apply_changes(batch.items()).await;

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["success_count"], 0);
    assert_eq!(json["error_count"], 1);
    assert_eq!(json["outcomes"][0]["success"], false);
    assert_eq!(
        json["outcomes"][0]["error"],
        "write failed: write rejected: quota exceeded"
    );

    let preview = serde_json::to_value(&batch).unwrap();
    assert_eq!(preview["items"][0]["has_changes"], true);
    assert_eq!(preview["items"][0]["proposed"]["product_type"], "SOY_CANDLE");
}

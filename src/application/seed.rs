//! Demo data for a fresh install
//!
//! Seeds a small catalog, three customers and three orders, but only when
//! the catalog is still empty.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use tracing::info;

use super::orders::{CreateOrderCommand, OrderLineRequest, OrderService};
use crate::domain::{
    CustomerDraft, DomainResult, OrderStatus, RepositoryProvider, ServiceCategory,
    ServiceItemDraft, TransitionPolicy,
};

const CATALOG: [(&str, ServiceCategory, i64, &str); 5] = [
    ("Wash & Fold", ServiceCategory::Wash, 1500, "KG"),
    ("Dry Cleaning", ServiceCategory::DryClean, 3000, "PIECE"),
    ("Iron Only", ServiceCategory::Iron, 500, "PIECE"),
    ("Wash & Iron", ServiceCategory::WashAndIron, 2000, "KG"),
    ("Special Care (Delicates)", ServiceCategory::SpecialCare, 5000, "PIECE"),
];

/// Returns `false` when the catalog already had entries.
pub async fn seed_demo_data(repos: Arc<dyn RepositoryProvider>) -> DomainResult<bool> {
    if repos.service_items().count().await? > 0 {
        info!("Catalog not empty, skipping demo data");
        return Ok(false);
    }

    info!("🧺 Seeding FreshPress demo data...");

    let mut items = Vec::with_capacity(CATALOG.len());
    for (name, category, price, unit) in CATALOG {
        let item = repos
            .service_items()
            .create(ServiceItemDraft {
                name: name.to_string(),
                category,
                price_per_unit: Decimal::from(price),
                unit_type: unit.to_string(),
            })
            .await?;
        items.push(item);
    }
    let (wash_fold, dry_clean, iron_only, wash_iron) = (&items[0], &items[1], &items[2], &items[3]);

    let customers = repos.customers();
    let amara = customers
        .create(CustomerDraft {
            name: "Amara Okafor".into(),
            phone: "+2348012345678".into(),
            email: Some("amara@email.com".into()),
            address: Some("12 Aba Road, Uyo".into()),
        })
        .await?;
    let emeka = customers
        .create(CustomerDraft {
            name: "Emeka Nwosu".into(),
            phone: "+2348098765432".into(),
            email: Some("emeka@email.com".into()),
            address: Some("45 Ikot Ekpene Rd, Uyo".into()),
        })
        .await?;
    let funke = customers
        .create(CustomerDraft {
            name: "Funke Adeyemi".into(),
            phone: "+2349011223344".into(),
            email: None,
            address: Some("8 Wellington Bassey Way, Uyo".into()),
        })
        .await?;

    // Seeded statuses are written directly, whatever policy is configured.
    let orders = OrderService::new(repos.clone(), TransitionPolicy::Unrestricted);
    let now = Utc::now();
    let line = |service_item_id: i32, quantity: i32| OrderLineRequest {
        service_item_id,
        quantity,
        notes: None,
    };

    let first = orders
        .create_order(CreateOrderCommand {
            customer_id: amara.id,
            pickup_date: Some(now - Duration::days(2)),
            delivery_date: Some(now + Duration::days(1)),
            notes: Some("Handle with care, silk items included".into()),
            items: vec![line(wash_fold.id, 3), line(dry_clean.id, 2)],
        })
        .await?;
    orders.update_status(first.id, OrderStatus::Processing).await?;

    orders
        .create_order(CreateOrderCommand {
            customer_id: emeka.id,
            pickup_date: Some(now),
            delivery_date: Some(now + Duration::days(3)),
            notes: None,
            items: vec![line(wash_iron.id, 5)],
        })
        .await?;

    let third = orders
        .create_order(CreateOrderCommand {
            customer_id: funke.id,
            pickup_date: Some(now - Duration::days(5)),
            delivery_date: Some(now - Duration::days(2)),
            notes: None,
            items: vec![line(iron_only.id, 10)],
        })
        .await?;
    orders.update_status(third.id, OrderStatus::Delivered).await?;

    info!(
        services = items.len(),
        customers = 3,
        orders = 3,
        "Demo data seeded"
    );
    Ok(true)
}

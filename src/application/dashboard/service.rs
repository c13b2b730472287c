//! Dashboard aggregation
//!
//! Each figure is an independent query; the numbers are not taken from a
//! single snapshot and may disagree slightly under concurrent writes.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{DomainResult, OrderStatus, RepositoryProvider};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_orders: u64,
    pub total_customers: u64,
    /// Sum of totals over delivered orders
    pub total_revenue: Decimal,
    pub pending_orders: u64,
    pub processing_orders: u64,
    pub ready_orders: u64,
    pub delivered_orders: u64,
    /// Count for every status, in lifecycle order
    pub status_breakdown: Vec<(OrderStatus, u64)>,
}

impl DashboardStats {
    pub fn count_for(&self, status: OrderStatus) -> u64 {
        self.status_breakdown
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }
}

pub struct DashboardService {
    repos: Arc<dyn RepositoryProvider>,
}

impl DashboardService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn compute_stats(&self) -> DomainResult<DashboardStats> {
        let orders = self.repos.orders();

        let total_orders = orders.count().await?;
        let total_customers = self.repos.customers().count().await?;
        let total_revenue = orders.sum_total_by_status(OrderStatus::Delivered).await?;

        let mut status_breakdown = Vec::with_capacity(OrderStatus::ALL.len());
        for status in OrderStatus::ALL {
            status_breakdown.push((status, orders.count_by_status(status).await?));
        }

        let mut stats = DashboardStats {
            total_orders,
            total_customers,
            total_revenue,
            pending_orders: 0,
            processing_orders: 0,
            ready_orders: 0,
            delivered_orders: 0,
            status_breakdown,
        };
        stats.pending_orders = stats.count_for(OrderStatus::Pending);
        stats.processing_orders = stats.count_for(OrderStatus::Processing);
        stats.ready_orders = stats.count_for(OrderStatus::Ready);
        stats.delivered_orders = stats.count_for(OrderStatus::Delivered);

        debug!(
            total_orders = stats.total_orders,
            revenue = %stats.total_revenue,
            "Dashboard stats computed"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::orders::{CreateOrderCommand, OrderLineRequest, OrderService};
    use crate::domain::{CustomerDraft, ServiceCategory, ServiceItemDraft, TransitionPolicy};
    use crate::infrastructure::storage::InMemoryStorage;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn empty_store_has_zero_revenue() {
        let repos = Arc::new(InMemoryStorage::new());
        let stats = DashboardService::new(repos).compute_stats().await.unwrap();
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_revenue, Decimal::ZERO);
        assert_eq!(stats.status_breakdown.len(), 6);
        assert!(stats.status_breakdown.iter().all(|(_, n)| *n == 0));
    }

    #[tokio::test]
    async fn revenue_counts_only_delivered_orders() {
        let repos = Arc::new(InMemoryStorage::new());
        let customer = repos
            .customers()
            .create(CustomerDraft {
                name: "Emeka Nwosu".into(),
                phone: "+2348098765432".into(),
                email: None,
                address: None,
            })
            .await
            .unwrap();

        let mut prices = Vec::new();
        for (name, price) in [("A", "3000.00"), ("B", "10000.00"), ("C", "5000.00")] {
            let item = repos
                .service_items()
                .create(ServiceItemDraft {
                    name: name.into(),
                    category: ServiceCategory::Wash,
                    price_per_unit: dec(price),
                    unit_type: "LOAD".into(),
                })
                .await
                .unwrap();
            prices.push(item.id);
        }

        let orders = OrderService::new(repos.clone(), TransitionPolicy::Unrestricted);
        let mut ids = Vec::new();
        for item_id in &prices {
            let order = orders
                .create_order(CreateOrderCommand {
                    customer_id: customer.id,
                    pickup_date: None,
                    delivery_date: None,
                    notes: None,
                    items: vec![OrderLineRequest {
                        service_item_id: *item_id,
                        quantity: 1,
                        notes: None,
                    }],
                })
                .await
                .unwrap();
            ids.push(order.id);
        }
        orders.update_status(ids[1], OrderStatus::Processing).await.unwrap();
        orders.update_status(ids[2], OrderStatus::Delivered).await.unwrap();

        let stats = DashboardService::new(repos).compute_stats().await.unwrap();
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.total_customers, 1);
        assert_eq!(stats.delivered_orders, 1);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.processing_orders, 1);
        assert_eq!(stats.ready_orders, 0);
        assert_eq!(stats.total_revenue, dec("5000.00"));
        assert_eq!(stats.count_for(OrderStatus::Pending), 1);
        assert_eq!(stats.count_for(OrderStatus::Cancelled), 0);
    }
}

use serde::Serialize;

use crate::domain::entities::Order;

// Inclusive date-range filter used by the order search and statistics endpoints.
#[derive(Debug, Default, Clone)]
pub struct OrderFilter {
    pub from: Option<String>,
    pub to: Option<String>,
    pub status: Option<String>,
    pub employee_id: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct OrderStatistics {
    pub orders: usize,
    pub revenue: f64,
}

impl OrderFilter {
    fn matches(&self, order: &Order) -> bool {
        // YYYY-MM-DD strings compare the same way the dates do.
        if let Some(from) = self.from.as_deref().filter(|v| !v.is_empty()) {
            if order.created_at.as_str() < from {
                return false;
            }
        }
        if let Some(to) = self.to.as_deref().filter(|v| !v.is_empty()) {
            if order.created_at.as_str() > to {
                return false;
            }
        }
        if let Some(status) = self.status.as_deref().filter(|v| !v.is_empty()) {
            if order.status != status {
                return false;
            }
        }
        if let Some(employee_id) = self.employee_id.as_deref() {
            if order.employee_id.as_deref() != Some(employee_id) {
                return false;
            }
        }
        true
    }
}

pub fn search_orders(orders: &[Order], filter: &OrderFilter) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| filter.matches(order))
        .cloned()
        .collect()
}

pub fn order_statistics(orders: &[Order], filter: &OrderFilter) -> OrderStatistics {
    let matched = search_orders(orders, filter);
    OrderStatistics {
        orders: matched.len(),
        revenue: matched.iter().map(|order| order.total).sum(),
    }
}

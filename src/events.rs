use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Events emitted after a committed state change. Sending never gates a
/// commit: failures are logged and the committed data remains authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Sales flow
    SaleRecorded {
        sales_transaction_id: Uuid,
        employee_id: Uuid,
        total_amount: Decimal,
        line_count: usize,
    },
    SaleVoided {
        sales_transaction_id: Uuid,
    },

    // Procurement flow
    PurchaseOrderCreated {
        purchase_order_id: Uuid,
        supplier_id: Uuid,
        line_count: usize,
    },
    PurchaseOrderStatusChanged {
        purchase_order_id: Uuid,
        old_status: String,
        new_status: String,
    },
    DeliveryRecorded {
        delivery_receipt_id: Uuid,
        purchase_order_id: Uuid,
        delivery_date: NaiveDate,
    },

    // Release flow
    ReleaseRecorded {
        release_record_id: Uuid,
        employee_id: Uuid,
        line_count: usize,
    },

    // Stock ledger
    MenuItemQuantityAdjusted {
        menu_item_id: Uuid,
        delta: i32,
        new_quantity: i32,
    },
    IngredientStockAdjusted {
        ingredient_id: Uuid,
        delta: Decimal,
        new_stock: Decimal,
    },
    StockBelowReorderPoint {
        ingredient_id: Uuid,
        current_stock: Decimal,
        reorder_point: Decimal,
    },

    // Party directory
    CustomerCreated(Uuid),
    EmployeeCreated(Uuid),
    SupplierCreated(Uuid),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event, surfacing the failure to the caller.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging (not propagating) any failure. Used after
    /// commits, where the database is already authoritative.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event.clone()).await {
            warn!(error = %e, ?event, "Dropping event after commit");
        }
    }
}

/// Background loop draining the event channel. Today this logs each event;
/// it is the hook point for notifications and projections.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::StockBelowReorderPoint {
                ingredient_id,
                current_stock,
                reorder_point,
            } => {
                warn!(
                    ingredient_id = %ingredient_id,
                    current_stock = %current_stock,
                    reorder_point = %reorder_point,
                    "Ingredient at or below reorder point"
                );
            }
            Event::SaleRecorded {
                sales_transaction_id,
                total_amount,
                ..
            } => {
                info!(
                    sales_transaction_id = %sales_transaction_id,
                    total_amount = %total_amount,
                    "Sale recorded"
                );
            }
            other => {
                info!("Received event: {:?}", other);
            }
        }
    }

    error!("Event channel closed; processing loop exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_or_log_swallows_closed_channel() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);
        // Must not panic or error out.
        sender.send_or_log(Event::CustomerCreated(Uuid::new_v4())).await;
    }

    #[tokio::test]
    async fn events_reach_the_channel() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);
        sender
            .send(Event::SaleVoided {
                sales_transaction_id: Uuid::new_v4(),
            })
            .await
            .unwrap();
        assert!(matches!(rx.recv().await, Some(Event::SaleVoided { .. })));
    }
}

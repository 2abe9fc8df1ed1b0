use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::{
        customer, delivery_line_item, delivery_receipt,
        delivery_receipt::DeliveryStatus,
        employee, ingredient, menu_item, purchase_order,
        purchase_order::PurchaseOrderStatus,
        purchase_order_line, release_line_item, release_record, sales_line_item,
        sales_transaction,
        sales_transaction::SalesStatus,
        supplier,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::stock_ledger,
};

// ---- request DTOs ----

#[derive(Debug, Serialize, Deserialize)]
pub struct SaleLineInput {
    pub menu_item_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RecordSaleRequest {
    pub customer_id: Option<Uuid>,
    pub employee_id: Uuid,
    #[validate(length(min = 1, message = "A sale needs at least one line item"))]
    pub items: Vec<SaleLineInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PurchaseOrderLineInput {
    pub ingredient_id: Uuid,
    pub quantity_ordered: Decimal,
    pub unit_cost: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RecordPurchaseOrderRequest {
    pub supplier_id: Uuid,
    pub order_date: Option<NaiveDate>,
    pub expected_delivery: Option<NaiveDate>,
    #[validate(length(min = 1, message = "A purchase order needs at least one line item"))]
    pub items: Vec<PurchaseOrderLineInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeliveryLineInput {
    pub ingredient_id: Uuid,
    pub quantity_received: Decimal,
    pub actual_cost: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RecordDeliveryRequest {
    pub delivery_date: Option<NaiveDate>,
    pub received_by: Option<Uuid>,
    #[validate(length(min = 1, message = "A delivery needs at least one line item"))]
    pub items: Vec<DeliveryLineInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReleaseLineInput {
    pub ingredient_id: Uuid,
    pub quantity_released: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RecordReleaseRequest {
    pub employee_id: Uuid,
    pub release_date: Option<NaiveDate>,
    pub purpose: Option<String>,
    #[validate(length(min = 1, message = "A release needs at least one line item"))]
    pub items: Vec<ReleaseLineInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

// ---- response DTOs ----

#[derive(Debug, Serialize, Deserialize)]
pub struct SalesTransactionWithLines {
    #[serde(flatten)]
    pub transaction: sales_transaction::Model,
    pub employee_name: String,
    pub customer_name: Option<String>,
    pub lines: Vec<sales_line_item::Model>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PurchaseOrderWithLines {
    #[serde(flatten)]
    pub order: purchase_order::Model,
    pub lines: Vec<purchase_order_line::Model>,
    pub delivery_receipt: Option<delivery_receipt::Model>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeliveryReceiptWithLines {
    #[serde(flatten)]
    pub receipt: delivery_receipt::Model,
    pub lines: Vec<delivery_line_item::Model>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReleaseRecordWithLines {
    #[serde(flatten)]
    pub record: release_record::Model,
    pub lines: Vec<release_line_item::Model>,
}

/// Builds multi-line transaction documents. Every `record_*` operation runs
/// inside a single database transaction so a failing line rolls back the
/// header, the sibling lines, and any stock movements already applied.
#[derive(Clone)]
pub struct TransactionComposerService {
    db: Arc<DbPool>,
    event_sender: Option<EventSender>,
}

impl TransactionComposerService {
    pub fn new(db: Arc<DbPool>, event_sender: Option<EventSender>) -> Self {
        Self { db, event_sender }
    }

    // ---- sales ----

    /// Records a completed sale: snapshots each menu item's current price,
    /// decrements availability through the stock ledger, and writes the
    /// header with the computed total. Any unknown item or shortfall aborts
    /// the whole sale.
    #[instrument(skip(self, request), fields(employee_id = %request.employee_id))]
    pub async fn record_sale(
        &self,
        request: RecordSaleRequest,
    ) -> Result<SalesTransactionWithLines, ServiceError> {
        request.validate()?;
        for line in &request.items {
            if line.quantity < 1 {
                return Err(ServiceError::ValidationError(
                    "Line quantity must be at least 1".to_string(),
                ));
            }
        }

        let txn = self.db.begin().await.map_err(ServiceError::DatabaseError)?;

        let cashier = fetch_employee(&txn, request.employee_id).await?;
        let customer = match request.customer_id {
            Some(customer_id) => Some(fetch_customer(&txn, customer_id).await?),
            None => None,
        };

        let transaction_id = Uuid::new_v4();
        let now = Utc::now();
        let mut total_amount = Decimal::ZERO;
        let mut lines = Vec::with_capacity(request.items.len());

        for line in &request.items {
            let item = menu_item::Entity::find_by_id(line.menu_item_id)
                .one(&txn)
                .await
                .map_err(ServiceError::DatabaseError)?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Menu item {} not found", line.menu_item_id))
                })?;

            stock_ledger::apply_menu_item_delta(&txn, item.id, -line.quantity).await?;

            let unit_price = item.price;
            let subtotal = unit_price * Decimal::from(line.quantity);
            total_amount += subtotal;

            let inserted = sales_line_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                sales_transaction_id: Set(transaction_id),
                menu_item_id: Set(item.id),
                quantity: Set(line.quantity),
                unit_price: Set(unit_price),
                subtotal: Set(subtotal),
            };
            lines.push(inserted);
        }

        let header = sales_transaction::ActiveModel {
            id: Set(transaction_id),
            customer_id: Set(request.customer_id),
            employee_id: Set(request.employee_id),
            transaction_date: Set(now),
            total_amount: Set(total_amount),
            status: Set(SalesStatus::Completed.to_string()),
            created_at: Set(now),
        };
        let header = header.insert(&txn).await.map_err(ServiceError::DatabaseError)?;

        let mut inserted_lines = Vec::with_capacity(lines.len());
        for line in lines {
            inserted_lines.push(line.insert(&txn).await.map_err(ServiceError::DatabaseError)?);
        }

        txn.commit().await.map_err(ServiceError::DatabaseError)?;

        info!(
            sales_transaction_id = %transaction_id,
            total = %total_amount,
            lines = inserted_lines.len(),
            "Sale recorded"
        );
        if let Some(sender) = &self.event_sender {
            sender
                .send_or_log(Event::SaleRecorded {
                    sales_transaction_id: transaction_id,
                    employee_id: request.employee_id,
                    total_amount,
                    line_count: inserted_lines.len(),
                })
                .await;
        }

        Ok(SalesTransactionWithLines {
            transaction: header,
            employee_name: cashier.name,
            customer_name: customer.map(|c| c.name),
            lines: inserted_lines,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_sale(&self, id: Uuid) -> Result<SalesTransactionWithLines, ServiceError> {
        let header = sales_transaction::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Sales transaction {id} not found")))?;

        let lines = sales_line_item::Entity::find()
            .filter(sales_line_item::Column::SalesTransactionId.eq(id))
            .all(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let cashier = fetch_employee(&*self.db, header.employee_id).await?;
        let customer = match header.customer_id {
            Some(customer_id) => Some(fetch_customer(&*self.db, customer_id).await?),
            None => None,
        };

        Ok(SalesTransactionWithLines {
            employee_name: cashier.name,
            customer_name: customer.map(|c| c.name),
            transaction: header,
            lines,
        })
    }

    #[instrument(skip(self))]
    pub async fn list_sales(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<sales_transaction::Model>, u64), ServiceError> {
        use sea_orm::PaginatorTrait;

        let paginator = sales_transaction::Entity::find()
            .order_by_desc(sales_transaction::Column::TransactionDate)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await.map_err(ServiceError::DatabaseError)?;
        let rows = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::DatabaseError)?;
        Ok((rows, total))
    }

    /// Voids a completed sale and returns the sold quantities to stock.
    #[instrument(skip(self))]
    pub async fn void_sale(&self, id: Uuid) -> Result<SalesTransactionWithLines, ServiceError> {
        let txn = self.db.begin().await.map_err(ServiceError::DatabaseError)?;

        let header = sales_transaction::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Sales transaction {id} not found")))?;

        let status = SalesStatus::from_str(&header.status).map_err(|_| {
            ServiceError::InternalError(format!("Unknown sale status '{}'", header.status))
        })?;
        if status != SalesStatus::Completed {
            return Err(ServiceError::Conflict(format!(
                "Only completed sales can be voided, current status is '{}'",
                header.status
            )));
        }

        let lines = sales_line_item::Entity::find()
            .filter(sales_line_item::Column::SalesTransactionId.eq(id))
            .all(&txn)
            .await
            .map_err(ServiceError::DatabaseError)?;

        for line in &lines {
            stock_ledger::apply_menu_item_delta(&txn, line.menu_item_id, line.quantity).await?;
        }

        let cashier = fetch_employee(&txn, header.employee_id).await?;
        let customer = match header.customer_id {
            Some(customer_id) => Some(fetch_customer(&txn, customer_id).await?),
            None => None,
        };

        let mut active: sales_transaction::ActiveModel = header.into();
        active.status = Set(SalesStatus::Voided.to_string());
        let header = active.update(&txn).await.map_err(ServiceError::DatabaseError)?;

        txn.commit().await.map_err(ServiceError::DatabaseError)?;

        info!(sales_transaction_id = %id, "Sale voided");
        if let Some(sender) = &self.event_sender {
            sender
                .send_or_log(Event::SaleVoided {
                    sales_transaction_id: id,
                })
                .await;
        }

        Ok(SalesTransactionWithLines {
            transaction: header,
            employee_name: cashier.name,
            customer_name: customer.map(|c| c.name),
            lines,
        })
    }

    // ---- purchase orders ----

    /// Creates a pending purchase order with its lines. No stock moves here;
    /// stock only changes when the delivery arrives.
    #[instrument(skip(self, request), fields(supplier_id = %request.supplier_id))]
    pub async fn record_purchase_order(
        &self,
        request: RecordPurchaseOrderRequest,
    ) -> Result<PurchaseOrderWithLines, ServiceError> {
        request.validate()?;
        for line in &request.items {
            if line.quantity_ordered <= Decimal::ZERO {
                return Err(ServiceError::ValidationError(
                    "Ordered quantity must be positive".to_string(),
                ));
            }
            if line.unit_cost < Decimal::ZERO {
                return Err(ServiceError::ValidationError(
                    "Unit cost cannot be negative".to_string(),
                ));
            }
        }

        let txn = self.db.begin().await.map_err(ServiceError::DatabaseError)?;

        ensure_supplier_exists(&txn, request.supplier_id).await?;

        let order_id = Uuid::new_v4();
        let now = Utc::now();
        let order_date = request.order_date.unwrap_or_else(|| now.date_naive());

        let header = purchase_order::ActiveModel {
            id: Set(order_id),
            supplier_id: Set(request.supplier_id),
            order_date: Set(order_date),
            expected_delivery: Set(request.expected_delivery),
            status: Set(PurchaseOrderStatus::Pending.to_string()),
            created_at: Set(now),
        };
        let header = header.insert(&txn).await.map_err(ServiceError::DatabaseError)?;

        let mut inserted_lines = Vec::with_capacity(request.items.len());
        for line in &request.items {
            ensure_ingredient_exists(&txn, line.ingredient_id).await?;
            let inserted = purchase_order_line::ActiveModel {
                id: Set(Uuid::new_v4()),
                purchase_order_id: Set(order_id),
                ingredient_id: Set(line.ingredient_id),
                quantity_ordered: Set(line.quantity_ordered),
                unit_cost: Set(line.unit_cost),
            }
            .insert(&txn)
            .await
            .map_err(ServiceError::DatabaseError)?;
            inserted_lines.push(inserted);
        }

        txn.commit().await.map_err(ServiceError::DatabaseError)?;

        info!(purchase_order_id = %order_id, lines = inserted_lines.len(), "Purchase order recorded");
        if let Some(sender) = &self.event_sender {
            sender
                .send_or_log(Event::PurchaseOrderCreated {
                    purchase_order_id: order_id,
                    supplier_id: request.supplier_id,
                    line_count: inserted_lines.len(),
                })
                .await;
        }

        Ok(PurchaseOrderWithLines {
            order: header,
            lines: inserted_lines,
            delivery_receipt: None,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_purchase_order(
        &self,
        id: Uuid,
    ) -> Result<PurchaseOrderWithLines, ServiceError> {
        let order = purchase_order::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {id} not found")))?;

        let lines = purchase_order_line::Entity::find()
            .filter(purchase_order_line::Column::PurchaseOrderId.eq(id))
            .all(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let receipt = delivery_receipt::Entity::find()
            .filter(delivery_receipt::Column::PurchaseOrderId.eq(id))
            .one(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok(PurchaseOrderWithLines {
            order,
            lines,
            delivery_receipt: receipt,
        })
    }

    #[instrument(skip(self))]
    pub async fn list_purchase_orders(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<purchase_order::Model>, u64), ServiceError> {
        use sea_orm::PaginatorTrait;

        let paginator = purchase_order::Entity::find()
            .order_by_desc(purchase_order::Column::OrderDate)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await.map_err(ServiceError::DatabaseError)?;
        let rows = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::DatabaseError)?;
        Ok((rows, total))
    }

    /// Moves a purchase order along its lifecycle. `delivered` is not
    /// accepted here; recording the delivery document is what marks an
    /// order delivered.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        id: Uuid,
        new_status: &str,
    ) -> Result<purchase_order::Model, ServiceError> {
        let next = PurchaseOrderStatus::from_str(new_status).map_err(|_| {
            ServiceError::ValidationError(format!("Unknown purchase order status '{new_status}'"))
        })?;
        if next == PurchaseOrderStatus::Delivered {
            return Err(ServiceError::ValidationError(
                "Record a delivery to mark an order delivered".to_string(),
            ));
        }

        let txn = self.db.begin().await.map_err(ServiceError::DatabaseError)?;

        let order = purchase_order::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Purchase order {id} not found")))?;

        let current = PurchaseOrderStatus::from_str(&order.status).map_err(|_| {
            ServiceError::InternalError(format!("Unknown stored status '{}'", order.status))
        })?;
        if !current.can_transition_to(next) {
            return Err(ServiceError::Conflict(format!(
                "Purchase order cannot move from '{current}' to '{next}'"
            )));
        }

        let old_status = order.status.clone();
        let mut active: purchase_order::ActiveModel = order.into();
        active.status = Set(next.to_string());
        let updated = active.update(&txn).await.map_err(ServiceError::DatabaseError)?;

        txn.commit().await.map_err(ServiceError::DatabaseError)?;

        if let Some(sender) = &self.event_sender {
            sender
                .send_or_log(Event::PurchaseOrderStatusChanged {
                    purchase_order_id: id,
                    old_status,
                    new_status: updated.status.clone(),
                })
                .await;
        }
        Ok(updated)
    }

    // ---- deliveries ----

    /// Records the delivery for a purchase order: one receipt per order,
    /// ingredient stock incremented per line, and the order flipped to
    /// `delivered`, all atomically.
    #[instrument(skip(self, request), fields(purchase_order_id = %purchase_order_id))]
    pub async fn record_delivery(
        &self,
        purchase_order_id: Uuid,
        request: RecordDeliveryRequest,
    ) -> Result<DeliveryReceiptWithLines, ServiceError> {
        request.validate()?;
        for line in &request.items {
            if line.quantity_received < Decimal::ZERO {
                return Err(ServiceError::ValidationError(
                    "Received quantity cannot be negative".to_string(),
                ));
            }
            if line.actual_cost < Decimal::ZERO {
                return Err(ServiceError::ValidationError(
                    "Actual cost cannot be negative".to_string(),
                ));
            }
        }

        let txn = self.db.begin().await.map_err(ServiceError::DatabaseError)?;

        let order = purchase_order::Entity::find_by_id(purchase_order_id)
            .one(&txn)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Purchase order {purchase_order_id} not found"))
            })?;

        let current = PurchaseOrderStatus::from_str(&order.status).map_err(|_| {
            ServiceError::InternalError(format!("Unknown stored status '{}'", order.status))
        })?;
        if !current.can_transition_to(PurchaseOrderStatus::Delivered) {
            return Err(ServiceError::Conflict(format!(
                "Purchase order in status '{current}' cannot receive a delivery"
            )));
        }

        let existing = delivery_receipt::Entity::find()
            .filter(delivery_receipt::Column::PurchaseOrderId.eq(purchase_order_id))
            .one(&txn)
            .await
            .map_err(ServiceError::DatabaseError)?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Purchase order {purchase_order_id} already has a delivery receipt"
            )));
        }

        if let Some(received_by) = request.received_by {
            fetch_employee(&txn, received_by).await?;
        }

        let receipt_id = Uuid::new_v4();
        let now = Utc::now();
        let delivery_date = request.delivery_date.unwrap_or_else(|| now.date_naive());

        let receipt = delivery_receipt::ActiveModel {
            id: Set(receipt_id),
            purchase_order_id: Set(purchase_order_id),
            delivery_date: Set(delivery_date),
            received_by: Set(request.received_by),
            status: Set(DeliveryStatus::Received.to_string()),
            created_at: Set(now),
        };
        let receipt = receipt.insert(&txn).await.map_err(ServiceError::DatabaseError)?;

        let mut inserted_lines = Vec::with_capacity(request.items.len());
        for line in &request.items {
            if line.quantity_received > Decimal::ZERO {
                stock_ledger::apply_ingredient_delta(&txn, line.ingredient_id, line.quantity_received)
                    .await?;
            } else {
                ensure_ingredient_exists(&txn, line.ingredient_id).await?;
            }

            let inserted = delivery_line_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                delivery_receipt_id: Set(receipt_id),
                ingredient_id: Set(line.ingredient_id),
                quantity_received: Set(line.quantity_received),
                actual_cost: Set(line.actual_cost),
            }
            .insert(&txn)
            .await
            .map_err(ServiceError::DatabaseError)?;
            inserted_lines.push(inserted);
        }

        let old_status = order.status.clone();
        let mut active: purchase_order::ActiveModel = order.into();
        active.status = Set(PurchaseOrderStatus::Delivered.to_string());
        active.update(&txn).await.map_err(ServiceError::DatabaseError)?;

        txn.commit().await.map_err(ServiceError::DatabaseError)?;

        info!(
            delivery_receipt_id = %receipt_id,
            purchase_order_id = %purchase_order_id,
            lines = inserted_lines.len(),
            "Delivery recorded"
        );
        if let Some(sender) = &self.event_sender {
            sender
                .send_or_log(Event::DeliveryRecorded {
                    delivery_receipt_id: receipt_id,
                    purchase_order_id,
                    delivery_date,
                })
                .await;
            sender
                .send_or_log(Event::PurchaseOrderStatusChanged {
                    purchase_order_id,
                    old_status,
                    new_status: PurchaseOrderStatus::Delivered.to_string(),
                })
                .await;
        }

        Ok(DeliveryReceiptWithLines {
            receipt,
            lines: inserted_lines,
        })
    }

    // ---- releases ----

    /// Records an internal stock release (kitchen issue, spoilage write-off).
    /// Every line decrements ingredient stock through the ledger; one
    /// shortfall aborts the whole document.
    #[instrument(skip(self, request), fields(employee_id = %request.employee_id))]
    pub async fn record_release(
        &self,
        request: RecordReleaseRequest,
    ) -> Result<ReleaseRecordWithLines, ServiceError> {
        request.validate()?;
        for line in &request.items {
            if line.quantity_released <= Decimal::ZERO {
                return Err(ServiceError::ValidationError(
                    "Released quantity must be positive".to_string(),
                ));
            }
        }

        let txn = self.db.begin().await.map_err(ServiceError::DatabaseError)?;

        fetch_employee(&txn, request.employee_id).await?;

        let record_id = Uuid::new_v4();
        let now = Utc::now();
        let release_date = request.release_date.unwrap_or_else(|| now.date_naive());

        let header = release_record::ActiveModel {
            id: Set(record_id),
            employee_id: Set(request.employee_id),
            release_date: Set(release_date),
            purpose: Set(request.purpose.clone()),
            created_at: Set(now),
        };
        let header = header.insert(&txn).await.map_err(ServiceError::DatabaseError)?;

        let mut inserted_lines = Vec::with_capacity(request.items.len());
        let mut low_stock = Vec::new();
        for line in &request.items {
            let updated =
                stock_ledger::apply_ingredient_delta(&txn, line.ingredient_id, -line.quantity_released)
                    .await?;
            if updated.current_stock <= updated.reorder_point {
                low_stock.push((updated.id, updated.current_stock, updated.reorder_point));
            }

            let inserted = release_line_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                release_record_id: Set(record_id),
                ingredient_id: Set(line.ingredient_id),
                quantity_released: Set(line.quantity_released),
            }
            .insert(&txn)
            .await
            .map_err(ServiceError::DatabaseError)?;
            inserted_lines.push(inserted);
        }

        txn.commit().await.map_err(ServiceError::DatabaseError)?;

        info!(release_record_id = %record_id, lines = inserted_lines.len(), "Release recorded");
        if let Some(sender) = &self.event_sender {
            sender
                .send_or_log(Event::ReleaseRecorded {
                    release_record_id: record_id,
                    employee_id: request.employee_id,
                    line_count: inserted_lines.len(),
                })
                .await;
            for (ingredient_id, current_stock, reorder_point) in low_stock {
                sender
                    .send_or_log(Event::StockBelowReorderPoint {
                        ingredient_id,
                        current_stock,
                        reorder_point,
                    })
                    .await;
            }
        }

        Ok(ReleaseRecordWithLines {
            record: header,
            lines: inserted_lines,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_release(&self, id: Uuid) -> Result<ReleaseRecordWithLines, ServiceError> {
        let record = release_record::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Release record {id} not found")))?;

        let lines = release_line_item::Entity::find()
            .filter(release_line_item::Column::ReleaseRecordId.eq(id))
            .all(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        Ok(ReleaseRecordWithLines { record, lines })
    }

    #[instrument(skip(self))]
    pub async fn list_releases(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<release_record::Model>, u64), ServiceError> {
        use sea_orm::PaginatorTrait;

        // release_date is a calendar date, so same-day records fall back to
        // creation time for a stable order.
        let paginator = release_record::Entity::find()
            .order_by_desc(release_record::Column::ReleaseDate)
            .order_by_desc(release_record::Column::CreatedAt)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await.map_err(ServiceError::DatabaseError)?;
        let rows = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::DatabaseError)?;
        Ok((rows, total))
    }
}

// ---- existence guards, shared by the composer flows ----

async fn fetch_employee<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<employee::Model, ServiceError> {
    employee::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(ServiceError::DatabaseError)?
        .ok_or_else(|| ServiceError::NotFound(format!("Employee {id} not found")))
}

async fn fetch_customer<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<customer::Model, ServiceError> {
    customer::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(ServiceError::DatabaseError)?
        .ok_or_else(|| ServiceError::NotFound(format!("Customer {id} not found")))
}

async fn ensure_supplier_exists<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<(), ServiceError> {
    supplier::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(ServiceError::DatabaseError)?
        .map(|_| ())
        .ok_or_else(|| ServiceError::NotFound(format!("Supplier {id} not found")))
}

async fn ensure_ingredient_exists<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<(), ServiceError> {
    ingredient::Entity::find_by_id(id)
        .one(conn)
        .await
        .map_err(ServiceError::DatabaseError)?
        .map(|_| ())
        .ok_or_else(|| ServiceError::NotFound(format!("Ingredient {id} not found")))
}

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    db::DbPool,
    entities::{
        menu_item, sales_line_item, sales_transaction,
        sales_transaction::SalesStatus,
    },
    errors::ServiceError,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySalesBucket {
    pub date: NaiveDate,
    pub transaction_count: u64,
    pub total_amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SalesSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub transaction_count: u64,
    pub total_amount: Decimal,
    pub daily: Vec<DailySalesBucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemPopularityEntry {
    pub menu_item_id: Uuid,
    pub name: String,
    pub quantity_sold: i64,
    pub revenue: Decimal,
}

/// Read-only aggregation over the recorded sales history. Voided sales are
/// excluded everywhere; only completed transactions count.
#[derive(Clone)]
pub struct ReportService {
    db: Arc<DbPool>,
}

impl ReportService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Per-day totals over the inclusive `[from, to]` date range, bucketed
    /// on the transaction date's calendar day.
    #[instrument(skip(self))]
    pub async fn sales_summary(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<SalesSummary, ServiceError> {
        if from > to {
            return Err(ServiceError::ValidationError(
                "Range start must not be after range end".to_string(),
            ));
        }

        let transactions = self.completed_sales_in_range(from, to).await?;

        let dated: Vec<(NaiveDate, Decimal)> = transactions
            .iter()
            .map(|t| (t.transaction_date.date_naive(), t.total_amount))
            .collect();
        let daily = aggregate_daily(&dated);

        let transaction_count = dated.len() as u64;
        let total_amount = dated.iter().map(|(_, amount)| *amount).sum();

        Ok(SalesSummary {
            from,
            to,
            transaction_count,
            total_amount,
            daily,
        })
    }

    /// Menu items ranked by quantity sold over the range, most sold first.
    #[instrument(skip(self))]
    pub async fn item_popularity(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        limit: usize,
    ) -> Result<Vec<ItemPopularityEntry>, ServiceError> {
        if from > to {
            return Err(ServiceError::ValidationError(
                "Range start must not be after range end".to_string(),
            ));
        }

        let transactions = self.completed_sales_in_range(from, to).await?;
        if transactions.is_empty() {
            return Ok(Vec::new());
        }
        let transaction_ids: Vec<Uuid> = transactions.iter().map(|t| t.id).collect();
        let transaction_position: HashMap<Uuid, usize> = transactions
            .iter()
            .enumerate()
            .map(|(idx, t)| (t.id, idx))
            .collect();

        let mut lines = sales_line_item::Entity::find()
            .filter(sales_line_item::Column::SalesTransactionId.is_in(transaction_ids))
            .all(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        // Replay the lines in sale order so rank ties resolve by which item
        // was sold first, independent of how the backend returns rows.
        lines.sort_by_key(|l| {
            (
                transaction_position
                    .get(&l.sales_transaction_id)
                    .copied()
                    .unwrap_or(usize::MAX),
                l.id,
            )
        });

        let sold: Vec<(Uuid, i64, Decimal)> = lines
            .iter()
            .map(|l| (l.menu_item_id, i64::from(l.quantity), l.subtotal))
            .collect();
        let ranked = rank_items(&sold, limit);

        let item_ids: Vec<Uuid> = ranked.iter().map(|(id, _, _)| *id).collect();
        let names: HashMap<Uuid, String> = menu_item::Entity::find()
            .filter(menu_item::Column::Id.is_in(item_ids))
            .all(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .into_iter()
            .map(|m| (m.id, m.name))
            .collect();

        Ok(ranked
            .into_iter()
            .map(|(menu_item_id, quantity_sold, revenue)| ItemPopularityEntry {
                name: names
                    .get(&menu_item_id)
                    .cloned()
                    .unwrap_or_else(|| "(deleted item)".to_string()),
                menu_item_id,
                quantity_sold,
                revenue,
            })
            .collect())
    }

    async fn completed_sales_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<sales_transaction::Model>, ServiceError> {
        // The window is [from 00:00, to + 1 day) in UTC timestamps so the
        // range predicate runs in SQL; calendar-day bucketing stays in code
        // where SQLite and Postgres agree on the date arithmetic.
        let window_start = from.and_time(NaiveTime::MIN).and_utc();
        let window_end = to
            .succ_opt()
            .ok_or_else(|| {
                ServiceError::ValidationError("Range end is out of calendar bounds".to_string())
            })?
            .and_time(NaiveTime::MIN)
            .and_utc();

        sales_transaction::Entity::find()
            .filter(sales_transaction::Column::Status.eq(SalesStatus::Completed.to_string()))
            .filter(sales_transaction::Column::TransactionDate.gte(window_start))
            .filter(sales_transaction::Column::TransactionDate.lt(window_end))
            .order_by_asc(sales_transaction::Column::TransactionDate)
            .all(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)
    }
}

/// Folds `(date, amount)` pairs into per-day buckets, ordered by date.
pub(crate) fn aggregate_daily(transactions: &[(NaiveDate, Decimal)]) -> Vec<DailySalesBucket> {
    let mut buckets: Vec<DailySalesBucket> = Vec::new();
    for (date, amount) in transactions {
        match buckets.iter_mut().find(|b| b.date == *date) {
            Some(bucket) => {
                bucket.transaction_count += 1;
                bucket.total_amount += *amount;
            }
            None => buckets.push(DailySalesBucket {
                date: *date,
                transaction_count: 1,
                total_amount: *amount,
            }),
        }
    }
    buckets.sort_by_key(|b| b.date);
    buckets
}

/// Sums `(item, quantity, revenue)` triples per item and ranks by quantity
/// sold, descending. Ties keep first-seen order, which follows transaction
/// date order in the callers.
pub(crate) fn rank_items(
    sold: &[(Uuid, i64, Decimal)],
    limit: usize,
) -> Vec<(Uuid, i64, Decimal)> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut totals: HashMap<Uuid, (i64, Decimal)> = HashMap::new();
    for (id, quantity, revenue) in sold {
        let entry = totals.entry(*id).or_insert_with(|| {
            order.push(*id);
            (0, Decimal::ZERO)
        });
        entry.0 += quantity;
        entry.1 += *revenue;
    }

    let mut ranked: Vec<(Uuid, i64, Decimal)> = order
        .into_iter()
        .map(|id| {
            let (quantity, revenue) = totals[&id];
            (id, quantity, revenue)
        })
        .collect();
    // Stable sort keeps the first-seen order for equal quantities.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

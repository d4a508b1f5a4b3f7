//! Bill lifecycle: two-phase create and cascade delete
//!
//! The store offers per-call atomicity only, so the header and its items are
//! written as separate calls with explicit compensation: a saga with one
//! compensating action, not an implicit rollback.
//!
//! No storage failure is retried here; retries are the caller's policy. No
//! locking either: the store serializes conflicting writes, and concurrent
//! creates racing on bill numbers are an accepted limitation.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use core_kernel::{BillId, StoreError, StorePort};

use crate::bill::{next_bill_number, Bill, BillItem, NewBill};
use crate::error::BillingError;
use crate::transform;

/// Table holding bill headers
pub const BILLS_TABLE: &str = "bills";
/// Table holding line items, one row per item, FK to the header
pub const BILL_ITEMS_TABLE: &str = "bill_items";

/// Owns the bill write path against the storage port
#[derive(Clone)]
pub struct BillLifecycle {
    store: Arc<dyn StorePort>,
}

impl BillLifecycle {
    /// Creates a lifecycle over the given store
    pub fn new(store: Arc<dyn StorePort>) -> Self {
        Self { store }
    }

    /// Creates a bill header plus its line items as one logical unit
    ///
    /// On success the returned Bill is composed from the caller's fields plus
    /// the generated id and bill number, never re-fetched, so caller-supplied
    /// fields that do not round-trip through storage (customer name,
    /// transaction type, remarks) are preserved exactly.
    ///
    /// # Errors
    ///
    /// - [`BillingError::Storage`] if the header insert fails (nothing written);
    /// - [`BillingError::CreateRolledBack`] if an item insert fails and the
    ///   header was deleted again (net no-op);
    /// - [`BillingError::CompensationFailed`] if an item insert fails and the
    ///   compensating deletes fail too (partial bill left in storage).
    pub async fn create(&self, new_bill: NewBill) -> Result<Bill, BillingError> {
        let bill_id = BillId::new_v7().as_uuid().to_string();
        let bill_number = next_bill_number();
        debug!(%bill_id, %bill_number, items = new_bill.items.len(), "creating bill");

        let header = transform::bill_header_to_row(&bill_id, &bill_number, &new_bill);
        self.store.insert(BILLS_TABLE, header).await?;

        for item in &new_bill.items {
            let row = transform::bill_item_to_row(&bill_id, item);
            if let Err(cause) = self.store.insert(BILL_ITEMS_TABLE, row).await {
                return Err(self.compensate_create(bill_id, cause).await);
            }
        }

        info!(%bill_id, %bill_number, "bill created");
        Ok(Bill {
            id: bill_id,
            bill_number,
            customer_id: new_bill.customer_id,
            customer_name: new_bill.customer_name,
            date: new_bill.date,
            items: new_bill.items,
            subtotal: new_bill.subtotal,
            tax: new_bill.tax,
            total: new_bill.total,
            transaction_type: new_bill.transaction_type,
            remarks: new_bill.remarks,
        })
    }

    /// Undoes a half-written create
    ///
    /// Item rows written before the failing one go first, then the header,
    /// so a successful rollback is a net no-op.
    async fn compensate_create(&self, bill_id: String, cause: StoreError) -> BillingError {
        warn!(%bill_id, %cause, "item write failed, rolling back");
        let rollback = async {
            self.store
                .delete_where(BILL_ITEMS_TABLE, "bill_id", &bill_id)
                .await?;
            self.store.delete_where(BILLS_TABLE, "id", &bill_id).await
        };
        match rollback.await {
            Ok(()) => BillingError::CreateRolledBack { bill_id, cause },
            Err(compensation) => {
                error!(%bill_id, %cause, %compensation, "compensation failed, partial bill left behind");
                BillingError::CompensationFailed {
                    bill_id,
                    cause,
                    compensation,
                }
            }
        }
    }

    /// Deletes a bill and its line items in dependency order
    ///
    /// Items first, then the header. Deleting an id with no rows behind it
    /// succeeds: both steps are attempted and both report
    /// success-with-no-rows-affected, so a repeated delete has the same
    /// result shape as the first.
    ///
    /// # Errors
    ///
    /// [`BillingError::Storage`] in both failure positions. If the item
    /// delete fails the header is untouched (no partial cascade); if the
    /// header delete fails after the items went, the orphaned header is a
    /// terminal state this layer does not further compensate.
    pub async fn delete(&self, bill_id: &str) -> Result<(), BillingError> {
        debug!(%bill_id, "deleting bill");
        self.store
            .delete_where(BILL_ITEMS_TABLE, "bill_id", bill_id)
            .await?;
        self.store.delete_where(BILLS_TABLE, "id", bill_id).await?;
        info!(%bill_id, "bill deleted");
        Ok(())
    }

    /// Loads every bill with its items grouped under the header
    ///
    /// The wholesale refresh path: two table scans, then item rows are
    /// attached to their headers via the record transformers. Item order
    /// follows storage order within each bill.
    pub async fn load_all(&self) -> Result<Vec<Bill>, BillingError> {
        let headers = self.store.select_all(BILLS_TABLE, None).await?;
        let item_rows = self.store.select_all(BILL_ITEMS_TABLE, None).await?;

        let mut items_by_bill: HashMap<String, Vec<BillItem>> = HashMap::new();
        for row in &item_rows {
            items_by_bill
                .entry(transform::item_row_bill_id(row))
                .or_default()
                .push(transform::bill_item_from_row(row));
        }

        Ok(headers
            .iter()
            .map(|row| {
                let mut bill = transform::bill_from_row(row);
                bill.items = items_by_bill.remove(&bill.id).unwrap_or_default();
                bill
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::{BillItem, TransactionType};
    use chrono::NaiveDate;
    use core_kernel::ports::mock::MemoryStore;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn rice_item() -> BillItem {
        BillItem {
            product_id: "p1".to_string(),
            product_name: "Rice".to_string(),
            quantity: dec!(10),
            price: dec!(50),
            total: dec!(500),
        }
    }

    fn rice_bill() -> NewBill {
        NewBill {
            customer_id: "1".to_string(),
            customer_name: "NANGANALLUR Grains".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
            items: vec![rice_item()],
            subtotal: dec!(500),
            tax: None,
            total: dec!(500),
            transaction_type: TransactionType::Debit,
            remarks: None,
        }
    }

    fn lifecycle() -> (Arc<MemoryStore>, BillLifecycle) {
        let store = Arc::new(MemoryStore::new());
        let lifecycle = BillLifecycle::new(store.clone());
        (store, lifecycle)
    }

    #[tokio::test]
    async fn test_create_success_returns_composed_bill() {
        let (store, lifecycle) = lifecycle();

        let bill = lifecycle.create(rice_bill()).await.unwrap();

        assert!(!bill.bill_number.is_empty());
        assert_eq!(bill.items, vec![rice_item()]);
        assert_eq!(bill.total, dec!(500));
        assert_eq!(bill.customer_name, "NANGANALLUR Grains");

        // Header and one item row were persisted
        assert_eq!(store.rows(BILLS_TABLE).await.len(), 1);
        assert_eq!(store.rows(BILL_ITEMS_TABLE).await.len(), 1);
        assert_eq!(store.rows(BILL_ITEMS_TABLE).await[0]["bill_id"], bill.id);
    }

    #[tokio::test]
    async fn test_create_with_empty_items_succeeds() {
        let (store, lifecycle) = lifecycle();
        let mut new_bill = rice_bill();
        new_bill.items = vec![];
        new_bill.subtotal = dec!(0);
        new_bill.total = dec!(0);

        let bill = lifecycle.create(new_bill).await.unwrap();
        assert!(bill.items.is_empty());
        assert_eq!(store.rows(BILLS_TABLE).await.len(), 1);
        assert!(store.rows(BILL_ITEMS_TABLE).await.is_empty());
    }

    #[tokio::test]
    async fn test_header_insert_failure_is_clean_abort() {
        let (store, lifecycle) = lifecycle();
        store.fail_next_insert(BILLS_TABLE).await;

        let err = lifecycle.create(rice_bill()).await.unwrap_err();
        assert!(err.is_clean_abort());
        assert!(store.rows(BILLS_TABLE).await.is_empty());
        assert!(store.rows(BILL_ITEMS_TABLE).await.is_empty());
    }

    #[tokio::test]
    async fn test_item_insert_failure_rolls_back_header() {
        let (store, lifecycle) = lifecycle();
        store.fail_next_insert(BILL_ITEMS_TABLE).await;

        let err = lifecycle.create(rice_bill()).await.unwrap_err();
        assert!(err.is_compensated());

        // The header no longer exists - verified via a subsequent read
        assert!(store.rows(BILLS_TABLE).await.is_empty());
        assert!(store.rows(BILL_ITEMS_TABLE).await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_compensation_reports_orphaned_header() {
        let (store, lifecycle) = lifecycle();
        store.fail_next_insert(BILL_ITEMS_TABLE).await;
        store.fail_next_delete(BILLS_TABLE).await;

        let err = lifecycle.create(rice_bill()).await.unwrap_err();
        assert!(err.is_inconsistent());

        // The orphaned header is still there, with no items
        assert_eq!(store.rows(BILLS_TABLE).await.len(), 1);
        assert!(store.rows(BILL_ITEMS_TABLE).await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_items_then_header() {
        let (store, lifecycle) = lifecycle();
        let mut new_bill = rice_bill();
        new_bill.items.push(rice_item());
        let bill = lifecycle.create(new_bill).await.unwrap();
        assert_eq!(store.rows(BILL_ITEMS_TABLE).await.len(), 2);

        lifecycle.delete(&bill.id).await.unwrap();

        assert!(store.rows(BILLS_TABLE).await.is_empty());
        assert!(store.rows(BILL_ITEMS_TABLE).await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_id_is_ok() {
        let (_store, lifecycle) = lifecycle();
        lifecycle.delete("does-not-exist").await.unwrap();
    }

    #[tokio::test]
    async fn test_double_delete_has_same_result_shape() {
        let (_store, lifecycle) = lifecycle();
        let bill = lifecycle.create(rice_bill()).await.unwrap();

        let first = lifecycle.delete(&bill.id).await;
        let second = lifecycle.delete(&bill.id).await;
        assert!(first.is_ok());
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_delete_item_failure_leaves_header_untouched() {
        let (store, lifecycle) = lifecycle();
        let bill = lifecycle.create(rice_bill()).await.unwrap();
        store.fail_next_delete(BILL_ITEMS_TABLE).await;

        let err = lifecycle.delete(&bill.id).await.unwrap_err();
        assert!(err.is_clean_abort());
        assert_eq!(store.rows(BILLS_TABLE).await.len(), 1);
        assert_eq!(store.rows(BILL_ITEMS_TABLE).await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_header_failure_leaves_orphan() {
        let (store, lifecycle) = lifecycle();
        let bill = lifecycle.create(rice_bill()).await.unwrap();
        store.fail_next_delete(BILLS_TABLE).await;

        let err = lifecycle.delete(&bill.id).await.unwrap_err();
        // Reported as a storage failure; the orphaned header is terminal
        assert!(err.is_clean_abort());
        assert_eq!(store.rows(BILLS_TABLE).await.len(), 1);
        assert!(store.rows(BILL_ITEMS_TABLE).await.is_empty());
    }

    #[tokio::test]
    async fn test_load_all_groups_items_under_headers() {
        let (store, lifecycle) = lifecycle();
        store
            .seed(
                BILLS_TABLE,
                vec![
                    json!({"id": "b1", "bill_number": "B1", "bill_date": "2025-09-10",
                           "subtotal": 500, "total_amount": 500}),
                    json!({"id": "b2", "bill_number": "B2", "bill_date": "2025-09-11",
                           "subtotal": 0, "total_amount": 0}),
                ],
            )
            .await;
        store
            .seed(
                BILL_ITEMS_TABLE,
                vec![
                    json!({"id": "i1", "bill_id": "b1", "product_name": "Rice",
                           "quantity": 10, "rate": 50, "amount": 500}),
                    json!({"id": "i2", "bill_id": "b1", "product_name": "Flour",
                           "quantity": 1, "rate": 40, "amount": 40}),
                ],
            )
            .await;

        let bills = lifecycle.load_all().await.unwrap();
        assert_eq!(bills.len(), 2);

        let b1 = bills.iter().find(|b| b.id == "b1").unwrap();
        assert_eq!(b1.items.len(), 2);
        assert_eq!(b1.items[0].product_name, "Rice");

        let b2 = bills.iter().find(|b| b.id == "b2").unwrap();
        assert!(b2.items.is_empty());
    }
}

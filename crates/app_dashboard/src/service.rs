//! Cache-backed application service
//!
//! Each collection lives behind its own `RwLock` so a refresh of one does not
//! block reads of another. Snapshot accessors clone; the presentation layer
//! renders whatever it gets and never holds a lock across a render.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use core_kernel::StorePort;
use domain_billing::{Bill, BillLifecycle, BillingError, NewBill};
use domain_catalog::{load_products, Product};
use domain_expense::{load_expenses, Expense};
use domain_party::{load_customers, Customer};

/// Application service the presentation layer sees
///
/// Holds the storage port, the bill lifecycle, and a cache of every
/// collection the dashboard renders. All mutations go through the lifecycle
/// first; the cache is only touched once storage has confirmed.
pub struct DashboardService {
    store: Arc<dyn StorePort>,
    lifecycle: BillLifecycle,
    bills: RwLock<Vec<Bill>>,
    customers: RwLock<Vec<Customer>>,
    products: RwLock<Vec<Product>>,
    expenses: RwLock<Vec<Expense>>,
}

impl DashboardService {
    /// Creates a service over the given store with an empty cache
    ///
    /// Call [`refresh_all`](Self::refresh_all) before the first render.
    pub fn new(store: Arc<dyn StorePort>) -> Self {
        Self {
            lifecycle: BillLifecycle::new(Arc::clone(&store)),
            store,
            bills: RwLock::new(Vec::new()),
            customers: RwLock::new(Vec::new()),
            products: RwLock::new(Vec::new()),
            expenses: RwLock::new(Vec::new()),
        }
    }

    /// Reloads every collection from storage, replacing the cache wholesale
    ///
    /// The startup path, and the recovery path after any suspected drift.
    ///
    /// # Errors
    ///
    /// Returns the first storage failure encountered; collections loaded
    /// before the failure are still applied.
    pub async fn refresh_all(&self) -> Result<(), BillingError> {
        debug!("refreshing all collections");

        let bills = self.lifecycle.load_all().await?;
        *self.bills.write().await = bills;

        let customers = load_customers(self.store.as_ref()).await?;
        *self.customers.write().await = customers;

        let products = load_products(self.store.as_ref()).await?;
        *self.products.write().await = products;

        let expenses = load_expenses(self.store.as_ref()).await?;
        *self.expenses.write().await = expenses;

        info!(
            bills = self.bills.read().await.len(),
            customers = self.customers.read().await.len(),
            products = self.products.read().await.len(),
            expenses = self.expenses.read().await.len(),
            "cache refreshed"
        );
        Ok(())
    }

    /// Creates a bill through the lifecycle and appends it to the cache
    ///
    /// The cache is touched only on success; on any lifecycle error
    /// (including a rolled-back or half-failed create) it is left as it was.
    ///
    /// # Errors
    ///
    /// Propagates the lifecycle outcome unchanged; see
    /// [`BillLifecycle::create`].
    pub async fn create_bill(&self, new_bill: NewBill) -> Result<Bill, BillingError> {
        let bill = self.lifecycle.create(new_bill).await?;
        self.bills.write().await.push(bill.clone());
        Ok(bill)
    }

    /// Deletes a bill through the lifecycle and drops it from the cache
    ///
    /// Takes the bill id as stored. Deleting an id the store has never seen
    /// succeeds (and is a cache no-op), matching the lifecycle contract.
    ///
    /// # Errors
    ///
    /// Propagates the lifecycle outcome unchanged; the cache is untouched on
    /// failure, so a half-deleted bill stays visible until the next refresh.
    pub async fn delete_bill(&self, bill_id: &str) -> Result<(), BillingError> {
        self.lifecycle.delete(bill_id).await?;
        self.bills.write().await.retain(|b| b.id != bill_id);
        Ok(())
    }

    /// Snapshot of the cached bills
    pub async fn bills(&self) -> Vec<Bill> {
        self.bills.read().await.clone()
    }

    /// Snapshot of the cached customers
    pub async fn customers(&self) -> Vec<Customer> {
        self.customers.read().await.clone()
    }

    /// Snapshot of the cached products
    pub async fn products(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    /// Snapshot of the cached expenses
    pub async fn expenses(&self) -> Vec<Expense> {
        self.expenses.read().await.clone()
    }
}

use crate::domain::model::{Customer, Order};
use crate::domain::ports::{Entity, RecordStore};
use crate::utils::error::Result;
use std::cell::Cell;
use std::time::Duration;

/// A customer with its orders fetched in the same round trip.
#[derive(Debug, Clone)]
pub struct CustomerWithOrders {
    pub customer: Customer,
    pub orders: Vec<Order>,
}

/// Scoped handle on a record store for the duration of one catalog
/// operation. Opening pings the store; dropping the session releases it on
/// every exit path.
pub struct Session<'s> {
    store: &'s dyn RecordStore,
    latency: Duration,
    round_trips: Cell<usize>,
}

impl<'s> Session<'s> {
    pub fn open(store: &'s dyn RecordStore, latency: Duration) -> Result<Self> {
        store.ping()?;
        tracing::debug!("🔌 Session opened on {}", store.describe());
        Ok(Self {
            store,
            latency,
            round_trips: Cell::new(0),
        })
    }

    pub fn round_trips(&self) -> usize {
        self.round_trips.get()
    }

    fn round_trip(&self, what: &str) {
        self.round_trips.set(self.round_trips.get() + 1);
        tracing::debug!("↔️  Round trip #{}: {}", self.round_trips.get(), what);
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
    }

    /// Fetch a whole collection in one round trip.
    pub fn fetch<E: Entity>(&self) -> Result<Vec<E>> {
        self.round_trip(E::COLLECTION);
        E::load(self.store)
    }

    /// Fetch the members of a collection satisfying `predicate`.
    pub fn fetch_where<E, P>(&self, predicate: P) -> Result<Vec<E>>
    where
        E: Entity,
        P: Fn(&E) -> bool,
    {
        Ok(self.fetch::<E>()?.into_iter().filter(|e| predicate(e)).collect())
    }

    /// Fetch only a projected key of every member of a collection.
    pub fn project<E, K, F>(&self, key: F) -> Result<Vec<K>>
    where
        E: Entity,
        F: Fn(&E) -> K,
    {
        Ok(self.fetch::<E>()?.iter().map(key).collect())
    }

    /// Lazy navigation from a customer to its orders: one round trip per call.
    pub fn orders_of(&self, customer: &Customer) -> Result<Vec<Order>> {
        self.round_trip("orders (navigation)");
        Ok(self
            .store
            .load_orders()?
            .into_iter()
            .filter(|o| o.customer_id == customer.id)
            .collect())
    }

    /// Customers with their orders included, fetched in a single round trip.
    pub fn customers_including_orders(&self) -> Result<Vec<CustomerWithOrders>> {
        self.round_trip("customers including orders");
        let customers = self.store.load_customers()?;
        let orders = self.store.load_orders()?;

        Ok(crate::core::query::group_join(
            &customers,
            &orders,
            |c| c.id.clone(),
            |o| o.customer_id.clone(),
        )
        .map(|(customer, orders)| CustomerWithOrders {
            customer: customer.clone(),
            orders: orders.into_iter().cloned().collect(),
        })
        .collect())
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        tracing::debug!(
            "🔌 Session closed on {} after {} round trip(s)",
            self.store.describe(),
            self.round_trips.get()
        );
    }
}

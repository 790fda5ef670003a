//! In-memory implementation of every repository port.
//!
//! Used when no database URL is configured and by the cross-service tests.
//! All state sits behind one async mutex and every operation completes its
//! check-and-mutate while holding the guard, with no await point in between.
//! That gives the same atomicity the Postgres adapters get from the unique
//! index and row locks, and a cancelled caller can never leave a partial write.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::ports::{
    PickupPointRepository, PickupPointRepositoryError, ProductRepository, ProductRepositoryError,
    ReceptionRepository, ReceptionRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    Email, PickupPoint, PickupPointFilter, PickupPointListing, Product, ProductDraft, Reception,
    ReceptionStatus, User,
};

#[derive(Debug, Default)]
struct State {
    users: HashMap<Email, User>,
    pickup_points: HashMap<Uuid, PickupPoint>,
    receptions: Vec<Reception>,
    products: Vec<Product>,
}

impl State {
    fn open_reception_index(&self, pvz_id: Uuid) -> Option<usize> {
        self.receptions
            .iter()
            .position(|reception| reception.pvz_id == pvz_id && reception.status.is_open())
    }

    fn open_reception_id(&self, pvz_id: Uuid) -> Option<Uuid> {
        self.open_reception_index(pvz_id)
            .and_then(|index| self.receptions.get(index))
            .map(|reception| reception.id)
    }
}

/// Process-local store implementing the user, pickup point, reception and
/// product repository ports.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut state = self.state.lock().await;
        if state.users.contains_key(user.email()) {
            return Err(UserRepositoryError::duplicate_email(user.email().as_ref()));
        }
        state.users.insert(user.email().clone(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.state.lock().await.users.get(email).cloned())
    }
}

#[async_trait]
impl PickupPointRepository for MemoryStore {
    async fn create(&self, pvz: &PickupPoint) -> Result<(), PickupPointRepositoryError> {
        let mut state = self.state.lock().await;
        if state.pickup_points.contains_key(&pvz.id) {
            return Err(PickupPointRepositoryError::query(format!(
                "pickup point {} already exists",
                pvz.id
            )));
        }
        state.pickup_points.insert(pvz.id, pvz.clone());
        Ok(())
    }

    async fn list(
        &self,
        filter: &PickupPointFilter,
    ) -> Result<Vec<PickupPointListing>, PickupPointRepositoryError> {
        let state = self.state.lock().await;
        let page = filter.page();
        let offset = usize::try_from(page.offset())
            .map_err(|_| PickupPointRepositoryError::query("page offset out of range"))?;
        let limit = usize::try_from(page.limit())
            .map_err(|_| PickupPointRepositoryError::query("page limit out of range"))?;

        let mut pvzs: Vec<PickupPoint> = state.pickup_points.values().cloned().collect();
        pvzs.sort_by(|a, b| {
            b.registration_date
                .cmp(&a.registration_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        let pvzs: Vec<PickupPoint> = pvzs.into_iter().skip(offset).take(limit).collect();

        let mut receptions: Vec<Reception> = state
            .receptions
            .iter()
            .filter(|reception| {
                pvzs.iter().any(|pvz| pvz.id == reception.pvz_id)
                    && filter.admits(reception.date_time)
            })
            .cloned()
            .collect();
        receptions.sort_by(|a, b| b.date_time.cmp(&a.date_time).then_with(|| b.id.cmp(&a.id)));

        let mut products: Vec<(usize, Product)> = state
            .products
            .iter()
            .enumerate()
            .filter(|(_, product)| {
                receptions
                    .iter()
                    .any(|reception| reception.id == product.reception_id)
            })
            .map(|(index, product)| (index, product.clone()))
            .collect();
        products.sort_by(|(ia, a), (ib, b)| b.date_time.cmp(&a.date_time).then_with(|| ib.cmp(ia)));

        Ok(PickupPointListing::assemble(
            pvzs,
            receptions,
            products.into_iter().map(|(_, product)| product).collect(),
        ))
    }
}

#[async_trait]
impl ReceptionRepository for MemoryStore {
    async fn has_open_reception(&self, pvz_id: Uuid) -> Result<bool, ReceptionRepositoryError> {
        Ok(self
            .state
            .lock()
            .await
            .open_reception_index(pvz_id)
            .is_some())
    }

    async fn create_open(&self, reception: &Reception) -> Result<(), ReceptionRepositoryError> {
        let mut state = self.state.lock().await;
        if !state.pickup_points.contains_key(&reception.pvz_id) {
            return Err(ReceptionRepositoryError::pickup_point_not_found(
                reception.pvz_id,
            ));
        }
        if state.open_reception_index(reception.pvz_id).is_some() {
            return Err(ReceptionRepositoryError::already_open(reception.pvz_id));
        }
        state.receptions.push(reception.clone());
        Ok(())
    }

    async fn close_open(&self, pvz_id: Uuid) -> Result<Reception, ReceptionRepositoryError> {
        let mut state = self.state.lock().await;
        let index = state
            .open_reception_index(pvz_id)
            .ok_or_else(|| ReceptionRepositoryError::no_open_reception(pvz_id))?;
        let reception = state
            .receptions
            .get_mut(index)
            .ok_or_else(|| ReceptionRepositoryError::no_open_reception(pvz_id))?;
        reception.status = ReceptionStatus::Close;
        Ok(reception.clone())
    }

    async fn find_open(&self, pvz_id: Uuid) -> Result<Option<Reception>, ReceptionRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .open_reception_index(pvz_id)
            .and_then(|index| state.receptions.get(index))
            .cloned())
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn add_to_open_reception(
        &self,
        pvz_id: Uuid,
        draft: ProductDraft,
    ) -> Result<Product, ProductRepositoryError> {
        let mut state = self.state.lock().await;
        let reception_id = state
            .open_reception_id(pvz_id)
            .ok_or_else(|| ProductRepositoryError::no_open_reception(pvz_id))?;
        let product = draft.into_product(reception_id);
        state.products.push(product.clone());
        Ok(product)
    }

    async fn delete_most_recent(&self, pvz_id: Uuid) -> Result<Product, ProductRepositoryError> {
        let mut state = self.state.lock().await;
        let reception_id = state
            .open_reception_id(pvz_id)
            .ok_or_else(|| ProductRepositoryError::no_open_reception(pvz_id))?;
        // Equal timestamps fall back to insertion order.
        let index = state
            .products
            .iter()
            .enumerate()
            .filter(|(_, product)| product.reception_id == reception_id)
            .max_by_key(|(index, product)| (product.date_time, *index))
            .map(|(index, _)| index)
            .ok_or_else(|| ProductRepositoryError::no_products(reception_id))?;
        Ok(state.products.remove(index))
    }
}

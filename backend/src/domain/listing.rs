//! Read projection for the pickup point listing.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use pagination::PageRequest;
use uuid::Uuid;

use super::{Error, PickupPoint, Product, Reception};

/// Listing filter: optional inclusive reception date window plus a page.
///
/// ## Invariants
/// - When both bounds are present, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupPointFilter {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    page: PageRequest,
}

impl PickupPointFilter {
    /// Build a filter, rejecting inverted date windows.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::PickupPointFilter;
    /// use pagination::PageRequest;
    ///
    /// let filter = PickupPointFilter::new(None, None, PageRequest::default())
    ///     .expect("unbounded filter is valid");
    /// assert_eq!(filter.page().page(), 1);
    /// ```
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        page: PageRequest,
    ) -> Result<Self, Error> {
        if let (Some(from), Some(to)) = (start, end)
            && from > to
        {
            return Err(Error::invalid_request("startDate must not be after endDate"));
        }
        Ok(Self { start, end, page })
    }

    /// Inclusive lower bound on reception `date_time`.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// Inclusive upper bound on reception `date_time`.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Requested page of pickup points.
    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Whether a reception opened at `at` falls inside the window.
    pub fn admits(&self, at: DateTime<Utc>) -> bool {
        self.start.is_none_or(|from| at >= from) && self.end.is_none_or(|to| at <= to)
    }
}

/// A reception together with its products, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceptionListing {
    /// The reception row.
    pub reception: Reception,
    /// Products ordered by `date_time` descending.
    pub products: Vec<Product>,
}

/// A pickup point together with the receptions inside the filter window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupPointListing {
    /// The pickup point row.
    pub pvz: PickupPoint,
    /// Receptions ordered by `date_time` descending.
    pub receptions: Vec<ReceptionListing>,
}

impl PickupPointListing {
    /// Group flat rows into listings.
    ///
    /// `pvzs` fixes the output order. Receptions and products keep their
    /// relative input order within each group, so callers pass them already
    /// sorted newest first. Rows whose parent is absent are dropped.
    #[must_use]
    pub fn assemble(
        pvzs: Vec<PickupPoint>,
        receptions: Vec<Reception>,
        products: Vec<Product>,
    ) -> Vec<Self> {
        let mut products_by_reception: HashMap<Uuid, Vec<Product>> = HashMap::new();
        for product in products {
            products_by_reception
                .entry(product.reception_id)
                .or_default()
                .push(product);
        }

        let mut receptions_by_pvz: HashMap<Uuid, Vec<ReceptionListing>> = HashMap::new();
        for reception in receptions {
            let products = products_by_reception
                .remove(&reception.id)
                .unwrap_or_default();
            receptions_by_pvz
                .entry(reception.pvz_id)
                .or_default()
                .push(ReceptionListing {
                    reception,
                    products,
                });
        }

        pvzs.into_iter()
            .map(|pvz| {
                let receptions = receptions_by_pvz.remove(&pvz.id).unwrap_or_default();
                Self { pvz, receptions }
            })
            .collect()
    }
}

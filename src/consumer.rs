//! Energy consumers.

use serde::Serialize;

use crate::error::{Result, ensure_positive};

/// Source of energy demand faced by the market.
pub trait Consumer {
    /// Quantity of energy demanded.
    fn demand(&self) -> f64;
}

impl<T: Consumer + ?Sized> Consumer for &T {
    fn demand(&self) -> f64 {
        (**self).demand()
    }
}

/// Consumer with a fixed, price-inelastic energy demand.
///
/// # Examples
///
/// ```
/// use energy_transition::consumer::{Consumer, InelasticConsumer};
///
/// let households = InelasticConsumer::new(1000.0).unwrap();
/// assert_eq!(households.demand(), 1000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InelasticConsumer {
    quantity: f64,
}

impl InelasticConsumer {
    /// Creates a consumer demanding `quantity` units of energy every period.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Domain` if `quantity` is not a finite positive number.
    pub fn new(quantity: f64) -> Result<Self> {
        Ok(Self {
            quantity: ensure_positive("energy demand", quantity)?,
        })
    }
}

impl Consumer for InelasticConsumer {
    fn demand(&self) -> f64 {
        self.quantity
    }
}

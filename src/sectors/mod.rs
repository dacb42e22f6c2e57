//! Energy producers: sector algebra and the capability the market clears against.

/// Non-renewable (capital + fossil fuel) sector.
pub mod non_renewable;
/// Renewable (capital only) sector.
pub mod renewable;
pub mod types;

// Re-export the main types for convenience
pub use non_renewable::NonRenewableSector;
pub use renewable::{RenewableCapital, RenewableSector};
pub use types::{EnergySector, MarketParameters, ModelParameters, SectorOutcome, TechnologyParameters};

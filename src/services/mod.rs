// src/services/mod.rs

//! External service seams and their AWS SDK implementations.
//!
//! Each handler talks to AWS through a small trait so tests can substitute
//! in-memory fakes:
//! - Entitlement lookup (`EntitlementSource`)
//! - Registration token resolution (`CustomerResolver`)
//! - Entitlement queue publishing (`EntitlementQueue`)

mod entitlements;
mod metering;
mod queue;

pub use entitlements::{EntitlementSource, MarketplaceEntitlements};
pub use metering::{CustomerResolver, MarketplaceMetering};
pub use queue::{EntitlementQueue, SqsEntitlementQueue};

// src/models/mod.rs

//! Domain models and wire shapes for the marketplace integration.

mod entitlement;
mod subscriber;

// Re-export all public types
pub use entitlement::{
    ACTION_ENTITLEMENT_UPDATED, EntitlementNotification, EntitlementRecord, EntitlementUpdate,
    EntitlementValue, NotificationMessage,
};
pub use subscriber::{REQUIRED_INPUTS, RegistrationForm, ResolvedCustomer, SubscriberRecord};

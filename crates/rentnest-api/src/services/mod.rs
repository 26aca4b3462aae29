//! Multi-step sequences behind the handlers.
//!
//! Each sequence issues dependent remote calls one after another. None of
//! them is atomic: a failing step leaves the earlier writes in place and the
//! error propagates to the caller unchanged.

pub mod conversation;
pub mod listings;
pub mod profiles;
pub mod tenancy;
pub mod uploads;

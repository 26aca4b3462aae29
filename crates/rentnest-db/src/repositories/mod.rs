//! Repositories over the remote store
//
// Listings and their status
mod listing;
//
// Tenancies
mod tenancy;
//
// Conversations and messages
mod conversation;
//
// Reviews and saved listings
mod review;
mod save;
//
// Landlord / tenant profiles and lookup tables
mod lookup;
mod profile;

pub use conversation::{ConversationRepository, MessageRepository};
pub use listing::ListingRepository;
pub use lookup::LookupRepository;
pub use profile::ProfileRepository;
pub use review::ReviewRepository;
pub use save::SaveRepository;
pub use tenancy::TenancyRepository;

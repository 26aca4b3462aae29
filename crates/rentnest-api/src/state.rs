//! Application state and sub-state extractors.
//!
//! AppState is split into sub-states so handlers can extract only what they
//! need via Axum's `FromRef`. The remote store handle is built once in
//! `setup` and shared by every repository.

use axum::extract::FromRef;
use rentnest_core::models::ProfileKind;
use rentnest_core::Config;
use rentnest_db::{
    ConversationRepository, ListingRepository, LookupRepository, MessageRepository,
    ProfileRepository, RemoteStore, ReviewRepository, SaveRepository, TenancyRepository,
};
use rentnest_storage::Storage;
use std::sync::Arc;

/// One repository per table group, all sharing the same remote store.
#[derive(Clone)]
pub struct Repositories {
    pub listings: ListingRepository,
    pub tenancies: TenancyRepository,
    pub conversations: ConversationRepository,
    pub messages: MessageRepository,
    pub reviews: ReviewRepository,
    pub saves: SaveRepository,
    pub lookups: LookupRepository,
    pub landlords: ProfileRepository,
    pub tenants: ProfileRepository,
}

impl Repositories {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            listings: ListingRepository::new(store.clone()),
            tenancies: TenancyRepository::new(store.clone()),
            conversations: ConversationRepository::new(store.clone()),
            messages: MessageRepository::new(store.clone()),
            reviews: ReviewRepository::new(store.clone()),
            saves: SaveRepository::new(store.clone()),
            lookups: LookupRepository::new(store.clone()),
            landlords: ProfileRepository::new(store.clone(), ProfileKind::Landlord),
            tenants: ProfileRepository::new(store, ProfileKind::Tenant),
        }
    }

    pub fn profiles(&self, kind: ProfileKind) -> &ProfileRepository {
        match kind {
            ProfileKind::Landlord => &self.landlords,
            ProfileKind::Tenant => &self.tenants,
        }
    }
}

/// Buckets images are written to, plus the upload size cap.
#[derive(Clone)]
pub struct ImageStorage {
    pub profiles: Arc<dyn Storage>,
    pub listings: Arc<dyn Storage>,
    pub max_upload_bytes: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn RemoteStore>,
    pub repos: Repositories,
    pub images: ImageStorage,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn RemoteStore>,
        profile_images: Arc<dyn Storage>,
        listing_images: Arc<dyn Storage>,
    ) -> Self {
        let images = ImageStorage {
            profiles: profile_images,
            listings: listing_images,
            max_upload_bytes: config.max_upload_size_bytes(),
        };
        Self {
            repos: Repositories::new(store.clone()),
            config,
            store,
            images,
        }
    }
}

impl FromRef<Arc<AppState>> for Repositories {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.repos.clone()
    }
}

impl FromRef<Arc<AppState>> for ImageStorage {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.images.clone()
    }
}

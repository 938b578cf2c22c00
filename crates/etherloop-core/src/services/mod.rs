pub mod fragment_registry;
pub mod marketplace_service;
pub mod playback;
pub mod profile_service;

pub use fragment_registry::FragmentRegistry;
pub use marketplace_service::MarketplaceService;
pub use playback::{PlaybackRevealController, PlaybackSession};
pub use profile_service::{ProfileService, UserProfile};

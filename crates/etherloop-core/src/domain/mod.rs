pub mod fragment;
pub mod ids;
pub mod mint;
pub mod network;
pub mod playback;
pub mod price;
pub mod song;
pub mod user;

pub use fragment::{Fragment, FragmentStatus};
pub use ids::{FragmentId, SongId, UserId};
pub use mint::MintResult;
pub use network::Network;
pub use playback::{Audibility, PlaybackState, Tick};
pub use price::Price;
pub use song::{EARLY_ADOPTER_ID, Song, SongDraft};
pub use user::User;

pub mod audio;
pub mod chain;
pub mod progress;
pub mod random;
pub mod wallet;

pub use audio::AudioSurface;
pub use chain::MarketplaceChain;
pub use progress::{MintReporter, NoopReporter};
pub use random::{PcgRandom, RandomSource};
pub use wallet::{WalletConnection, WalletProvider};

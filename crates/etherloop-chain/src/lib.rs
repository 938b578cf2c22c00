pub mod config;
pub mod error;
pub mod mock_chain;
pub mod wallet;

pub use config::{CatalogConfig, ChainConfig};
pub use error::ChainError;
pub use mock_chain::MockChain;
pub use wallet::MockWallet;

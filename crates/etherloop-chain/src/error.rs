use etherloop_config::ConfigError;
use etherloop_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
  #[error("config error: {0}")]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Core(#[from] CoreError),
}

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use etherloop_core::CoreError;
use etherloop_core::domain::{MintResult, Song, SongId, User};
use etherloop_core::ports::{MarketplaceChain, PcgRandom};
use etherloop_core::services::FragmentRegistry;

use crate::config::{CatalogConfig, ChainConfig};
use crate::error::ChainError;

/// Simulación de la cadena sobre un `FragmentRegistry` en memoria.
///
/// La latencia de red se simula *antes* de entrar al registro: la lectura
/// de fragmentos libres y la asignación ocurren juntas dentro de
/// `FragmentRegistry::mint_fragment`, sin ningún `await` en medio.
pub struct MockChain {
  registry: Arc<FragmentRegistry>,
  fetch_delay: Duration,
  mint_delay: Duration,
}

impl MockChain {
  pub fn new(registry: Arc<FragmentRegistry>, config: &ChainConfig) -> Self {
    Self { registry, fetch_delay: config.fetch_delay(), mint_delay: config.mint_delay() }
  }

  /// Crea el registro según `[chain]` y siembra la canción de `[catalog]`.
  pub fn bootstrap(chain: &ChainConfig, catalog: &CatalogConfig) -> Result<(Self, SongId), ChainError> {
    let rng = match chain.seed {
      Some(seed) => PcgRandom::seeded(seed),
      None => PcgRandom::from_entropy(),
    };
    let registry = Arc::new(FragmentRegistry::new(rng));
    let song_id = registry.insert(catalog.to_draft().build()?)?;

    debug!(song = %song_id, network = %chain.network, "mock chain ready");
    Ok((Self::new(registry, chain), song_id))
  }

  pub fn registry(&self) -> &Arc<FragmentRegistry> {
    &self.registry
  }
}

async fn simulate_latency(delay: Duration) {
  if !delay.is_zero() {
    tokio::time::sleep(delay).await;
  }
}

#[async_trait]
impl MarketplaceChain for MockChain {
  async fn fetch_song(&self, song_id: SongId) -> Result<Song, CoreError> {
    simulate_latency(self.fetch_delay).await;
    self.registry.get_song(song_id)
  }

  async fn mint_fragment(&self, song_id: SongId, user: &User) -> Result<MintResult, CoreError> {
    debug!(song = %song_id, user = %user.id, delay_ms = self.mint_delay.as_millis() as u64, "submitting mint");
    simulate_latency(self.mint_delay).await;
    self.registry.mint_fragment(song_id, &user.id)
  }
}

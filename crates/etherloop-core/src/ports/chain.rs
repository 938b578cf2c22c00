use async_trait::async_trait;

use crate::domain::{MintResult, Song, SongId, User};
use crate::errors::CoreError;

/// Port hacia la "cadena": las llamadas que en producción serían un
/// contrato inteligente.
///
/// Las implementaciones pueden tardar (latencia de red), pero el blind mint
/// tiene que ser atómico: o se completa, o no cambia nada.
#[async_trait]
pub trait MarketplaceChain: Send + Sync {
  async fn fetch_song(&self, song_id: SongId) -> Result<Song, CoreError>;
  async fn mint_fragment(&self, song_id: SongId, user: &User) -> Result<MintResult, CoreError>;
}

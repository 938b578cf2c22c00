use async_trait::async_trait;

use crate::domain::{Fragment, SongId};
use crate::errors::CoreError;

// El frontend implementará esto para pintar el estado "Minting...".
#[async_trait]
pub trait MintReporter: Send + Sync {
  async fn on_pending(&self, song_id: SongId);
  async fn on_minted(&self, song_id: SongId, fragment: &Fragment);
  async fn on_sold_out(&self, song_id: SongId);
  async fn on_error(&self, song_id: SongId, error: &CoreError);
}

/// Reporter que descarta todos los eventos.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

#[async_trait]
impl MintReporter for NoopReporter {
  async fn on_pending(&self, _song_id: SongId) {}
  async fn on_minted(&self, _song_id: SongId, _fragment: &Fragment) {}
  async fn on_sold_out(&self, _song_id: SongId) {}
  async fn on_error(&self, _song_id: SongId, _error: &CoreError) {}
}

use etherloop_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};
use etherloop_core::domain::{Network, SongDraft, User};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChainConfig {
  /// Red a la que apunta la wallet por defecto.
  #[serde(default)]
  pub network: Network,

  /// Latencia simulada de `fetch_song`.
  #[serde(default = "default_fetch_delay_ms")]
  pub fetch_delay_ms: u64,

  /// Latencia simulada de `mint_fragment`.
  #[serde(default = "default_mint_delay_ms")]
  pub mint_delay_ms: u64,

  /// Semilla fija para el blind mint; sin ella se usa entropía del sistema.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub seed: Option<u64>,
}

fn default_fetch_delay_ms() -> u64 {
  800
}

fn default_mint_delay_ms() -> u64 {
  2000
}

impl Default for ChainConfig {
  fn default() -> Self {
    ChainConfig {
      network: Network::default(),
      fetch_delay_ms: default_fetch_delay_ms(),
      mint_delay_ms: default_mint_delay_ms(),
      seed: None,
    }
  }
}

impl ChainConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = CONFIG_BACKEND.load_section_with_default("chain")?;
    CONFIG_BACKEND.save_section("chain", &cfg)?;
    Ok(cfg)
  }

  /// Variante para tests: inyectar un backend distinto.
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section_with_default("chain")
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    CONFIG_BACKEND.save_section("chain", self)
  }

  pub fn fetch_delay(&self) -> Duration {
    Duration::from_millis(self.fetch_delay_ms)
  }

  pub fn mint_delay(&self) -> Duration {
    Duration::from_millis(self.mint_delay_ms)
  }
}

/// Canción de demo que se siembra al arrancar.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
  pub title: String,
  pub artist_name: String,
  pub artist_address: String,
  pub artist_avatar: String,
  pub audio_url: String,
  pub cover_art: String,
  pub duration_secs: f64,
  pub total_fragments: u32,
  pub price: f64,
  /// Fragmentos iniciales que nacen ya minteados.
  pub early_adopters: u32,
}

impl Default for CatalogConfig {
  fn default() -> Self {
    CatalogConfig {
      title: "Neon Nights (Etherlink Mix)".into(),
      artist_name: "dj_ether".into(),
      artist_address: "0x123...456".into(),
      artist_avatar: "https://picsum.photos/seed/artist1/50/50".into(),
      audio_url: "https://assets.mixkit.co/music/preview/mixkit-tech-house-vibes-130.mp3".into(),
      cover_art: "https://picsum.photos/seed/album1/400/400".into(),
      duration_secs: 30.0,
      total_fragments: 8,
      price: 0.05,
      early_adopters: 2,
    }
  }
}

impl CatalogConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = CONFIG_BACKEND.load_section_with_default("catalog")?;
    CONFIG_BACKEND.save_section("catalog", &cfg)?;
    Ok(cfg)
  }

  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section_with_default("catalog")
  }

  pub fn to_draft(&self) -> SongDraft {
    SongDraft {
      title: self.title.clone(),
      artist: User::artist("artist_1", &self.artist_address, &self.artist_name, &self.artist_avatar),
      audio_url: self.audio_url.clone(),
      cover_art: self.cover_art.clone(),
      duration: self.duration_secs,
      total_fragments: self.total_fragments,
      price: self.price,
      early_adopters: self.early_adopters,
    }
  }
}

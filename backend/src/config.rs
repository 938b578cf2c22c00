use etherloop_chain::{CatalogConfig, ChainConfig};
use etherloop_config::{ConfigBackend, ConfigError};
use etherloop_core::domain::{Fragment, Network, Song};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Command-line settings that take precedence over `etherloop.toml`.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
  pub seed: Option<u64>,
  pub no_delay: bool,
  pub network: Option<Network>,
}

impl From<&Cli> for Overrides {
  fn from(cli: &Cli) -> Self {
    Overrides { seed: cli.seed, no_delay: cli.no_delay, network: cli.network.map(Network::from) }
  }
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
  pub chain: ChainConfig,
  pub catalog: CatalogConfig,
}

impl RuntimeConfig {
  /// Loads `[chain]` and `[catalog]` from the global backend, writing defaults back.
  pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
    Ok(Self { chain: ChainConfig::load()?, catalog: CatalogConfig::load()? }.apply(overrides))
  }

  pub fn load_from<B: ConfigBackend>(backend: &B, overrides: &Overrides) -> Result<Self, ConfigError> {
    Ok(Self { chain: ChainConfig::load_from(backend)?, catalog: CatalogConfig::load_from(backend)? }.apply(overrides))
  }

  fn apply(mut self, overrides: &Overrides) -> Self {
    if overrides.seed.is_some() {
      self.chain.seed = overrides.seed;
    }
    if overrides.no_delay {
      self.chain.fetch_delay_ms = 0;
      self.chain.mint_delay_ms = 0;
    }
    if let Some(network) = overrides.network {
      self.chain.network = network;
    }
    self
  }
}

/// DTO for serializing a fragment in `show --json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct FragmentDto {
  pub number: u32,
  pub start_time: f64,
  pub end_time: f64,
  pub price: String,
  pub status: String,
  pub owner: Option<String>,
}

impl From<&Fragment> for FragmentDto {
  fn from(f: &Fragment) -> Self {
    FragmentDto {
      number: f.display_number(),
      start_time: f.start_time,
      end_time: f.end_time,
      price: f.price.to_string(),
      status: f.status().to_string(),
      owner: f.owner_id.as_ref().map(|o| o.to_string()),
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SongDto {
  pub id: String,
  pub title: String,
  pub artist: String,
  pub duration: f64,
  pub total_fragments: u32,
  pub minted_fragments: u32,
  pub reveal_percentage: u32,
  pub sold_out: bool,
  pub fragments: Vec<FragmentDto>,
}

impl From<&Song> for SongDto {
  fn from(song: &Song) -> Self {
    SongDto {
      id: song.id.to_string(),
      title: song.title.clone(),
      artist: song.artist.display_name().to_string(),
      duration: song.duration,
      total_fragments: song.total_fragments,
      minted_fragments: song.minted_fragments,
      reveal_percentage: song.reveal_percentage(),
      sold_out: song.is_sold_out(),
      fragments: song.fragments.iter().map(FragmentDto::from).collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use etherloop_config::{EtherloopPaths, TomlConfigBackend};
  use tempfile::tempdir;

  #[test]
  fn cli_overrides_win() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::new(EtherloopPaths::from_base(tmp.path()).unwrap());
    backend.save_section("chain", &ChainConfig { seed: Some(1), ..ChainConfig::default() }).unwrap();

    let overrides = Overrides { seed: Some(99), no_delay: true, network: Some(Network::Mainnet) };
    let cfg = RuntimeConfig::load_from(&backend, &overrides).unwrap();

    assert_eq!(cfg.chain.seed, Some(99));
    assert_eq!(cfg.chain.mint_delay_ms, 0);
    assert_eq!(cfg.chain.fetch_delay_ms, 0);
    assert_eq!(cfg.chain.network, Network::Mainnet);
    assert_eq!(cfg.catalog.total_fragments, 8);

    let untouched = RuntimeConfig::load_from(&backend, &Overrides::default()).unwrap();
    assert_eq!(untouched.chain.seed, Some(1));
    assert_eq!(untouched.chain.mint_delay_ms, 2000);
  }

  #[test]
  fn dto_reports_progress() {
    let song = CatalogConfig::default().to_draft().build().unwrap();
    let dto = SongDto::from(&song);

    assert_eq!(dto.reveal_percentage, 25);
    assert_eq!(dto.fragments[0].status, "UNLOCKED");
    assert_eq!(dto.fragments[0].owner.as_deref(), Some("early_adopter"));
    assert_eq!(dto.fragments[2].status, "LOCKED");
    assert_eq!(dto.fragments[7].number, 8);
  }
}

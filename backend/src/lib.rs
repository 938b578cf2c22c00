mod cli;
mod config;
mod infrastructure;

use std::sync::Arc;

use anyhow::{Context, ensure};
use etherloop_chain::{MockChain, MockWallet};
use etherloop_core::domain::{Song, SongId};
use etherloop_core::ports::WalletProvider;
use etherloop_core::services::{FragmentRegistry, MarketplaceService, PlaybackSession, ProfileService};
use tracing::info;

pub use crate::cli::{Cli, Command};
use crate::config::{Overrides, RuntimeConfig, SongDto};
use infrastructure::reporter::TerminalReporter;
use infrastructure::surface::TerminalSurface;

/// Type alias to simplify the generic signature of the Service.
type ConcreteMarketplace = MarketplaceService<MockChain, MockWallet, TerminalReporter>;

/// Everything a command needs, wired once per process.
struct AppState {
  marketplace: ConcreteMarketplace,
  profiles: ProfileService,
  registry: Arc<FragmentRegistry>,
  song_id: SongId,
}

impl AppState {
  fn build(config: &RuntimeConfig) -> anyhow::Result<Self> {
    // 1. Chain adapter: in-memory registry seeded with the catalog song.
    let (chain, song_id) = MockChain::bootstrap(&config.chain, &config.catalog).context("seeding catalog")?;
    let registry = Arc::clone(chain.registry());

    // 2. Wallet adapter, disconnected until a command provides an address.
    let wallet = MockWallet::disconnected(config.chain.network);

    // 3. Service wiring.
    let marketplace = MarketplaceService::new(chain, wallet, TerminalReporter);

    info!(song = %song_id, network = %config.chain.network, "etherloop ready");
    Ok(Self { marketplace, profiles: ProfileService::new(), registry, song_id })
  }

  fn connect(&self, address: &str) -> anyhow::Result<()> {
    self.marketplace.wallet().connect(address);
    let connection = self.marketplace.wallet().connection();
    if let Some(profile) = self.profiles.profile_for(&connection)? {
      if profile.is_first_time {
        println!("Welcome to EtherLoop, {}!", profile.user.display_name());
      }
      if profile.network.is_none() {
        println!("Warning: chain id {} is not an Etherlink network", profile.chain_id);
      }
    }
    Ok(())
  }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
  let config = RuntimeConfig::load(&Overrides::from(&cli)).context("loading configuration")?;
  let state = AppState::build(&config)?;

  match cli.command {
    Command::Show { json } => show(&state, json).await,
    Command::Mint { address, count } => mint(&state, address.as_deref(), count).await,
    Command::SellOut { address } => mint(&state, Some(address.as_str()), u32::MAX).await,
    Command::Play { step, mint_as } => {
      if let Some(address) = mint_as {
        mint(&state, Some(address.as_str()), 1).await?;
      }
      play(&state, step).await
    }
  }
}

async fn show(state: &AppState, json: bool) -> anyhow::Result<()> {
  let song = state.marketplace.load_song(state.song_id).await?;

  if json {
    println!("{}", serde_json::to_string_pretty(&SongDto::from(&song))?);
  } else {
    print_song(&song);
  }
  Ok(())
}

async fn mint(state: &AppState, address: Option<&str>, count: u32) -> anyhow::Result<()> {
  if let Some(address) = address {
    state.connect(address)?;
  }

  for _ in 0..count {
    let result = state.marketplace.blind_mint(state.song_id).await?;
    if result.is_sold_out() {
      break;
    }
  }

  let song = state.registry.get_song(state.song_id)?;
  println!("{}", progress_line(&song));
  Ok(())
}

async fn play(state: &AppState, step: f64) -> anyhow::Result<()> {
  ensure!(step.is_finite() && step > 0.0, "--step must be a positive number of seconds");

  let song = state.marketplace.load_song(state.song_id).await?;
  let mut session = PlaybackSession::new();
  let mut surface = TerminalSurface::default();

  session.toggle();
  println!("> {} ({:.0}s)", song.title, song.duration);

  for tick in 0u32.. {
    let time = tick as f64 * step;
    if time >= song.duration {
      break;
    }

    // Re-read every tick so a concurrent mint is heard on the next one.
    let fragments = state.registry.fragments(state.song_id)?;
    let out = session.handle_tick(&fragments, time, &mut surface);

    if let Some(fragment) = out.current_fragment {
      println!(
        "{time:>7.2}s  #{:<2} [{}]  volume {:.0}",
        fragment.display_number(),
        fragment.status(),
        surface.volume()
      );
    }
  }

  session.finish();
  println!("[] stopped");
  Ok(())
}

fn print_song(song: &Song) {
  println!("{} - {}", song.title, song.artist.display_name());
  println!("{}", progress_line(song));
  for f in &song.fragments {
    let owner = f.owner_id.as_ref().map(|o| o.to_string()).unwrap_or_else(|| "-".to_string());
    println!(
      "  #{:<2} {:>6.2}s - {:>6.2}s  {:>8}  {:<8}  {owner}",
      f.display_number(),
      f.start_time,
      f.end_time,
      f.price,
      f.status().to_string()
    );
  }
}

fn progress_line(song: &Song) -> String {
  const WIDTH: usize = 20;
  let filled = (song.reveal_percentage() as usize * WIDTH) / 100;
  format!(
    "REVEAL PROGRESS [{}{}] {}%  {}/{} Fragments Minted",
    "#".repeat(filled),
    ".".repeat(WIDTH - filled),
    song.reveal_percentage(),
    song.minted_fragments,
    song.total_fragments
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use etherloop_chain::{CatalogConfig, ChainConfig};

  fn quiet_config() -> RuntimeConfig {
    RuntimeConfig {
      chain: ChainConfig { fetch_delay_ms: 0, mint_delay_ms: 0, seed: Some(4), ..ChainConfig::default() },
      catalog: CatalogConfig::default(),
    }
  }

  #[test]
  fn progress_bar_scales_with_mints() {
    let song = CatalogConfig::default().to_draft().build().unwrap();
    assert_eq!(progress_line(&song), "REVEAL PROGRESS [#####...............] 25%  2/8 Fragments Minted");
  }

  #[tokio::test]
  async fn sell_out_mints_every_fragment() {
    let state = AppState::build(&quiet_config()).unwrap();

    mint(&state, Some("0x71C7656EC7ab88b098defB751B7401B5f6d89A23"), u32::MAX).await.unwrap();

    let song = state.registry.get_song(state.song_id).unwrap();
    assert!(song.is_sold_out());
    let owned_by_minter =
      song.fragments.iter().filter(|f| f.owner_id.as_ref().is_some_and(|o| o.as_str().starts_with("0x71c7"))).count();
    assert_eq!(owned_by_minter, 6);
  }

  #[tokio::test]
  async fn mint_without_wallet_fails_cleanly() {
    let state = AppState::build(&quiet_config()).unwrap();

    let err = mint(&state, None, 1).await.unwrap_err();

    assert!(err.to_string().contains("no wallet connected"));
    assert_eq!(state.registry.get_song(state.song_id).unwrap().minted_fragments, 2);
  }

  #[tokio::test]
  async fn play_rejects_bad_step() {
    let state = AppState::build(&quiet_config()).unwrap();
    assert!(play(&state, 0.0).await.is_err());
    assert!(play(&state, 2.5).await.is_ok());
  }
}

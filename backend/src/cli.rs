use clap::{Parser, Subcommand, ValueEnum};
use etherloop_core::domain::Network;

/// EtherLoop - blind-mint audio fragments
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
  /// Fixed seed for blind-mint selection (reproducible runs)
  #[arg(long, global = true)]
  pub seed: Option<u64>,

  /// Skip the simulated network latency
  #[arg(long, global = true)]
  pub no_delay: bool,

  /// Etherlink network the wallet is connected to
  #[arg(long, global = true, value_enum)]
  pub network: Option<NetworkArg>,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Show the song, its fragments and the reveal progress
  Show {
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
  },
  /// Blind-mint fragments with the given wallet
  Mint {
    /// Wallet address (omit it to mint with no wallet connected)
    #[arg(long)]
    address: Option<String>,

    /// Number of consecutive mints
    #[arg(long, default_value_t = 1)]
    count: u32,
  },
  /// Mint until the song is sold out
  SellOut {
    #[arg(long)]
    address: String,
  },
  /// Simulate playback and print the volume gate on every tick
  Play {
    /// Seconds between ticks
    #[arg(long, default_value_t = 1.0)]
    step: f64,

    /// Mint one fragment with this wallet before playing
    #[arg(long)]
    mint_as: Option<String>,
  },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NetworkArg {
  Mainnet,
  Testnet,
}

impl From<NetworkArg> for Network {
  fn from(arg: NetworkArg) -> Self {
    match arg {
      NetworkArg::Mainnet => Network::Mainnet,
      NetworkArg::Testnet => Network::Testnet,
    }
  }
}

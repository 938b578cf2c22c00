use serde::{Deserialize, Serialize};
use std::fmt;

/// Redes de Etherlink soportadas por la wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
  Mainnet,
  #[default]
  Testnet,
}

/// Moneda nativa de una red.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCurrency {
  pub name: &'static str,
  pub symbol: &'static str,
  pub decimals: u8,
}

const TEZ: NativeCurrency = NativeCurrency { name: "Tezos", symbol: "XTZ", decimals: 18 };

impl Network {
  pub const ALL: [Network; 2] = [Network::Mainnet, Network::Testnet];

  pub fn chain_id(self) -> u64 {
    match self {
      Network::Mainnet => 42793,
      Network::Testnet => 128123,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Network::Mainnet => "Etherlink Mainnet",
      Network::Testnet => "Etherlink Testnet",
    }
  }

  pub fn rpc_url(self) -> &'static str {
    match self {
      Network::Mainnet => "https://node.etherlink.com",
      Network::Testnet => "https://node.etherlink.testnet.tez.ie",
    }
  }

  pub fn explorer_url(self) -> &'static str {
    match self {
      Network::Mainnet => "https://explorer.etherlink.com",
      Network::Testnet => "https://testnet-explorer.etherlink.com",
    }
  }

  pub fn currency(self) -> NativeCurrency {
    TEZ
  }

  /// Busca la red por su chain id.
  pub fn from_chain_id(chain_id: u64) -> Option<Self> {
    Self::ALL.into_iter().find(|n| n.chain_id() == chain_id)
  }
}

impl fmt::Display for Network {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

use serde::{Deserialize, Serialize};

use crate::domain::Network;

/// Estado de conexión tal como lo entrega el proveedor de wallet.
///
/// El núcleo lo trata como entrada pura: el `UserId` para mintear se
/// deriva de `address` en el llamador.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConnection {
  pub connected: bool,
  pub address: Option<String>,
  pub chain_id: u64,
}

impl WalletConnection {
  pub fn disconnected(chain_id: u64) -> Self {
    Self { connected: false, address: None, chain_id }
  }

  pub fn connected(address: impl Into<String>, chain_id: u64) -> Self {
    Self { connected: true, address: Some(address.into()), chain_id }
  }

  /// Dirección utilizable, solo si la wallet está conectada.
  pub fn active_address(&self) -> Option<&str> {
    if self.connected { self.address.as_deref() } else { None }
  }

  pub fn network(&self) -> Option<Network> {
    Network::from_chain_id(self.chain_id)
  }
}

/// Port del proveedor de wallet/conexión (colaborador externo).
pub trait WalletProvider: Send + Sync {
  fn connection(&self) -> WalletConnection;
}

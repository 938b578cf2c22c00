use std::sync::RwLock;

use etherloop_core::domain::Network;
use etherloop_core::ports::{WalletConnection, WalletProvider};

/// Wallet simulada: el host decide cuándo conectar o desconectar.
pub struct MockWallet {
  state: RwLock<WalletConnection>,
}

impl MockWallet {
  pub fn disconnected(network: Network) -> Self {
    Self { state: RwLock::new(WalletConnection::disconnected(network.chain_id())) }
  }

  pub fn connected(address: &str, network: Network) -> Self {
    Self { state: RwLock::new(WalletConnection::connected(address, network.chain_id())) }
  }

  pub fn connect(&self, address: &str) {
    if let Ok(mut state) = self.state.write() {
      state.connected = true;
      state.address = Some(address.to_string());
    }
  }

  pub fn disconnect(&self) {
    if let Ok(mut state) = self.state.write() {
      state.connected = false;
      state.address = None;
    }
  }

  pub fn switch_network(&self, network: Network) {
    if let Ok(mut state) = self.state.write() {
      state.chain_id = network.chain_id();
    }
  }
}

impl WalletProvider for MockWallet {
  fn connection(&self) -> WalletConnection {
    match self.state.read() {
      Ok(state) => state.clone(),
      // Con el lock envenenado la wallet se considera desconectada.
      Err(_) => WalletConnection::disconnected(Network::default().chain_id()),
    }
  }
}

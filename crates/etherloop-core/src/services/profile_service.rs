use std::collections::HashSet;
use std::sync::Mutex;

use serde::Serialize;

use crate::domain::{Network, User};
use crate::errors::CoreError;
use crate::ports::WalletConnection;

/// Perfil del oyente conectado.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
  pub user: User,
  pub chain_id: u64,
  /// Red conocida, si el chain id corresponde a Etherlink.
  pub network: Option<Network>,
  /// Primera vez que esta dirección se conecta en el proceso (onboarding).
  pub is_first_time: bool,
}

/// Traduce la conexión de la wallet a un perfil de usuario.
#[derive(Debug, Default)]
pub struct ProfileService {
  visited: Mutex<HashSet<String>>,
}

impl ProfileService {
  pub fn new() -> Self {
    Self::default()
  }

  /// `Ok(None)` si no hay wallet conectada.
  pub fn profile_for(&self, connection: &WalletConnection) -> Result<Option<UserProfile>, CoreError> {
    let Some(address) = connection.active_address() else {
      return Ok(None);
    };

    let user = User::from_address(address)?;
    let is_first_time = {
      let mut visited = self.visited.lock().map_err(|_| CoreError::poisoned("profile"))?;
      visited.insert(user.id.as_str().to_string())
    };

    Ok(Some(UserProfile { chain_id: connection.chain_id, network: connection.network(), user, is_first_time }))
  }
}

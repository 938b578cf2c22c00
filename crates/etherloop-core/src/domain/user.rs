use serde::{Deserialize, Serialize};

use crate::domain::ids::UserId;
use crate::errors::CoreError;

/// Usuario identificado por su wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  /// Clave de propiedad guardada en `Fragment::owner_id`.
  pub id: UserId,
  /// Dirección de la wallet (`0x...`).
  pub address: String,
  /// Nombre visible, si lo tiene.
  pub username: Option<String>,
  pub avatar_url: String,
  pub is_artist: bool,
}

impl User {
  /// Longitud mínima aceptada para una dirección (`0x` + 8 caracteres).
  const MIN_ADDRESS_LEN: usize = 10;

  /// Construye el perfil de un oyente a partir de la dirección conectada.
  ///
  /// - `id`: la dirección en minúsculas.
  /// - `username`: `user_<4 primeros>...<4 últimos>`.
  /// - `avatar_url`: avatar determinista derivado de la dirección.
  pub fn from_address(address: &str) -> Result<Self, CoreError> {
    let address = address.trim();

    if !address.is_ascii() || address.len() < Self::MIN_ADDRESS_LEN || !address.starts_with("0x") {
      return Err(CoreError::Precondition(format!("invalid wallet address: {address:?}")));
    }

    let head = &address[2..6];
    let tail = &address[address.len() - 4..];

    Ok(Self {
      id: UserId::new(address.to_lowercase()),
      address: address.to_string(),
      username: Some(format!("user_{head}...{tail}")),
      avatar_url: format!("https://effigy.im/a/{address}.png"),
      is_artist: false,
    })
  }

  /// Perfil de artista con nombre propio (lo usa el catálogo sembrado).
  pub fn artist(id: impl Into<UserId>, address: &str, username: &str, avatar_url: &str) -> Self {
    Self {
      id: id.into(),
      address: address.to_string(),
      username: Some(username.to_string()),
      avatar_url: avatar_url.to_string(),
      is_artist: true,
    }
  }

  /// Nombre a mostrar: el username o, si falta, la dirección.
  pub fn display_name(&self) -> &str {
    self.username.as_deref().unwrap_or(&self.address)
  }
}

// crates/etherloop-core/src/errors.rs
use thiserror::Error;

use crate::domain::SongId;

/// Error genérico del núcleo de EtherLoop.
///
/// Cada variante es un miembro distinto de la taxonomía: las capas
/// superiores (CLI, UI) deben poder distinguir "conecta tu wallet" de
/// "error de red". "Agotado" no es un error: es `MintResult::sold_out()`.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("song {0} not found")]
  NotFound(SongId),

  /// No hay identidad de usuario: la wallet no está conectada.
  #[error("no wallet connected")]
  WalletNotConnected,

  #[error("precondition failed: {0}")]
  Precondition(String),

  #[error("network error: {0}")]
  Network(String),

  #[error("invalid song: {0}")]
  InvalidSong(String),

  #[error("internal error: {0}")]
  Internal(String),
}

impl CoreError {
  /// Mensaje pensado para el usuario final.
  pub fn user_message(&self) -> String {
    match self {
      CoreError::NotFound(_) => "This song does not exist.".to_string(),
      CoreError::WalletNotConnected => "Connect your wallet to mint a fragment.".to_string(),
      CoreError::Precondition(reason) => format!("Cannot mint right now: {reason}."),
      CoreError::Network(_) => "Transaction failed, please try again.".to_string(),
      CoreError::InvalidSong(_) | CoreError::Internal(_) => "Something went wrong.".to_string(),
    }
  }

  /// `true` para los errores que el usuario puede corregir por sí mismo.
  pub fn is_precondition(&self) -> bool {
    matches!(self, CoreError::WalletNotConnected | CoreError::Precondition(_))
  }

  pub(crate) fn poisoned(what: &str) -> Self {
    CoreError::Internal(format!("{what} mutex poisoned"))
  }
}

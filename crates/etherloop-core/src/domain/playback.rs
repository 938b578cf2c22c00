use serde::{Deserialize, Serialize};

use crate::domain::fragment::Fragment;

/// Compuerta binaria de audio para la posición actual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Audibility {
  /// Fragmento sin dueño: se reproduce en silencio.
  Muted = 0,
  /// Fragmento con dueño: volumen completo.
  Audible = 1,
}

impl Audibility {
  /// Valor de la compuerta como entero `{0, 1}`.
  pub fn as_gate(self) -> u8 {
    self as u8
  }

  /// Volumen que se envía a la superficie de audio.
  pub fn volume(self) -> f32 {
    match self {
      Audibility::Muted => 0.0,
      Audibility::Audible => 1.0,
    }
  }
}

/// Salida de un tick de reproducción.
///
/// Si la posición cae fuera de `[0, duration)` no hay fragmento actual ni
/// compuerta: la superficie conserva el volumen que tenía.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
  pub current_fragment: Option<Fragment>,
  pub audibility: Option<Audibility>,
}

/// Estado de una sesión de reproducción.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlaybackState {
  #[default]
  Stopped,
  Playing,
}

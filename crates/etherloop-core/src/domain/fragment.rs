use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ids::{FragmentId, UserId};
use crate::domain::price::Price;

/// Fragmento (Fragment): una porción de la canción que se puede poseer.
///
/// Cubre el intervalo semiabierto `[start_time, end_time)` en segundos.
/// `is_revealed` es siempre igual a `owner_id.is_some()`; por eso los campos
/// de propiedad solo se modifican desde [`Fragment::reveal_to`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
  /// Identificador opaco, único dentro de la canción.
  pub id: FragmentId,
  /// Posición (0..n) dentro de la canción.
  pub index: u32,
  /// Inicio del intervalo, en segundos.
  pub start_time: f64,
  /// Fin (exclusivo) del intervalo, en segundos.
  pub end_time: f64,
  /// Precio unitario.
  pub price: Price,
  /// Dueño actual; `None` significa que aún no se ha minteado.
  pub owner_id: Option<UserId>,
  /// Si el fragmento ya es audible.
  pub is_revealed: bool,
}

/// Estado visible de un fragmento en el visualizador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FragmentStatus {
  Locked,
  Unlocked,
}

impl fmt::Display for FragmentStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FragmentStatus::Locked => f.write_str("LOCKED"),
      FragmentStatus::Unlocked => f.write_str("UNLOCKED"),
    }
  }
}

impl Fragment {
  /// Crea un fragmento sin dueño.
  pub fn unminted(index: u32, start_time: f64, end_time: f64, price: Price) -> Self {
    Self { id: FragmentId::new(), index, start_time, end_time, price, owner_id: None, is_revealed: false }
  }

  pub fn is_minted(&self) -> bool {
    self.owner_id.is_some()
  }

  /// Número que se muestra al usuario (`index + 1`).
  pub fn display_number(&self) -> u32 {
    self.index + 1
  }

  pub fn duration(&self) -> f64 {
    self.end_time - self.start_time
  }

  /// `true` si `time` cae dentro de `[start_time, end_time)`.
  pub fn contains(&self, time: f64) -> bool {
    time >= self.start_time && time < self.end_time
  }

  pub fn status(&self) -> FragmentStatus {
    if self.is_minted() { FragmentStatus::Unlocked } else { FragmentStatus::Locked }
  }

  /// Asigna el dueño y revela el fragmento. La transición es de un solo
  /// sentido: no existe la operación inversa.
  pub(crate) fn reveal_to(&mut self, owner: UserId) {
    self.owner_id = Some(owner);
    self.is_revealed = true;
  }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Precio unitario de un fragmento, en la moneda nativa de la red.
///
/// Internamente se guarda como un entero (`u64`) en formato *fixed-point*
/// con 6 decimales de precisión:
///
/// - `0.0`  → `0`
/// - `0.05` → `50_000`
/// - `1.5`  → `1_500_000`
///
/// Un precio nunca es negativo: el tipo no lo puede representar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Price(u64);

impl Price {
  /// Factor de escala usado para representar decimales (6 cifras).
  const SCALE_FACTOR: u64 = 1_000_000;

  /// Precio cero.
  pub const FREE: Price = Price(0);

  /// Crea un `Price` a partir de un valor en coma flotante.
  ///
  /// Devuelve `None` si el valor es negativo, `NaN` o infinito.
  pub fn new(value: f64) -> Option<Self> {
    if !value.is_finite() || value < 0.0 {
      return None;
    }

    let scaled = (value * Self::SCALE_FACTOR as f64).round();
    if scaled > u64::MAX as f64 {
      return None;
    }

    Some(Self(scaled as u64))
  }

  /// Construye el precio directamente desde unidades escaladas.
  pub fn from_micros(micros: u64) -> Self {
    Self(micros)
  }

  pub fn as_micros(&self) -> u64 {
    self.0
  }

  pub fn as_f64(&self) -> f64 {
    self.0 as f64 / Self::SCALE_FACTOR as f64
  }
}

impl fmt::Display for Price {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(&format!("{:.4}", self.as_f64()))
  }
}

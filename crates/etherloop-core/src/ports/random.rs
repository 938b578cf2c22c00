use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Fuente de aleatoriedad para el blind mint.
///
/// Tiene que ser uniforme, pero no criptográfica. Los tests fijan la
/// semilla para poder afirmar qué fragmento sale exactamente.
pub trait RandomSource: Send {
  /// Devuelve un índice uniforme en `0..len`. `len` nunca es cero.
  fn pick(&mut self, len: usize) -> usize;
}

/// Implementación por defecto sobre PCG32.
pub struct PcgRandom {
  rng: Pcg32,
}

impl PcgRandom {
  /// Generador determinista a partir de una semilla fija.
  pub fn seeded(seed: u64) -> Self {
    Self { rng: Pcg32::seed_from_u64(seed) }
  }

  /// Generador sembrado desde la entropía del sistema.
  pub fn from_entropy() -> Self {
    Self { rng: Pcg32::from_entropy() }
  }
}

impl Default for PcgRandom {
  fn default() -> Self {
    Self::from_entropy()
  }
}

impl RandomSource for PcgRandom {
  fn pick(&mut self, len: usize) -> usize {
    self.rng.gen_range(0..len)
  }
}

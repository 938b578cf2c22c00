use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SongId(Uuid);

impl SongId {
  /// Genera un nuevo identificador único.
  pub fn new() -> Self {
    SongId(Uuid::new_v4())
  }

  /// Construye un `SongId` a partir de un `Uuid` existente.
  pub fn from_uuid(u: Uuid) -> Self {
    SongId(u)
  }

  /// Devuelve el `Uuid` interno.
  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for SongId {
  fn default() -> Self {
    Self::new()
  }
}

impl From<Uuid> for SongId {
  fn from(u: Uuid) -> Self {
    SongId(u)
  }
}

impl From<SongId> for Uuid {
  fn from(id: SongId) -> Self {
    id.0
  }
}

impl fmt::Display for SongId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Identificador opaco de un fragmento.
///
/// Es estable durante toda la vida de la canción y único dentro de ella.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FragmentId(Uuid);

impl FragmentId {
  pub fn new() -> Self {
    FragmentId(Uuid::new_v4())
  }

  pub fn from_uuid(u: Uuid) -> Self {
    FragmentId(u)
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for FragmentId {
  fn default() -> Self {
    Self::new()
  }
}

impl From<Uuid> for FragmentId {
  fn from(u: Uuid) -> Self {
    FragmentId(u)
  }
}

impl fmt::Display for FragmentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Clave de propiedad de un usuario.
///
/// A diferencia de los otros IDs no es un UUID: se deriva de la dirección
/// de la wallet (en minúsculas) o, para datos sembrados, de un alias fijo
/// como `"early_adopter"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
  pub fn new(raw: impl Into<String>) -> Self {
    UserId(raw.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn is_empty(&self) -> bool {
    self.0.trim().is_empty()
  }
}

impl From<&str> for UserId {
  fn from(s: &str) -> Self {
    UserId(s.to_string())
  }
}

impl From<String> for UserId {
  fn from(s: String) -> Self {
    UserId(s)
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

use crate::domain::fragment::Fragment;
use crate::domain::ids::{SongId, UserId};
use crate::domain::price::Price;
use crate::domain::user::User;
use crate::errors::CoreError;
use serde::{Deserialize, Serialize};

/// Dueño asignado a los fragmentos pre-minteados de una canción nueva.
pub const EARLY_ADOPTER_ID: &str = "early_adopter";

/// La Canción (Song): raíz del agregado.
///
/// La canción es la única dueña de su secuencia de fragmentos. Los
/// fragmentos, ordenados por `index`, particionan `[0, duration)` sin huecos
/// ni solapamientos, y `minted_fragments` coincide siempre con el número de
/// fragmentos que tienen dueño.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
  /// Identificador único de la canción dentro del sistema.
  pub id: SongId,
  /// El título de la canción.
  pub title: String,
  /// Artista que publicó la canción.
  pub artist: User,
  /// Origen del audio (IPFS, blob local, URL pública...).
  pub audio_url: String,
  pub cover_art: String,
  /// Forma de onda precalculada, si existe.
  pub waveform_json: Option<String>,
  /// Duración total reproducible, en segundos.
  pub duration: f64,
  /// Número de fragmentos, fijado al crear la canción.
  pub total_fragments: u32,
  /// Fragmentos con dueño.
  pub minted_fragments: u32,
  pub fragments: Vec<Fragment>,
}

impl Song {
  /// Posiciones (dentro de `fragments`) de los fragmentos sin dueño.
  pub fn unminted_positions(&self) -> Vec<usize> {
    self.fragments.iter().enumerate().filter(|(_, f)| !f.is_minted()).map(|(pos, _)| pos).collect()
  }

  pub fn unminted_count(&self) -> usize {
    self.fragments.iter().filter(|f| !f.is_minted()).count()
  }

  pub fn is_sold_out(&self) -> bool {
    self.minted_fragments == self.total_fragments
  }

  /// Progreso de revelado en porcentaje entero (0..=100).
  pub fn reveal_percentage(&self) -> u32 {
    if self.total_fragments == 0 {
      return 0;
    }
    ((self.minted_fragments as f64 / self.total_fragments as f64) * 100.0).round() as u32
  }

  pub fn fragment(&self, index: u32) -> Option<&Fragment> {
    self.fragments.iter().find(|f| f.index == index)
  }

  /// Revela el fragmento en `pos` a favor de `owner` e incrementa el
  /// contador en el mismo paso. Devuelve el fragmento ya modificado.
  ///
  /// El llamador garantiza que `pos` apunta a un fragmento sin dueño.
  pub(crate) fn mint_at(&mut self, pos: usize, owner: UserId) -> Fragment {
    let fragment = &mut self.fragments[pos];
    debug_assert!(!fragment.is_minted(), "fragment {} already minted", fragment.index);

    fragment.reveal_to(owner);
    self.minted_fragments += 1;
    fragment.clone()
  }

  /// Comprueba todas las invariantes del modelo de datos.
  pub fn validate(&self) -> Result<(), CoreError> {
    let invalid = |msg: String| -> Result<(), CoreError> { Err(CoreError::InvalidSong(msg)) };

    if self.fragments.is_empty() {
      return invalid("song has no fragments".into());
    }
    if self.total_fragments as usize != self.fragments.len() {
      return invalid(format!(
        "total_fragments is {} but the song has {} fragments",
        self.total_fragments,
        self.fragments.len()
      ));
    }

    let live = self.fragments.iter().filter(|f| f.is_minted()).count();
    if self.minted_fragments as usize != live {
      return invalid(format!("minted_fragments is {} but {live} fragments are owned", self.minted_fragments));
    }

    let mut expected_start = 0.0;
    for (pos, f) in self.fragments.iter().enumerate() {
      if f.index as usize != pos {
        return invalid(format!("fragment at position {pos} has index {}", f.index));
      }
      if f.start_time != expected_start {
        return invalid(format!("fragment {} starts at {} instead of {expected_start}", f.index, f.start_time));
      }
      if f.start_time >= f.end_time {
        return invalid(format!("fragment {} has an empty interval", f.index));
      }
      if f.is_revealed != f.is_minted() {
        return invalid(format!("fragment {} reveal flag out of sync with owner", f.index));
      }
      if f.owner_id.as_ref().is_some_and(UserId::is_empty) {
        return invalid(format!("fragment {} has an empty owner id", f.index));
      }
      if self.fragments[..pos].iter().any(|other| other.id == f.id) {
        return invalid(format!("duplicate fragment id {}", f.id));
      }
      expected_start = f.end_time;
    }

    if expected_start != self.duration {
      return invalid(format!("fragments end at {expected_start} but the song lasts {}", self.duration));
    }

    Ok(())
  }
}

/// Borrador de canción: "subir y trocear".
///
/// Divide `duration` en `total_fragments` fragmentos iguales. Los primeros
/// `early_adopters` fragmentos nacen ya minteados a [`EARLY_ADOPTER_ID`].
#[derive(Debug, Clone)]
pub struct SongDraft {
  pub title: String,
  pub artist: User,
  pub audio_url: String,
  pub cover_art: String,
  pub duration: f64,
  pub total_fragments: u32,
  pub price: f64,
  pub early_adopters: u32,
}

impl SongDraft {
  pub fn build(self) -> Result<Song, CoreError> {
    if self.total_fragments == 0 {
      return Err(CoreError::InvalidSong("a song needs at least one fragment".into()));
    }
    if !self.duration.is_finite() || self.duration <= 0.0 {
      return Err(CoreError::InvalidSong(format!("invalid duration {}", self.duration)));
    }
    if self.early_adopters > self.total_fragments {
      return Err(CoreError::InvalidSong(format!(
        "{} early adopters for {} fragments",
        self.early_adopters, self.total_fragments
      )));
    }
    let price = Price::new(self.price).ok_or_else(|| CoreError::InvalidSong(format!("invalid price {}", self.price)))?;

    let n = self.total_fragments;
    let slice = self.duration / n as f64;

    let fragments: Vec<Fragment> = (0..n)
      .map(|i| {
        let start = i as f64 * slice;
        // El último fragmento cierra exactamente en `duration`.
        let end = if i + 1 == n { self.duration } else { (i + 1) as f64 * slice };

        let mut fragment = Fragment::unminted(i, start, end, price);
        if i < self.early_adopters {
          fragment.reveal_to(UserId::from(EARLY_ADOPTER_ID));
        }
        fragment
      })
      .collect();

    let song = Song {
      id: SongId::new(),
      title: self.title,
      artist: self.artist,
      audio_url: self.audio_url,
      cover_art: self.cover_art,
      waveform_json: None,
      duration: self.duration,
      total_fragments: n,
      minted_fragments: self.early_adopters,
      fragments,
    };

    song.validate()?;
    Ok(song)
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;

  pub(crate) fn demo_draft() -> SongDraft {
    SongDraft {
      title: "Neon Nights (Etherlink Mix)".into(),
      artist: User::artist("artist_1", "0x123...456", "dj_ether", "https://picsum.photos/seed/artist1/50/50"),
      audio_url: "https://assets.mixkit.co/music/preview/mixkit-tech-house-vibes-130.mp3".into(),
      cover_art: "https://picsum.photos/seed/album1/400/400".into(),
      duration: 30.0,
      total_fragments: 8,
      price: 0.05,
      early_adopters: 2,
    }
  }

  #[test]
  fn chops_into_contiguous_fragments() {
    let song = demo_draft().build().unwrap();

    assert_eq!(song.fragments.len(), 8);
    assert_eq!(song.fragments[0].start_time, 0.0);
    assert_eq!(song.fragments[7].end_time, song.duration);
    for pair in song.fragments.windows(2) {
      assert_eq!(pair[0].end_time, pair[1].start_time);
    }
    assert_eq!(song.fragments[1].end_time, 7.5);
  }

  #[test]
  fn seeds_early_adopters() {
    let song = demo_draft().build().unwrap();

    assert_eq!(song.minted_fragments, 2);
    assert_eq!(song.unminted_positions(), vec![2, 3, 4, 5, 6, 7]);
    assert_eq!(song.fragments[0].owner_id, Some(UserId::from(EARLY_ADOPTER_ID)));
    assert!(song.fragments[1].is_revealed);
    assert!(!song.fragments[2].is_revealed);
    assert_eq!(song.reveal_percentage(), 25);
    assert!(!song.is_sold_out());
  }

  #[test]
  fn uneven_slices_still_close_at_duration() {
    let song = SongDraft { duration: 10.0, total_fragments: 3, early_adopters: 0, ..demo_draft() }.build().unwrap();
    assert_eq!(song.fragments[2].end_time, 10.0);
    assert!(song.validate().is_ok());
  }

  #[test]
  fn rejects_bad_drafts() {
    let cases = [
      SongDraft { total_fragments: 0, early_adopters: 0, ..demo_draft() },
      SongDraft { duration: 0.0, ..demo_draft() },
      SongDraft { duration: f64::NAN, ..demo_draft() },
      SongDraft { price: -1.0, ..demo_draft() },
      SongDraft { early_adopters: 9, ..demo_draft() },
    ];

    for draft in cases {
      assert!(matches!(draft.build(), Err(CoreError::InvalidSong(_))));
    }
  }

  #[test]
  fn validate_catches_counter_drift_and_gaps() {
    let mut drifted = demo_draft().build().unwrap();
    drifted.minted_fragments = 3;
    assert!(matches!(drifted.validate(), Err(CoreError::InvalidSong(_))));

    let mut gapped = demo_draft().build().unwrap();
    gapped.fragments[3].start_time += 0.5;
    assert!(gapped.validate().is_err());

    let mut unsynced = demo_draft().build().unwrap();
    unsynced.fragments[4].is_revealed = true;
    assert!(unsynced.validate().is_err());
  }

  #[test]
  fn mint_at_moves_owner_and_counter_together() {
    let mut song = demo_draft().build().unwrap();
    let minted = song.mint_at(5, UserId::from("alice"));

    assert_eq!(minted.index, 5);
    assert_eq!(minted.owner_id, Some(UserId::from("alice")));
    assert_eq!(song.minted_fragments, 3);
    assert!(song.validate().is_ok());
  }
}

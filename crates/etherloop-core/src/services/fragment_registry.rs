use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, info};

use crate::domain::{Fragment, MintResult, Song, SongId, UserId};
use crate::errors::CoreError;
use crate::ports::{PcgRandom, RandomSource};

/// Almacén en memoria con el estado canónico de los fragmentos.
///
/// Cada canción vive detrás de su propio `Mutex`: el blind mint lee el
/// conjunto de fragmentos libres y lo modifica dentro de una única sección
/// crítica, sin ningún punto de suspensión en medio. Las lecturas devuelven
/// copias, así que nadie fuera del registro puede romper las invariantes.
pub struct FragmentRegistry {
  songs: RwLock<HashMap<SongId, Arc<Mutex<Song>>>>,
  rng: Mutex<Box<dyn RandomSource>>,
}

impl FragmentRegistry {
  pub fn new(rng: impl RandomSource + 'static) -> Self {
    let rng: Box<dyn RandomSource> = Box::new(rng);
    Self { songs: RwLock::new(HashMap::new()), rng: Mutex::new(rng) }
  }

  /// Registro con selección reproducible.
  pub fn with_seed(seed: u64) -> Self {
    Self::new(PcgRandom::seeded(seed))
  }

  /// Registra una canción ya troceada. Falla si viola alguna invariante
  /// o si ya existe una canción con el mismo id.
  pub fn insert(&self, song: Song) -> Result<SongId, CoreError> {
    song.validate()?;

    let id = song.id;
    let mut songs = self.songs.write().map_err(|_| CoreError::poisoned("registry"))?;
    if songs.contains_key(&id) {
      return Err(CoreError::InvalidSong(format!("song {id} already registered")));
    }

    debug!(song = %id, title = %song.title, fragments = song.total_fragments, "song registered");
    songs.insert(id, Arc::new(Mutex::new(song)));
    Ok(id)
  }

  pub fn song_ids(&self) -> Result<Vec<SongId>, CoreError> {
    let songs = self.songs.read().map_err(|_| CoreError::poisoned("registry"))?;
    Ok(songs.keys().copied().collect())
  }

  /// Copia del estado actual de la canción. Sin efectos secundarios.
  pub fn get_song(&self, song_id: SongId) -> Result<Song, CoreError> {
    let handle = self.handle(song_id)?;
    let song = handle.lock().map_err(|_| CoreError::poisoned("song"))?;
    Ok(song.clone())
  }

  /// Solo los fragmentos; es lo que consume la reproducción en cada tick.
  pub fn fragments(&self, song_id: SongId) -> Result<Vec<Fragment>, CoreError> {
    let handle = self.handle(song_id)?;
    let song = handle.lock().map_err(|_| CoreError::poisoned("song"))?;
    Ok(song.fragments.clone())
  }

  /// Blind mint: asigna a `user_id` un fragmento libre elegido de forma
  /// uniforme.
  ///
  /// - Sin usuario → [`CoreError::WalletNotConnected`].
  /// - Canción inexistente → [`CoreError::NotFound`].
  /// - Sin fragmentos libres → `MintResult::sold_out()`, sin cambios.
  pub fn mint_fragment(&self, song_id: SongId, user_id: &UserId) -> Result<MintResult, CoreError> {
    if user_id.is_empty() {
      return Err(CoreError::WalletNotConnected);
    }

    let handle = self.handle(song_id)?;
    let mut song = handle.lock().map_err(|_| CoreError::poisoned("song"))?;

    let unminted = song.unminted_positions();
    if unminted.is_empty() {
      info!(song = %song_id, user = %user_id, "mint rejected: sold out");
      return Ok(MintResult::sold_out());
    }

    let choice = {
      let mut rng = self.rng.lock().map_err(|_| CoreError::poisoned("rng"))?;
      rng.pick(unminted.len())
    };

    let fragment = song.mint_at(unminted[choice], user_id.clone());

    info!(
      song = %song_id,
      user = %user_id,
      fragment = fragment.display_number(),
      minted = song.minted_fragments,
      total = song.total_fragments,
      "fragment revealed"
    );

    Ok(MintResult::minted(fragment))
  }

  fn handle(&self, song_id: SongId) -> Result<Arc<Mutex<Song>>, CoreError> {
    let songs = self.songs.read().map_err(|_| CoreError::poisoned("registry"))?;
    songs.get(&song_id).cloned().ok_or(CoreError::NotFound(song_id))
  }
}

impl Default for FragmentRegistry {
  fn default() -> Self {
    Self::new(PcgRandom::from_entropy())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::song::tests::demo_draft;
  use crate::domain::{EARLY_ADOPTER_ID, SongDraft};
  use std::collections::HashSet;

  /// Siempre elige la misma posición relativa.
  struct Fixed(usize);

  impl RandomSource for Fixed {
    fn pick(&mut self, len: usize) -> usize {
      self.0.min(len - 1)
    }
  }

  fn registry_with_demo(rng: impl RandomSource + 'static) -> (FragmentRegistry, SongId) {
    let registry = FragmentRegistry::new(rng);
    let id = registry.insert(demo_draft().build().unwrap()).unwrap();
    (registry, id)
  }

  fn assert_invariants(song: &Song) {
    let owned = song.fragments.iter().filter(|f| f.owner_id.is_some()).count();
    assert_eq!(song.minted_fragments as usize, owned);
    assert!(song.fragments.iter().all(|f| f.is_revealed == f.owner_id.is_some()));
    assert!(song.validate().is_ok());
  }

  #[test]
  fn unknown_song_is_not_found() {
    let registry = FragmentRegistry::with_seed(1);
    let missing = SongId::new();

    assert!(matches!(registry.get_song(missing), Err(CoreError::NotFound(id)) if id == missing));
    assert!(matches!(registry.mint_fragment(missing, &UserId::from("alice")), Err(CoreError::NotFound(_))));
  }

  #[test]
  fn empty_user_is_a_precondition_error() {
    let (registry, id) = registry_with_demo(PcgRandom::seeded(1));
    let before = registry.get_song(id).unwrap();

    let err = registry.mint_fragment(id, &UserId::from("  ")).unwrap_err();

    assert!(matches!(err, CoreError::WalletNotConnected));
    assert!(err.is_precondition());
    assert_eq!(registry.get_song(id).unwrap(), before);
  }

  #[test]
  fn rejects_invalid_or_duplicate_songs() {
    let registry = FragmentRegistry::with_seed(1);
    let mut broken = demo_draft().build().unwrap();
    broken.minted_fragments = 0;
    assert!(matches!(registry.insert(broken), Err(CoreError::InvalidSong(_))));

    let song = demo_draft().build().unwrap();
    registry.insert(song.clone()).unwrap();
    assert!(matches!(registry.insert(song), Err(CoreError::InvalidSong(_))));
  }

  #[test]
  fn reads_are_idempotent() {
    let (registry, id) = registry_with_demo(PcgRandom::seeded(3));
    assert_eq!(registry.get_song(id).unwrap(), registry.get_song(id).unwrap());
    assert_eq!(registry.song_ids().unwrap(), vec![id]);
  }

  #[test]
  fn first_mint_reveals_one_fragment_to_alice() {
    let (registry, id) = registry_with_demo(PcgRandom::seeded(42));
    let before = registry.get_song(id).unwrap();

    let result = registry.mint_fragment(id, &UserId::from("alice")).unwrap();

    assert!(result.success);
    let fragment = result.fragment.unwrap();
    assert_eq!(fragment.owner_id, Some(UserId::from("alice")));
    assert!(fragment.is_revealed);

    let after = registry.get_song(id).unwrap();
    assert_eq!(after.minted_fragments, 3);
    assert_eq!(after.unminted_count(), before.unminted_count() - 1);
    assert_eq!(after.fragment(fragment.index), Some(&fragment));
    assert!(before.fragments[fragment.index as usize].owner_id.is_none());
    assert_invariants(&after);
  }

  #[test]
  fn mints_until_sold_out() {
    let (registry, id) = registry_with_demo(PcgRandom::seeded(9));
    let mut revealed = HashSet::new();

    for round in 0..6 {
      let song = registry.get_song(id).unwrap();
      let k = song.unminted_count();
      assert_eq!(k, 6 - round);

      let result = registry.mint_fragment(id, &UserId::from("alice")).unwrap();
      let fragment = result.fragment.expect("fragments left");

      if k == 1 {
        // Con un único candidato la elección es forzosa.
        assert_eq!(song.unminted_positions(), vec![fragment.index as usize]);
      }
      assert!(fragment.index >= 2);
      assert!(revealed.insert(fragment.index));
      assert_invariants(&registry.get_song(id).unwrap());
    }

    let song = registry.get_song(id).unwrap();
    assert!(song.is_sold_out());
    assert_eq!(song.reveal_percentage(), 100);
    assert_eq!(song.fragments[0].owner_id, Some(UserId::from(EARLY_ADOPTER_ID)));

    for _ in 0..3 {
      let result = registry.mint_fragment(id, &UserId::from("bob")).unwrap();
      assert_eq!(result, MintResult::sold_out());
      assert_eq!(registry.get_song(id).unwrap(), song);
    }
  }

  #[test]
  fn fixed_source_chooses_exact_fragment() {
    let (first, id) = registry_with_demo(Fixed(0));
    let picked = first.mint_fragment(id, &UserId::from("alice")).unwrap().fragment.unwrap();
    assert_eq!(picked.index, 2);

    let (last, id) = registry_with_demo(Fixed(usize::MAX));
    let picked = last.mint_fragment(id, &UserId::from("alice")).unwrap().fragment.unwrap();
    assert_eq!(picked.index, 7);
  }

  #[test]
  fn same_seed_reveals_same_order() {
    let draft = demo_draft().build().unwrap();

    let order = |seed: u64| -> Vec<u32> {
      let registry = FragmentRegistry::with_seed(seed);
      let id = registry.insert(draft.clone()).unwrap();
      (0..6).map(|_| registry.mint_fragment(id, &UserId::from("alice")).unwrap().fragment.unwrap().index).collect()
    };

    assert_eq!(order(1234), order(1234));
  }

  #[test]
  fn selection_is_uniform() {
    const TRIALS: usize = 12_000;
    let registry = FragmentRegistry::with_seed(0xE7E7);
    let mut hits = [0usize; 8];

    for _ in 0..TRIALS {
      let id = registry.insert(demo_draft().build().unwrap()).unwrap();
      let fragment = registry.mint_fragment(id, &UserId::from("alice")).unwrap().fragment.unwrap();
      hits[fragment.index as usize] += 1;
    }

    assert_eq!(hits[0] + hits[1], 0);
    for (index, &count) in hits.iter().enumerate().skip(2) {
      let freq = count as f64 / TRIALS as f64;
      assert!((freq - 1.0 / 6.0).abs() < 0.02, "fragment {index} picked with frequency {freq}");
    }
  }

  #[test]
  fn concurrent_mints_never_collide() {
    let draft = SongDraft { total_fragments: 64, early_adopters: 4, ..demo_draft() };
    let registry = FragmentRegistry::with_seed(5);
    let id = registry.insert(draft.build().unwrap()).unwrap();

    let won: Vec<Vec<u32>> = std::thread::scope(|scope| {
      let workers: Vec<_> = (0..8)
        .map(|n| {
          let registry = &registry;
          scope.spawn(move || {
            let user = UserId::new(format!("user_{n}"));
            let mut mine = Vec::new();
            loop {
              let result = registry.mint_fragment(id, &user).unwrap();
              match result.fragment {
                Some(f) => mine.push(f.index),
                None => break mine,
              }
            }
          })
        })
        .collect();
      workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    let all: Vec<u32> = won.into_iter().flatten().collect();
    let unique: HashSet<u32> = all.iter().copied().collect();
    assert_eq!(all.len(), 60);
    assert_eq!(unique.len(), 60);

    let song = registry.get_song(id).unwrap();
    assert_eq!(song.minted_fragments, 64);
    assert_invariants(&song);
  }
}

use tracing::debug;

use crate::domain::{Audibility, Fragment, PlaybackState, Tick};
use crate::ports::AudioSurface;

/// Reglas puras que acoplan propiedad y reproducción.
///
/// No guarda estado ni toca el registro: cada tick se recalcula a partir de
/// los fragmentos y la posición actual.
pub struct PlaybackRevealController;

impl PlaybackRevealController {
  /// Fragmento que contiene `time`, o `None` si `time` cae fuera de
  /// `[0, duration)`.
  pub fn locate(fragments: &[Fragment], time: f64) -> Option<&Fragment> {
    fragments.iter().find(|f| f.contains(time))
  }

  /// `Audible` si el fragmento tiene dueño, `Muted` si no. Sin fundidos.
  pub fn audibility_for(fragment: &Fragment) -> Audibility {
    if fragment.owner_id.is_some() { Audibility::Audible } else { Audibility::Muted }
  }

  pub fn on_tick(fragments: &[Fragment], time: f64) -> Tick {
    let current = Self::locate(fragments, time);
    Tick { audibility: current.map(Self::audibility_for), current_fragment: current.cloned() }
  }
}

/// Sesión de reproducción: `Stopped -> Playing -> Stopped`.
///
/// La compuerta de audio no depende de este estado; la sesión solo
/// recuerda el fragmento actual para avisar cuando cambia.
#[derive(Debug, Default)]
pub struct PlaybackSession {
  state: PlaybackState,
  current_index: Option<u32>,
}

impl PlaybackSession {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn state(&self) -> PlaybackState {
    self.state
  }

  pub fn is_playing(&self) -> bool {
    self.state == PlaybackState::Playing
  }

  /// Índice del último fragmento localizado.
  pub fn current_index(&self) -> Option<u32> {
    self.current_index
  }

  /// Play/pausa.
  pub fn toggle(&mut self) -> PlaybackState {
    self.state = match self.state {
      PlaybackState::Stopped => PlaybackState::Playing,
      PlaybackState::Playing => PlaybackState::Stopped,
    };
    self.state
  }

  /// Fin de pista.
  pub fn finish(&mut self) {
    self.state = PlaybackState::Stopped;
  }

  /// Procesa una actualización de posición de la superficie de audio.
  ///
  /// Si la posición cae en un fragmento, ajusta el volumen (0 o 1). Fuera
  /// de la canción el volumen se deja como estaba.
  pub fn handle_tick<S: AudioSurface + ?Sized>(&mut self, fragments: &[Fragment], time: f64, surface: &mut S) -> Tick {
    let tick = PlaybackRevealController::on_tick(fragments, time);

    if let (Some(fragment), Some(gate)) = (&tick.current_fragment, tick.audibility) {
      if self.current_index != Some(fragment.index) {
        debug!(fragment = fragment.display_number(), status = %fragment.status(), "playback entered fragment");
        self.current_index = Some(fragment.index);
      }
      surface.set_volume(gate.volume());
    }

    tick
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::song::tests::demo_draft;
  use crate::domain::UserId;

  #[derive(Default)]
  struct RecordingSurface {
    volumes: Vec<f32>,
  }

  impl AudioSurface for RecordingSurface {
    fn set_volume(&mut self, volume: f32) {
      self.volumes.push(volume);
    }
  }

  #[test]
  fn locate_finds_the_containing_fragment() {
    let song = demo_draft().build().unwrap();

    for f in &song.fragments {
      let mid = (f.start_time + f.end_time) / 2.0;
      assert_eq!(PlaybackRevealController::locate(&song.fragments, f.start_time).map(|x| x.index), Some(f.index));
      assert_eq!(PlaybackRevealController::locate(&song.fragments, mid).map(|x| x.index), Some(f.index));
    }

    // Los bordes pertenecen al fragmento siguiente.
    assert_eq!(PlaybackRevealController::locate(&song.fragments, 7.5).map(|x| x.index), Some(2));
  }

  #[test]
  fn locate_outside_the_song_is_none() {
    let song = demo_draft().build().unwrap();

    assert!(PlaybackRevealController::locate(&song.fragments, song.duration).is_none());
    assert!(PlaybackRevealController::locate(&song.fragments, 31.0).is_none());
    assert!(PlaybackRevealController::locate(&song.fragments, -0.001).is_none());
    assert!(PlaybackRevealController::locate(&[], 1.0).is_none());
  }

  #[test]
  fn audibility_follows_ownership_only() {
    let mut song = demo_draft().build().unwrap();
    song.mint_at(7, UserId::from("alice"));

    let gates: Vec<u8> =
      song.fragments.iter().map(|f| PlaybackRevealController::audibility_for(f).as_gate()).collect();

    assert_eq!(gates, vec![1, 1, 0, 0, 0, 0, 0, 1]);
  }

  #[test]
  fn on_tick_is_pure() {
    let song = demo_draft().build().unwrap();

    let a = PlaybackRevealController::on_tick(&song.fragments, 12.0);
    let b = PlaybackRevealController::on_tick(&song.fragments, 12.0);

    assert_eq!(a, b);
    assert_eq!(a.current_fragment.as_ref().map(|f| f.index), Some(3));
    assert_eq!(a.audibility, Some(Audibility::Muted));

    let outside = PlaybackRevealController::on_tick(&song.fragments, 30.0);
    assert_eq!(outside, Tick { current_fragment: None, audibility: None });
  }

  #[test]
  fn session_mutes_locked_regions_in_place() {
    let song = demo_draft().build().unwrap();
    let mut session = PlaybackSession::new();
    let mut surface = RecordingSurface::default();

    assert_eq!(session.toggle(), PlaybackState::Playing);
    for t in [0.0, 4.0, 8.0, 30.0] {
      session.handle_tick(&song.fragments, t, &mut surface);
    }

    // 30.0 está fuera de la canción: el volumen no se toca.
    assert_eq!(surface.volumes, vec![1.0, 1.0, 0.0]);
    assert_eq!(session.current_index(), Some(2));

    session.finish();
    assert_eq!(session.state(), PlaybackState::Stopped);
    assert!(!session.is_playing());
  }

  #[test]
  fn session_sees_fresh_mints_on_next_tick() {
    let mut song = demo_draft().build().unwrap();
    let mut session = PlaybackSession::new();
    let mut surface = RecordingSurface::default();

    session.handle_tick(&song.fragments, 9.0, &mut surface);
    song.mint_at(2, UserId::from("alice"));
    session.handle_tick(&song.fragments, 9.1, &mut surface);

    assert_eq!(surface.volumes, vec![0.0, 1.0]);
  }
}

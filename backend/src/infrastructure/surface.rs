use etherloop_core::ports::AudioSurface;

/// Terminal stand-in for the waveform player: it only remembers the last volume.
#[derive(Debug)]
pub struct TerminalSurface {
  volume: f32,
}

impl Default for TerminalSurface {
  fn default() -> Self {
    Self { volume: 1.0 }
  }
}

impl TerminalSurface {
  pub fn volume(&self) -> f32 {
    self.volume
  }
}

impl AudioSurface for TerminalSurface {
  fn set_volume(&mut self, volume: f32) {
    self.volume = volume;
  }
}

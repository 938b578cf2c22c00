use async_trait::async_trait;
use etherloop_core::CoreError;
use etherloop_core::domain::{Fragment, SongId};
use etherloop_core::ports::MintReporter;
use tracing::{info, warn};

/// A `MintReporter` implementation that bridges mint events to the terminal.
///
/// Human-readable lines go to stdout; the structured copy goes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalReporter;

#[async_trait]
impl MintReporter for TerminalReporter {
  async fn on_pending(&self, song_id: SongId) {
    info!(song = %song_id, "mint pending");
    println!("Minting...");
  }

  async fn on_minted(&self, song_id: SongId, fragment: &Fragment) {
    info!(song = %song_id, fragment = fragment.display_number(), "mint confirmed");
    println!(
      "Unlocked fragment #{} [{:.2}s - {:.2}s]",
      fragment.display_number(),
      fragment.start_time,
      fragment.end_time
    );
  }

  async fn on_sold_out(&self, song_id: SongId) {
    info!(song = %song_id, "mint rejected, sold out");
    println!("SOLD OUT");
  }

  async fn on_error(&self, song_id: SongId, error: &CoreError) {
    warn!(song = %song_id, %error, "mint failed");
    eprintln!("{}", error.user_message());
  }
}

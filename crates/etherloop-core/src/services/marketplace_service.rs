use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::domain::{MintResult, Song, SongId, User};
use crate::errors::CoreError;
use crate::ports::{MarketplaceChain, MintReporter, WalletProvider};

/// Orquesta lo que hace la UI alrededor de la cadena:
/// - obtiene el usuario a partir de la wallet conectada,
/// - expone el indicador "minteando..." mientras la llamada está en vuelo,
/// - avisa al reporter de cada desenlace.
pub struct MarketplaceService<C, W, R>
where
  C: MarketplaceChain,
  W: WalletProvider,
  R: MintReporter,
{
  chain: C,
  wallet: W,
  reporter: R,
  minting: AtomicBool,
}

/// Limpia el indicador de mint en vuelo al salir de `blind_mint`, también
/// por la rama de error.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
  fn drop(&mut self) {
    self.0.store(false, Ordering::Release);
  }
}

impl<C, W, R> MarketplaceService<C, W, R>
where
  C: MarketplaceChain,
  W: WalletProvider,
  R: MintReporter,
{
  pub fn new(chain: C, wallet: W, reporter: R) -> Self {
    Self { chain, wallet, reporter, minting: AtomicBool::new(false) }
  }

  /// `true` mientras hay un mint pendiente.
  pub fn is_minting(&self) -> bool {
    self.minting.load(Ordering::Acquire)
  }

  pub fn wallet(&self) -> &W {
    &self.wallet
  }

  /// Usuario derivado de la wallet conectada.
  pub fn current_user(&self) -> Result<User, CoreError> {
    let connection = self.wallet.connection();
    let address = connection.active_address().ok_or(CoreError::WalletNotConnected)?;
    User::from_address(address)
  }

  pub async fn load_song(&self, song_id: SongId) -> Result<Song, CoreError> {
    self.chain.fetch_song(song_id).await
  }

  /// Blind mint en nombre del usuario conectado.
  ///
  /// "Sin wallet" llega como error de precondición, "agotado" como
  /// `MintResult::sold_out()` y los fallos de la cadena como
  /// [`CoreError::Network`].
  pub async fn blind_mint(&self, song_id: SongId) -> Result<MintResult, CoreError> {
    let user = match self.current_user() {
      Ok(user) => user,
      Err(e) => {
        self.reporter.on_error(song_id, &e).await;
        return Err(e);
      }
    };

    if self.minting.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_err() {
      let e = CoreError::Precondition("mint already in progress".into());
      self.reporter.on_error(song_id, &e).await;
      return Err(e);
    }
    let _in_flight = InFlight(&self.minting);

    info!(song = %song_id, user = %user.id, "blind mint requested");
    self.reporter.on_pending(song_id).await;

    match self.chain.mint_fragment(song_id, &user).await {
      Ok(result) => {
        match &result.fragment {
          Some(fragment) => self.reporter.on_minted(song_id, fragment).await,
          None => self.reporter.on_sold_out(song_id).await,
        }
        Ok(result)
      }
      Err(e) => {
        warn!(song = %song_id, error = %e, "blind mint failed");
        self.reporter.on_error(song_id, &e).await;
        Err(e)
      }
    }
  }
}

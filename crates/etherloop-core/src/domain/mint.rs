use serde::{Deserialize, Serialize};

use crate::domain::fragment::Fragment;

/// Resultado de un blind mint.
///
/// `success == false` sin fragmento significa "agotado": es un desenlace
/// esperado, no un error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintResult {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub fragment: Option<Fragment>,
}

impl MintResult {
  pub fn minted(fragment: Fragment) -> Self {
    Self { success: true, fragment: Some(fragment) }
  }

  pub fn sold_out() -> Self {
    Self { success: false, fragment: None }
  }

  pub fn is_sold_out(&self) -> bool {
    !self.success
  }
}

/// Port de la superficie de audio (visualizador de forma de onda).
///
/// Emite la posición de reproducción por su cuenta; el núcleo solo le
/// devuelve instrucciones de volumen.
pub trait AudioSurface {
  fn set_volume(&mut self, volume: f32);
}

pub mod reporter;
pub mod surface;

mod face;
mod loader;

pub use face::{Corner, Face};
pub use loader::ModelData;

pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod patch;
pub mod tangent;

pub use app::{generate, Report};
pub use config::Config;
pub use error::TbnError;
pub use model::ModelData;
pub use patch::patch;
pub use tangent::{compute_all, compute_tangent_space, TangentSpace, TriangleGeometry};

//! Entity model types for the Scribe generator.
//!
//! The model is a read-only graph of entities and their attributes. It is
//! built once per run (usually from a TOML document) and shared by every
//! target rendered during that run.
//!
//! ```text
//! model.toml → Model → Entity → Attribute (neutral types)
//! ```

mod attribute;
mod entity;
mod model;
mod types;

pub use attribute::Attribute;
pub use entity::Entity;
pub use model::{Model, ModelError};
pub use types::NeutralType;

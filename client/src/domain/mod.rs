//! Domain layer
//!
//! Contains the feed's data model and the traits the client depends on.
//! - `entities`: Posts, users and the viewer's session
//! - `ports`: Trait definitions for the backend, the render surface and prompts

pub mod entities;
pub mod ports;

//! First-person grid ray-caster.
//!
//! A 2-D tile [`world::Grid`] and a [`world::Camera`] go in; a textured,
//! shaded pseudo-3-D frame comes out. Per screen column the
//! [`engine::Raycaster`] finds the nearest wall with a two-sweep DDA, the
//! [`engine::Projector`] turns it into a perspective-correct strip, and a
//! [`renderer::Renderer`] paints it.

pub mod assets;
pub mod config;
pub mod engine;
pub mod renderer;
pub mod sim;
pub mod world;

//! Roll-a-ball game library.
//!
//! A 3D rolling-ball pickup game: directional input becomes horizontal force
//! on a physics ball, pickups are collected toward a win total, an enemy
//! chases toward a lose condition, and every hard collision retunes a
//! procedural impact-sound synthesizer rendered in real time on the audio
//! thread.

pub mod arena;
pub mod audio;
pub mod config;
pub mod constants;
pub mod enemy;
pub mod error;
pub mod graphics;
pub mod hud;
pub mod menu;
pub mod player;

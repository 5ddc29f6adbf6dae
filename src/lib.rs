//! Glue between macroquad rendering and rapier2d physics for a small
//! interactive sandbox: one driven box, a static ground plane, and as
//! many extra boxes as the user cares to click into existence.

pub mod config;
pub mod physics;
pub mod player;

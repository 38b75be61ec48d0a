//! **wayfind-core** — grid model for the wayfind path search.
//!
//! This crate provides the types shared by every search: coordinates
//! ([`Point`]), rectangles ([`Range`]) and an immutable grid of walkable and
//! blocked cells ([`Grid`]).

pub mod geom;
pub mod grid;

pub use geom::{Point, Range};
pub use grid::{Cell, Grid, GridError};

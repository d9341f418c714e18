//! Material-UI palette generation from sparse locked shades.
//!
//! Each palette key is a ramp of shades. Locked shades anchor the H, S and V
//! curves; every other shade is filled by Catmull-Rom interpolation inside
//! the locked span and by linear or white/black-anchored extrapolation
//! outside it.

pub mod cli;
pub mod cli_args;
pub mod color;
pub mod config;
pub mod export;
pub mod extrapolate;
pub mod generate;
pub mod import;
pub mod logging;
pub mod scale;
pub mod shade;
pub mod spline;

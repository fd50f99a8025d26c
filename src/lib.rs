//! fatigue
//! Fatigue crack growth and support structure checks for a floating
//! wind turbine platform.

pub static COMMENT: &str = "#  ";

extern crate log;
extern crate svg;

#[macro_use]
extern crate lazy_static;

pub mod beam;
pub mod dadn;
pub mod dynamics;
pub mod frame;
pub mod grow;
pub mod material;
pub mod numbers;
pub mod plot;
pub mod sketch;
pub mod statics;

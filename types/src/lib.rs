extern crate nalgebra as na;

pub mod group;
pub mod location;
pub mod observer;
pub mod position;
pub mod prelude;
pub mod time;
pub mod tle;

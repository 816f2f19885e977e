pub extern crate nalgebra as na;

pub mod basemap;
pub mod catalog;
pub mod color;
pub mod config;
pub mod error;
pub mod fetch;
pub mod figure;
pub mod frames;
pub mod geolocation;
pub mod ground_track;
pub mod logging;
pub mod miller;
pub mod nightshade;
pub mod observer;
pub mod pipeline;
pub mod polar;
pub mod propagation;
pub mod render;
pub mod satellite;
pub mod units;

pub use crate::error::Error;

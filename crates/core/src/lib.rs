#![forbid(unsafe_code)]

pub mod model;
pub mod shuffler;
pub mod time;

pub use time::Clock;

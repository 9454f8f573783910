#![forbid(unsafe_code)]

pub mod questions;
pub mod records;
pub mod repository;
pub mod sqlite;

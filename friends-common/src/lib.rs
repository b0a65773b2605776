#![cfg(not(doctest))]

#[macro_use]
extern crate diesel;

pub mod db;
pub mod models;
pub mod request_io;
pub mod schema;
pub mod validators;

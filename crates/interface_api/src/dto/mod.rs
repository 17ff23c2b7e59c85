//! Request and response bodies that are not plain entity shapes

pub mod admin;
pub mod common;
pub mod health;

//! Use cases

pub mod poll_controller;

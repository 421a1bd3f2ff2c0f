pub mod board;
pub mod card;
pub mod city;
pub mod constants;
pub mod distance;
pub mod engine;
pub mod error;
pub mod observer;
pub mod player;
pub mod strategy;

#[macro_use]
extern crate smallvec;

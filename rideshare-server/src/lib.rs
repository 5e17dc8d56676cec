//! Ride-sharing server for event travellers.
//!
//! Groups registered travellers by locality, matches people who need a
//! ride with drivers who have spare seats, and reports seat supply and
//! demand to organisers.

pub mod cache;
pub mod config;
pub mod contact;
pub mod domain;
pub mod export;
pub mod matching;
pub mod store;
pub mod web;

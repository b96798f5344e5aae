//! FoodFlame Storefront library.
//!
//! This crate provides the ordering engine as a library, allowing it to be
//! tested and reused by any front end.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod services;
pub mod state;
pub mod storage;
pub mod stores;

//! Storefront state engine: catalog favorites, the cart, and the snapshot
//! protocol that carries both across restarts.

pub mod action;
pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod persist;
pub mod seed;
pub mod state;

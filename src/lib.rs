#![allow(unknown_lints)]

pub mod logging;

pub mod api;
pub mod builders;
pub mod components;
pub mod dump;
pub mod geometry;
pub mod models;
pub mod overlay;
pub mod projection;
pub mod protocol;
pub mod session;
pub mod status;

pub use components::app::App;

#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod data_panel;
pub mod leaflet;
pub mod links;
pub mod map_view;
pub mod popup;
pub mod statistics;
pub mod status_bar;

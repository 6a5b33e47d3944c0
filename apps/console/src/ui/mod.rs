pub mod chat;
pub mod common;
pub mod complaints;
pub mod detail;
pub mod heatmap;
pub mod nav;
pub mod statistics;

pub mod chat;
pub mod fetch;
pub mod filters;
pub mod map;
pub mod stats;
pub mod table;
pub mod transcript;

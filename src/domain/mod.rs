pub mod catalog;
pub mod engine;
pub mod filter;
pub mod listing;
pub mod map_view;
pub mod session;
pub mod tour;

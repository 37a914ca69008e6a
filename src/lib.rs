pub mod api;
pub mod autobid;
pub mod bidding;
pub mod config;
pub mod error;
pub mod feedback;
pub mod handlers;
pub mod listing;
pub mod notification;
pub mod scheduler;
pub mod session;

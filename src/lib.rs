pub mod admin;
pub mod config;
pub mod directory;
pub mod display;
pub mod error;
pub mod handler;
pub mod lineup;
pub mod lock;
pub mod model;
pub mod players;
pub mod scoreboard;
pub mod store;
pub mod supabase;

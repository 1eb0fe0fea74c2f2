pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod hooks;
pub mod lang;
pub mod leaderboard;
pub mod paths;
pub mod permissions;
pub mod players;
pub mod server_info;
pub mod summary;
pub mod tabs;

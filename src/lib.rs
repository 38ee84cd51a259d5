pub mod api;
pub mod config;
pub mod controller;
pub mod sink;
pub mod timecode;
pub mod timestamps;

pub mod authorization;
pub mod booking;
pub mod circuit_breaker;
pub mod directory;
pub mod gallery;
pub mod presentation;
pub mod reviews;
pub mod rooms;

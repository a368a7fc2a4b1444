pub mod auth;
pub mod result;
pub mod schedule;
pub mod team;

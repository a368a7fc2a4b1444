//! Results board for daily number draws: timestamp normalization in a fixed
//! zone, upcoming/completed classification, grouping for the public pages, and
//! blocking clients for the public and admin backend APIs.

pub mod admin;
pub mod api;
pub mod board;
pub mod classify;
pub mod config;
pub mod error;
pub mod grouping;
pub mod handler;
pub mod model;
pub mod result_value;
pub mod time;
pub mod window;

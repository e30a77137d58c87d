//! quizzo-core: Quiz model, answer equivalence, scoring and ranking.
//!
//! The pure scoring pieces ([`equivalence`], [`scoring`], [`leaderboard`])
//! have no I/O. Persistence sits behind the [`store::QuizStore`] trait and
//! [`service::QuizService`] ties the two together.

pub mod code;
pub mod config;
pub mod equivalence;
pub mod error;
pub mod leaderboard;
pub mod model;
pub mod parser;
pub mod report;
pub mod review;
pub mod scoring;
pub mod service;
pub mod statistics;
pub mod store;
pub mod timing;

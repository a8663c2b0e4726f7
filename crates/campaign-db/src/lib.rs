//! # campaign-db
//!
//! Database layer implementing the reaction repository with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides the PostgreSQL implementation of `ReactionRepository`
//! from `campaign-core`. It handles:
//!
//! - Connection pool management
//! - The `campaign_reactions` schema
//! - Database models with SQLx `FromRow` derives
//! - Model -> entity mappers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use campaign_common::AppConfig;
//! use campaign_db::pool::{create_pool, DatabaseConfig};
//! use campaign_db::PgReactionRepository;
//! use campaign_core::traits::ReactionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = AppConfig::from_env()?;
//!     let pool = create_pool(&DatabaseConfig::from(&app.database)).await?;
//!     let reactions = PgReactionRepository::new(pool);
//!
//!     let counts = reactions.aggregate_counts(&campaign_ids).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::PgReactionRepository;
pub use schema::apply_schema;

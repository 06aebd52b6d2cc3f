//! # EduZone CLI
//!
//! Database seeding and administration utilities for EduZone.
//!
//! The seeder only talks to the repository traits of `eduzone-db`, so the same code
//! seeds a PostgreSQL database from the CLI binary and the in-memory backend when the
//! server starts in demo mode.
//!
//! ## Usage
//!
//! ```ignore
//! use eduzone_cli::seeder::{SeedConfig, seed_demo_data};
//!
//! let config = SeedConfig::new(Some("Password123".to_string()));
//! let summary = seed_demo_data(&repos, &config).await?;
//! println!("{} books", summary.books);
//! ```

pub mod seeder;

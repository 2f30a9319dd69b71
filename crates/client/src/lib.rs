//! Kitchen Client - REST access to the kitchen-inventory backend.
//!
//! One typed method per endpoint the dashboard tabs call: ingredient and meal
//! catalog, serving, reports, user administration, and the snapshot endpoints
//! the live feeds start from.
//!
//! # Usage
//!
//! ```rust,ignore
//! use kitchen_client::KitchenClient;
//!
//! let client = KitchenClient::new("http://localhost:8000")?.with_token("token");
//! let meals = client.list_meals().await?;
//! let outcome = client.serve_portions(meals[0].id, 3).await?;
//! ```

mod client;
mod error;
mod paths;
mod types;

pub use client::KitchenClient;
pub use error::{ClientError, Result};
pub use paths::*;
pub use types::*;

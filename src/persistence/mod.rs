//! persistence — sweep results as JSON column files.
//!
//! Only the columns of a [`SweepResult`](crate::sweep::SweepResult) are
//! stored; θ-search diagnostics live in memory only. Loading validates the
//! layout (all seven keys, equal lengths, valid estimates) and fails
//! instead of guessing.

pub mod errors;
pub mod json;

pub use self::errors::{PersistError, PersistResult};
pub use self::json::{Columns, from_columns, from_json_str, load_json, save_json, to_json_string};

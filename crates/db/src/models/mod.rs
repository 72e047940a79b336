//! Row models for the `users` table.

pub mod user;

pub use user::UserRow;

pub mod profile;

pub use profile::{ProfileField, UserProfile};

// User domain - account records and their projections

pub mod models;

pub use models::{User, UserProfile, UserRole};

// Kernel - shared infrastructure for domain actions

pub mod deps;

pub use deps::ServerDeps;

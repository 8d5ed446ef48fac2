// Business domains
pub mod changes;

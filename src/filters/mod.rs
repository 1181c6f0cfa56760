pub mod filter;
pub mod pass_through;
pub mod zone_preference;

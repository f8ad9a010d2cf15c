pub mod normalize;
pub mod platform;

pub mod incoming;
pub mod voice;

pub mod change;
pub mod digest;
pub mod message;

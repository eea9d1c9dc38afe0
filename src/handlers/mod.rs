pub mod homepage;
pub mod quiz;
pub mod upload;

pub mod catalog;
pub mod extension;
pub mod inquiry;
pub mod property;

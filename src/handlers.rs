pub mod catalog;
pub mod inquiries;
pub mod properties;
pub mod seo;

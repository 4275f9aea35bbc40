pub mod cache;
pub mod catalog;
pub mod enrichment;
pub mod favorites;
pub mod inquiry_service;
pub mod nainahub;
pub mod presentation;
pub mod property_service;
pub mod seo;
pub mod slug;

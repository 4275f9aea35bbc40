pub mod extensions_repo;
pub use extensions_repo::ExtensionRepository;
pub mod inquiry_repo;
pub use inquiry_repo::InquiryRepository;
pub mod key_value;

pub use key_value::{FileStorage, KeyValueStorage, MemoryStorage};

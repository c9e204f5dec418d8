pub mod content_store;
pub mod disabled_tts_repository;
pub mod openai_tts_repository;
pub mod packaged_content_store;
pub mod polly_tts_repository;
pub mod runtime_content_store;

pub use content_store::{ContentStore, ContentStoreSelector, StorageError};
pub use disabled_tts_repository::DisabledTtsRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use packaged_content_store::PackagedContentStore;
pub use polly_tts_repository::PollyTtsRepository;
pub use runtime_content_store::RuntimeContentStore;

pub mod record;
pub mod vocabulary;

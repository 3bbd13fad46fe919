pub mod error;
pub mod imovel;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use imovel::{format_imovel, Imovel, ImovelPayload, ImovelRow, NewImovel};

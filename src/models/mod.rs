pub mod chat_session;
pub mod material;
pub mod process;
pub mod product;
pub mod recipe;

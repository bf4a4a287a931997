pub mod api_connection;
pub mod chat;
pub mod cli;
pub mod cooking;
pub mod demo_responder;
pub mod recipe_parser;
pub mod state_store;
pub mod storage;

pub mod contact_handlers;
pub mod contact_models;
pub mod contact_repository;

pub use contact_handlers::get_contacts;
pub use contact_models::Contact;
pub use contact_repository::{ContactDirectory, InMemoryContactDirectory, RemoteContactDirectory};

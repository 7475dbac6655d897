//! Table-level operations shared by the resource handlers, plus user registration.

mod crud;
pub mod password;
mod registration;
mod validation;
pub use crud::{ById, CrudService};
pub use registration::{RegisterUser, RegisteredUser, RegistrationService};
pub use validation::RequestValidator;

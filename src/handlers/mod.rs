pub mod login;
pub mod order;

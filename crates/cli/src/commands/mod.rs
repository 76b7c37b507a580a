pub mod expand;
pub mod fetch;

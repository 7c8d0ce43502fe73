pub mod catalog;
pub mod contract;
pub mod opinion;
pub mod request;

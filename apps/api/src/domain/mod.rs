pub mod customer;
pub mod shared;

pub mod manage_customers;
pub mod register_customer;
pub mod search_customers;

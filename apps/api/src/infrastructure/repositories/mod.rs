pub mod in_memory_customer_repository;
pub mod sqlx_customer_repository;

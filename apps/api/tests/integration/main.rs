mod helpers;
mod test_in_memory_repository;
mod test_register_usecase;
mod test_search_usecase;

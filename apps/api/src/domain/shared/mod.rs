pub mod pagination;
pub mod unique_entity_id;

pub mod semantic_map_service;

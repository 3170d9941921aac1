// Adapters layer: concrete implementations for external systems (storage, mapping service).

pub mod google_maps;
pub mod storage;

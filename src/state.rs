use crate::storage::{Backend, ConfigStore, EntryStore};

#[derive(Clone)]
pub struct AppState {
    pub config: ConfigStore,
    pub entries: EntryStore,
}

impl AppState {
    pub fn new(backend: Backend) -> Self {
        Self {
            config: ConfigStore::new(backend.clone()),
            entries: EntryStore::new(backend),
        }
    }
}

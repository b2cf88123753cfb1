use std::sync::Arc;

use storage::RegistrationStore;

use crate::mirror::SheetMirror;

/// Shared handles passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RegistrationStore>,
    pub mirror: Arc<dyn SheetMirror>,
}

impl AppState {
    pub fn new(store: Arc<dyn RegistrationStore>, mirror: Arc<dyn SheetMirror>) -> Self {
        Self { store, mirror }
    }
}

use crate::store::ProductStore;

#[derive(Clone)]
pub struct AppState {
    pub products: ProductStore,
}

impl AppState {
    pub fn new(products: ProductStore) -> Self {
        Self { products }
    }
}

//! Business logic services

pub mod catalog;
pub mod loans;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let catalog = catalog::CatalogService::new(repository.books);
        Self {
            loans: loans::LoansService::new(catalog.clone(), repository.loans),
            catalog,
        }
    }
}

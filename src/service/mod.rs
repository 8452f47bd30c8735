//! CrudService: generic table operations over the executor seam.

mod crud;
pub use crud::CrudService;

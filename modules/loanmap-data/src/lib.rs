pub mod aggregate;
pub mod dataset;
pub mod join;
pub mod load;
pub mod project;

pub use dataset::{DashboardView, LoanDataset};
pub use join::left_join;
pub use load::{load_boundaries, load_loans};
pub use project::choropleth;

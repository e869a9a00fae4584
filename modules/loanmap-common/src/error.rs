use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoanMapError {
    #[error("Boundary file error: {0}")]
    Boundary(String),

    #[error("Loan file error: {0}")]
    Loans(String),

    #[error("Projection error: {0}")]
    Projection(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

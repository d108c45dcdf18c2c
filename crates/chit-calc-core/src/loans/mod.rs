//! Loan calculators.

pub mod emi;

pub mod benchmark;
pub mod model;
pub mod validate;

pub use benchmark::Benchmark;
pub use model::{
    AccountNames, LineCategory, LineItem, StatementSet, WageRecord, YearRecord, FTE_HOURS,
};
pub use validate::{validate_statements, IdentityCheck, ValidationReport};

//! SeaORM entity definitions for the report database.

pub mod build;
pub mod test_case;

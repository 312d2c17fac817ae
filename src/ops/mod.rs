pub mod reunion_dates;
pub mod reunion_ops;

pub mod reunion_queries;

pub mod archive_run_ops;
pub mod audit_ops;
pub mod log_crud;
pub mod log_query;
pub mod maintenance;

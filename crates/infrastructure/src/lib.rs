pub mod errors;
pub mod event_service;
pub mod migrations;
pub mod repositories;
pub mod sqlite;
pub mod task_service;

pub use errors::*;
pub use event_service::*;
pub use repositories::*;
pub use sqlite::*;
pub use task_service::*;

pub mod pool;
pub mod rows;
pub mod schema;

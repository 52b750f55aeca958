// All repository functions are generic over `E: Executor<'e, Database = Postgres>`
// so they accept both a `&PgPool` (direct query) and a `&mut Transaction` (atomic operations).

pub mod grammar;
pub mod quiz;
pub mod stats;
pub mod user;
pub mod vocabulary;

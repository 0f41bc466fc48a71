// Career profiles: validation, persistence (memory or Postgres) and CRUD routes.

pub mod handlers;
pub mod postgres;
pub mod store;
pub mod validation;

use crate::database::connection::{DatabaseError, SqlitePooledConnection};
use crate::database::models::Variable;
use crate::database::schema::variable;
use diesel::prelude::*;
use std::sync::Arc;

/// Variable repository trait
pub trait VariableRepository: Send + Sync {
    /// Get all variables, ordered by variable ID
    fn get_all(&self) -> Result<Vec<Variable>, DatabaseError>;
}

/// Concrete implementation of VariableRepository
pub struct VariableRepositoryImpl {
    get_conn: Arc<dyn Fn() -> Result<SqlitePooledConnection, DatabaseError> + Send + Sync>,
}

impl VariableRepositoryImpl {
    /// Create new variable repository with connection provider
    pub fn new<F>(get_conn: F) -> Self
    where
        F: Fn() -> Result<SqlitePooledConnection, DatabaseError> + Send + Sync + 'static,
    {
        Self {
            get_conn: Arc::new(get_conn),
        }
    }
}

impl VariableRepository for VariableRepositoryImpl {
    fn get_all(&self) -> Result<Vec<Variable>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        variable::table
            .order(variable::variable_id.asc())
            .select(Variable::as_select())
            .load(&mut conn)
            .map_err(DatabaseError::from)
    }
}

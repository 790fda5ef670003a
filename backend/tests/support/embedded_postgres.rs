//! Per-suite databases on an embedded cluster.
//!
//! `CREATE DATABASE` cannot run inside a transaction block, so it goes
//! through `postgres` rather than Diesel. The schema itself is applied by
//! the service's own `run_pending_migrations`.

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

/// Create an empty, uniquely named database and return its URL.
pub fn create_database(cluster: &TestCluster) -> Result<String, String> {
    let connection = cluster.connection();
    let name = format!("pvz_test_{}", Uuid::new_v4().simple());

    let mut client = Client::connect(&connection.database_url("postgres"), NoTls)
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;

    Ok(connection.database_url(&name))
}

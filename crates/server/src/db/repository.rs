use std::time::Duration;

use async_trait::async_trait;
use ecare_core::{DoctorRecord, GatewayError, specialization_pattern};
use tokio_postgres::{Client, NoTls, Row};

use super::DoctorDirectory;

const FIND_BY_SPECIALIZATION: &str = "SELECT id, name, specialization, hospital, email, phone \
     FROM doctors WHERE LOWER(specialization) LIKE LOWER($1)";

/// Doctor lookups against PostgreSQL. Each call opens its own connection and
/// drops it when done.
#[derive(Clone)]
pub struct PgDoctorDirectory {
    config: tokio_postgres::Config,
    timeout: Duration,
}

impl PgDoctorDirectory {
    pub fn new(config: tokio_postgres::Config, timeout: Duration) -> Self {
        Self { config, timeout }
    }

    async fn connect(&self) -> Result<Client, GatewayError> {
        let (client, connection) = self.config.connect(NoTls).await.map_err(db_error)?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!(error = %e, "Database connection closed with error");
            }
        });

        Ok(client)
    }

    async fn with_timeout<T>(
        &self,
        operation: impl Future<Output = Result<T, GatewayError>>,
    ) -> Result<T, GatewayError> {
        tokio::time::timeout(self.timeout, operation)
            .await
            .map_err(|_| {
                GatewayError::Database(format!(
                    "Query timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
    }
}

#[async_trait]
impl DoctorDirectory for PgDoctorDirectory {
    async fn find_by_specialization(&self, query: &str) -> Result<Vec<DoctorRecord>, GatewayError> {
        let pattern = specialization_pattern(query);

        self.with_timeout(async {
            let client = self.connect().await?;
            let rows = client
                .query(FIND_BY_SPECIALIZATION, &[&pattern])
                .await
                .map_err(db_error)?;
            rows.iter()
                .map(doctor_from_row)
                .collect::<Result<Vec<_>, GatewayError>>()
        })
        .await
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        self.with_timeout(async {
            let client = self.connect().await?;
            client.query_one("SELECT 1", &[]).await.map_err(db_error)?;
            Ok::<(), GatewayError>(())
        })
        .await
    }
}

fn doctor_from_row(row: &Row) -> Result<DoctorRecord, GatewayError> {
    // NULL text columns come back as empty strings
    let text = |column: &str| -> Result<String, GatewayError> {
        Ok(row
            .try_get::<_, Option<String>>(column)
            .map_err(db_error)?
            .unwrap_or_default())
    };

    Ok(DoctorRecord {
        id: row.try_get("id").map_err(db_error)?,
        name: text("name")?,
        specialization: text("specialization")?,
        hospital: text("hospital")?,
        email: text("email")?,
        phone: text("phone")?,
    })
}

fn db_error(err: tokio_postgres::Error) -> GatewayError {
    GatewayError::Database(err.to_string())
}

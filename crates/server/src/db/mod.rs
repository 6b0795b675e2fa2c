mod repository;

pub use repository::PgDoctorDirectory;

use async_trait::async_trait;
use ecare_core::{DoctorRecord, GatewayError};

use crate::config::DatabaseConfig;

/// Read access to the doctors table
#[async_trait]
pub trait DoctorDirectory: Send + Sync {
    /// Doctors whose specialization contains `query`, case-insensitive
    async fn find_by_specialization(&self, query: &str) -> Result<Vec<DoctorRecord>, GatewayError>;

    /// Round-trip a trivial query to check connectivity
    async fn ping(&self) -> Result<(), GatewayError>;
}

/// Build connection settings from configuration
pub fn pg_config(config: &DatabaseConfig) -> Result<tokio_postgres::Config, GatewayError> {
    let mut pg = match &config.url {
        Some(url) => url
            .parse::<tokio_postgres::Config>()
            .map_err(|e| GatewayError::Database(format!("Invalid DATABASE_URL: {}", e)))?,
        None => {
            let mut pg = tokio_postgres::Config::new();
            pg.host(&config.host)
                .port(config.port)
                .user(&config.user)
                .dbname(&config.name);
            if let Some(password) = &config.password {
                pg.password(password);
            }
            pg
        }
    };
    pg.connect_timeout(config.timeout);

    Ok(pg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_config_from_fields() {
        let mut db = Config::default().database;
        db.host = "db.internal".to_string();
        db.password = Some("secret".to_string());

        let pg = pg_config(&db).unwrap();
        assert_eq!(pg.get_user(), Some("postgres"));
        assert_eq!(pg.get_dbname(), Some("ecare"));
        assert_eq!(pg.get_ports(), &[5432]);
        assert_eq!(pg.get_password(), Some(&b"secret"[..]));
    }

    #[test]
    fn test_url_wins() {
        let mut db = Config::default().database;
        db.url = Some("postgres://clinic:pw@10.0.0.5:6543/doctors".to_string());

        let pg = pg_config(&db).unwrap();
        assert_eq!(pg.get_user(), Some("clinic"));
        assert_eq!(pg.get_dbname(), Some("doctors"));
        assert_eq!(pg.get_ports(), &[6543]);
    }

    #[test]
    fn test_bad_url() {
        let mut db = Config::default().database;
        db.url = Some("postgres://host:notaport/db".to_string());
        assert!(matches!(pg_config(&db), Err(GatewayError::Database(_))));
    }
}

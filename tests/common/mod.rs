//! Shared fixtures for store-backed tests: SQLite databases with the schema
//! created from the entities.

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, Schema};

use leave_scheduler::domain::{Department, NewEmployee};
use leave_scheduler::infra::repositories::entities::{DayOffRecordEntity, EmployeeEntity};

/// Fresh in-memory database; a single pooled connection keeps it alive.
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = SeaDatabase::connect(options)
        .await
        .expect("sqlite connects");
    create_schema(&db).await;
    db
}

/// File-backed database reachable from several pooled connections, so
/// transactions can genuinely run side by side. Files are removed on drop.
pub struct SharedDb {
    pub db: DatabaseConnection,
    path: PathBuf,
}

impl SharedDb {
    pub async fn create(label: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "leave-scheduler-{}-{}-{}.db",
            label,
            std::process::id(),
            nanos
        ));

        let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
        options.max_connections(4).sqlx_logging(false);

        let db = SeaDatabase::connect(options)
            .await
            .expect("sqlite file connects");
        create_schema(&db).await;

        Self { db, path }
    }
}

impl Drop for SharedDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

async fn create_schema(db: &DatabaseConnection) {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(EmployeeEntity)))
        .await
        .expect("employees table");
    db.execute(backend.build(&schema.create_table_from_entity(DayOffRecordEntity)))
        .await
        .expect("day_off_records table");
}

pub fn new_employee(n: u32, department: Department) -> NewEmployee {
    NewEmployee {
        name: format!("Employee {:02}", n),
        email: format!("employee{:02}@corp.io", n),
        phone_number: format!("555-01{:02}", n),
        department,
        address: format!("{} Market St", n),
        salary: 50_000 + n * 1_000,
        onboard_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Days::new(u64::from(n)),
    }
}

/// Whole-second UTC instant in May 2024
pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
}

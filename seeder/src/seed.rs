use colored::*;
use futures::FutureExt;
use sea_orm::DatabaseConnection;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 80;

/// Password shared by every seeded account.
pub const SEED_PASSWORD: &str = "password123";

#[async_trait::async_trait]
pub trait Seeder {
    async fn seed(&self, db: &DatabaseConnection);
}

pub async fn run_seeder<S: Seeder + Sync + ?Sized>(
    seeder: &S,
    name: &str,
    db: &DatabaseConnection,
) {
    let base_msg = format!("Seeding {}", name.bold());
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(base_msg.len()));
    print!("{}{} ", base_msg, dots);
    let _ = io::stdout().flush();

    let start = Instant::now();
    if std::panic::AssertUnwindSafe(seeder.seed(db))
        .catch_unwind()
        .await
        .is_err()
    {
        println!("{}", "failed".red());
        std::process::exit(1);
    }

    let time_str = format!("({:.2?})", start.elapsed()).dimmed();
    println!("{} {}", "done".green(), time_str);
}

/// Random uppercase hex badge id, e.g. `04A1B2C3`.
pub fn random_rfid() -> String {
    format!("{:08X}", fastrand::u32(..))
}

//! 导入演示数据

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::storage::SeaOrmStorage;
use crate::storage::seed::seed_demo_data;
use crate::utils::password::PasswordHasher;

pub async fn seed_demo(storage: &SeaOrmStorage, hasher: &PasswordHasher) -> Result<(), CliError> {
    seed_demo_data(storage, hasher).await?;
    println!("{} Demo data loaded", "✓".green().bold());
    Ok(())
}

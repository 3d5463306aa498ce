use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fitness_config::load as load_config;
use fitness_database::{
    Member, MemberRepository, NewMember, NewWorkout, Workout, WorkoutRepository,
};
use fitness_gateway::{create_router, GatewayState};
use fitness_runtime::{telemetry, BackendServices};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "fitness-server")]
#[command(about = "Fitness records service (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Print every member and workout in the database
    DumpData,
    /// Delete all workouts and members
    ClearData,
    /// Insert a sample member with a few workouts
    SeedData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::DumpData => dump_data().await,
        Commands::ClearData => clear_data().await,
        Commands::SeedData => seed_data().await,
    }
}

async fn open_services() -> anyhow::Result<BackendServices> {
    let config = load_config().context("failed to load configuration")?;

    BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")
}

async fn run_server() -> anyhow::Result<()> {
    info!("starting fitness records service");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = GatewayState::new(services.db_pool.clone());
    let app = create_router(state).context("failed to build router")?;

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(fitness_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("service shut down");
    Ok(())
}

async fn dump_data() -> anyhow::Result<()> {
    info!("dumping members and workouts from database");

    let services = open_services().await?;
    let (members, workouts) = load_all(&services.db_pool).await?;

    println!("=== MEMBERS ===");
    print_members(&members);

    println!("\n=== WORKOUTS ===");
    print_workouts(&workouts);

    Ok(())
}

async fn load_all(pool: &SqlitePool) -> anyhow::Result<(Vec<Member>, Vec<Workout>)> {
    let members = MemberRepository::new(pool.clone())
        .list()
        .await
        .context("failed to fetch members")?;
    let workouts = WorkoutRepository::new(pool.clone())
        .list()
        .await
        .context("failed to fetch workouts")?;

    Ok((members, workouts))
}

fn print_members(members: &[Member]) {
    if members.is_empty() {
        println!("No members found in database");
        return;
    }

    println!("Found {} members:", members.len());
    println!("{:<5} {:<30} {:<40}", "ID", "Name", "Email");
    println!("{}", "-".repeat(75));

    for member in members {
        println!("{:<5} {:<30} {:<40}", member.id, member.name, member.email);
    }
}

fn print_workouts(workouts: &[Workout]) {
    if workouts.is_empty() {
        println!("No workouts found in database");
        return;
    }

    println!("Found {} workouts:", workouts.len());
    println!(
        "{:<5} {:<10} {:<12} {:<15} {:<10} {:<12} {:<40}",
        "ID", "Member ID", "Date", "Type", "Duration", "Intensity", "Notes"
    );
    println!("{}", "-".repeat(110));

    for workout in workouts {
        println!(
            "{:<5} {:<10} {:<12} {:<15} {:<10} {:<12} {:<40}",
            workout.id,
            workout.member_id,
            workout.workout_date,
            workout.workout_type,
            workout.duration,
            workout.intensity.as_deref().unwrap_or("NULL"),
            workout.notes.as_deref().unwrap_or("NULL"),
        );
    }
}

async fn clear_data() -> anyhow::Result<()> {
    info!("clearing all data from database");

    let services = open_services().await?;
    let (workouts_deleted, members_deleted) = clear_all(&services.db_pool).await?;

    println!("Database cleared:");
    println!("- {workouts_deleted} workouts deleted");
    println!("- {members_deleted} members deleted");

    Ok(())
}

async fn clear_all(pool: &SqlitePool) -> anyhow::Result<(u64, u64)> {
    // Workouts first so the member delete never depends on the cascade.
    let workouts_deleted = sqlx::query("DELETE FROM workouts")
        .execute(pool)
        .await
        .context("failed to delete workouts")?;

    let members_deleted = sqlx::query("DELETE FROM members")
        .execute(pool)
        .await
        .context("failed to delete members")?;

    Ok((
        workouts_deleted.rows_affected(),
        members_deleted.rows_affected(),
    ))
}

async fn seed_data() -> anyhow::Result<()> {
    info!("seeding database with sample data");

    let services = open_services().await?;
    let (member, workouts) = seed(&services.db_pool).await?;

    println!("Database seeded with sample data:");
    println!("- member {} ({})", member.id, member.email);
    println!("- {} workouts created", workouts.len());
    println!("Run 'dump-data' to see the inserted data");

    Ok(())
}

async fn seed(pool: &SqlitePool) -> anyhow::Result<(Member, Vec<Workout>)> {
    let member = MemberRepository::new(pool.clone())
        .create(NewMember {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
        })
        .await
        .context("failed to insert sample member")?;

    let sessions = [
        ((2024, 1, 1), "run", 30.0, Some("moderate"), None),
        ((2024, 1, 3), "swim", 45.0, Some("low"), Some("pool, 50m lanes")),
        ((2024, 1, 6), "cycling", 90.5, Some("high"), Some("hill repeats")),
    ];

    let repository = WorkoutRepository::new(pool.clone());
    let mut workouts = Vec::with_capacity(sessions.len());
    for ((year, month, day), workout_type, duration, intensity, notes) in sessions {
        let workout_date = NaiveDate::from_ymd_opt(year, month, day)
            .with_context(|| format!("invalid sample date {year}-{month}-{day}"))?;

        let workout = repository
            .create(NewWorkout {
                member_id: member.id,
                workout_date,
                workout_type: workout_type.to_string(),
                duration,
                intensity: intensity.map(str::to_string),
                notes: notes.map(str::to_string),
            })
            .await
            .with_context(|| format!("failed to insert sample {workout_type} workout"))?;
        workouts.push(workout);
    }

    Ok((member, workouts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitness_database::{initialize_database, DatabaseConfig};
    use tempfile::TempDir;

    async fn test_pool() -> (SqlitePool, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", temp_dir.path().join("server.db").display()),
            max_connections: 2,
        };
        (initialize_database(&config).await.unwrap(), temp_dir)
    }

    #[test]
    fn test_serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["fitness-server"]).unwrap();
        assert_eq!(cli.command, None);

        let cli = Cli::try_parse_from(["fitness-server", "seed-data"]).unwrap();
        assert_eq!(cli.command, Some(Commands::SeedData));
    }

    #[tokio::test]
    async fn test_seed_then_clear() {
        let (pool, _temp_dir) = test_pool().await;

        let (member, workouts) = seed(&pool).await.unwrap();
        assert_eq!(workouts.len(), 3);
        assert!(workouts.iter().all(|w| w.member_id == member.id));

        let (members, stored) = load_all(&pool).await.unwrap();
        assert_eq!(members, vec![member]);
        assert_eq!(stored, workouts);

        assert_eq!(clear_all(&pool).await.unwrap(), (3, 1));
        let (members, stored) = load_all(&pool).await.unwrap();
        assert!(members.is_empty());
        assert!(stored.is_empty());
    }
}

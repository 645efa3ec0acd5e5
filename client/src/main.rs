//! Nutri Clinic CLI
//!
//! Command-line front end over the client library: sign in, view the patient
//! dashboard, browse and book appointment slots, and manage availability.
//!
//! Usage:
//!   nutri-clinic login --email <email> --password <password>
//!   nutri-clinic register --name <name> --email <email> --password <password> [--role nutritionist]
//!   nutri-clinic dashboard [--refresh]
//!   nutri-clinic schedule --nutritionist <id> [--date <YYYY-MM-DD>]
//!   nutri-clinic book --nutritionist <id> --at <YYYY-MM-DDTHH:MM>
//!   nutri-clinic availability --nutritionist <id> <HH:MM>...

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use nutri_clinic_client::config::ClientConfig;
use nutri_clinic_client::services::{AuthService, DashboardService, MealPlanService, ScheduleService};
use nutri_clinic_client::state::ClientState;
use nutri_clinic_shared::models::{Meal, Role};
use nutri_clinic_shared::types::{CreateMealPlanRequest, LoginRequest, RegisterRequest};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "nutri-clinic")]
#[command(version)]
#[command(about = "Nutri Clinic patient and nutritionist client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "NC_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and store its session
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "NC_PASSWORD", hide_env_values = true)]
        password: String,

        /// patient or nutritionist
        #[arg(short, long, value_parser = parse_role, default_value = "patient")]
        role: Role,
    },

    /// Clear the stored session
    Logout,

    /// Show the patient dashboard: calories, ideal weight and projection
    Dashboard {
        /// Fetch the profile again instead of using the cached one
        #[arg(long)]
        refresh: bool,
    },

    /// Show a nutritionist's slots for a day
    Schedule {
        #[arg(short, long)]
        nutritionist: Uuid,

        /// Day to show, defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Upcoming appointments grouped by patient
    Upcoming,

    /// Book an appointment
    Book {
        #[arg(short, long)]
        nutritionist: Uuid,

        /// Slot start, e.g. 2026-10-20T09:00
        #[arg(long, value_parser = parse_slot_start)]
        at: NaiveDateTime,
    },

    /// Confirm that an appointment took place
    Confirm {
        appointment: Uuid,
    },

    /// Replace a nutritionist's available hours
    Availability {
        #[arg(short, long)]
        nutritionist: Uuid,

        /// Hours as HH:MM
        hours: Vec<String>,
    },

    /// List meal plans
    MealPlans {
        /// Patient to list for, defaults to the signed-in patient
        #[arg(short, long)]
        patient: Option<Uuid>,
    },

    /// Create a meal plan for a patient
    CreateMealPlan {
        #[arg(short, long)]
        patient: Uuid,

        #[arg(short, long)]
        title: String,

        /// JSON file holding the list of meals
        #[arg(short, long)]
        meals: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = ClientConfig::load().context("Failed to load configuration")?;
    init_tracing(&config);

    let cli = Cli::parse();
    let state = ClientState::new(config)?;
    state.session.load().await?;

    match cli.command {
        Commands::Login { email, password } => {
            let user = AuthService::login(&state, LoginRequest { email, password }).await?;
            print_json(&user)?;
        }
        Commands::Register {
            name,
            email,
            password,
            role,
        } => {
            let request = RegisterRequest {
                name,
                email,
                password,
                role,
            };
            let user = AuthService::register(&state, request).await?;
            print_json(&user)?;
        }
        Commands::Logout => {
            AuthService::logout(&state).await?;
            info!("Signed out");
        }
        Commands::Dashboard { refresh } => {
            let today = Local::now().date_naive();
            let summary = DashboardService::patient_dashboard(&state, today, refresh).await?;
            print_json(&summary)?;
        }
        Commands::Schedule { nutritionist, date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let schedule = ScheduleService::day_schedule(&state, nutritionist, date).await?;
            print_json(&schedule)?;
        }
        Commands::Upcoming => {
            let now = Local::now().naive_local();
            let groups = ScheduleService::upcoming_by_patient(&state, now).await?;
            print_json(&groups)?;
        }
        Commands::Book { nutritionist, at } => {
            let record = ScheduleService::book(&state, nutritionist, at).await?;
            print_json(&record)?;
        }
        Commands::Confirm { appointment } => {
            let record = ScheduleService::confirm(&state, appointment).await?;
            print_json(&record)?;
        }
        Commands::Availability { nutritionist, hours } => {
            let availability = ScheduleService::update_availability(&state, nutritionist, hours).await?;
            print_json(&availability)?;
        }
        Commands::MealPlans { patient } => {
            let plans = MealPlanService::list(&state, patient).await?;
            print_json(&plans)?;
        }
        Commands::CreateMealPlan {
            patient,
            title,
            meals,
        } => {
            let raw = std::fs::read_to_string(&meals)
                .with_context(|| format!("Failed to read meals from {}", meals.display()))?;
            let meals: Vec<Meal> = serde_json::from_str(&raw).context("Meals file is not a JSON list of meals")?;
            let request = CreateMealPlanRequest {
                patient_id: patient,
                title,
                meals,
            };
            let plan = MealPlanService::create(&state, request).await?;
            print_json(&plan)?;
        }
    }

    Ok(())
}

fn parse_slot_start(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM: {}", e))
}

fn parse_role(value: &str) -> Result<Role, String> {
    match value.trim().to_lowercase().as_str() {
        "patient" => Ok(Role::Patient),
        "nutritionist" => Ok(Role::Nutritionist),
        other => Err(format!("unknown role {:?}, expected patient or nutritionist", other)),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize tracing/logging
///
/// Logs go to stderr so command output on stdout stays machine readable.
fn init_tracing(config: &ClientConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if ClientConfig::is_production() {
            "nutri_clinic_client=warn".into()
        } else {
            "nutri_clinic_client=info".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config.logging.json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

//! Mediculture CLI
//!
//! Command-line access to the clinic backend for operators:
//! - Check backend status
//! - List and update appointments
//! - Browse the medicine catalog
//! - Review prescriptions

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use mediculture::backend::{BackendClient, ClinicBackend};
use mediculture::config::{generate_default_config, Config};
use mediculture::views::appointments::demo_appointment;
use mediculture::views::{
    AppointmentAction, AppointmentsView, MedicineSearch, MedicinesView, PrescriptionHistory,
    StatusFilter, SystemStatus,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mediculture")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Operator CLI for the Mediculture clinic backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Clinic backend URL (default: from config)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show backend status
    Status,

    /// List appointments
    Appointments {
        /// Status filter (scheduled, confirmed, completed, cancelled, rescheduled)
        #[arg(short, long)]
        status: Option<String>,
        /// Only appointments for this patient (Firebase UID)
        #[arg(short, long)]
        patient: Option<String>,
    },

    /// Mark an appointment completed
    Complete {
        /// Appointment ID
        id: String,
    },

    /// Mark an appointment rescheduled
    Reschedule {
        /// Appointment ID
        id: String,
    },

    /// Cancel an appointment
    Cancel {
        /// Appointment ID
        id: String,
    },

    /// Search the medicine catalog
    Medicines {
        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,
        /// Category filter
        #[arg(short, long)]
        category: Option<String>,
        /// Page size (default: 20 when browsing, 50 when searching)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// List medicine categories
    Categories,

    /// Show a user profile
    Profile {
        /// Firebase UID
        firebase_uid: String,
    },

    /// List past prescriptions
    Prescriptions,

    /// Create tomorrow's demo appointment for the configured doctor
    DemoAppointment,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load_default();
    if let Some(url) = &cli.backend_url {
        config.backend.url = url.clone();
    }

    let backend = BackendClient::new(config.backend.client_config())
        .context("Failed to build clinic backend client")?;
    let format = cli.format;

    match cli.command {
        Commands::Status => {
            let status = SystemStatus::load(&backend).await;

            if format == OutputFormat::Json {
                return print_json(&status);
            }

            println!("Mediculture CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Backend URL: {}", backend.config().base_url);
            println!();
            println!("{}", status.label);

            if status.connected {
                println!("Database: {}", status.database);
                if let Some(counts) = status.collections {
                    println!();
                    println!("Collections:");
                    println!("  Users: {}", count_or_dash(counts.users));
                    println!("  Appointments: {}", count_or_dash(counts.appointments));
                    println!("  Medicines: {}", count_or_dash(counts.medicines));
                }
            } else {
                if let Some(error) = &status.error {
                    eprintln!("Error: {}", error);
                }
                eprintln!();
                eprintln!("Make sure the clinic backend is running at {}", backend.config().base_url);
                std::process::exit(1);
            }
        }

        Commands::Appointments { status, patient } => {
            let filter = StatusFilter::parse(status.as_deref()).map_err(anyhow::Error::msg)?;

            let view = match patient {
                None => AppointmentsView::load(&backend, filter).await,
                Some(uid) => {
                    let mut query = filter.to_query();
                    query.firebase_uid = Some(uid);
                    let list = backend.list_appointments(&query).await?;
                    AppointmentsView::build(filter, &list.appointments)
                }
            };

            if format == OutputFormat::Json {
                return print_json(&view);
            }

            print_notices(&view.notices);
            println!("{}", view.heading);

            if view.appointments.is_empty() {
                println!();
                println!("No appointments found.");
                println!();
                println!("Add a demo appointment with:");
                println!("  mediculture-cli demo-appointment");
            } else {
                println!();
                println!(
                    "{:<26} {:<16} {:<12} {:<10} {:<12} {}",
                    "ID", "Patient", "Date", "Time", "Status", "Fee"
                );
                println!("{}", "-".repeat(86));

                for card in &view.appointments {
                    println!(
                        "{:<26} {:<16} {:<12} {:<10} {:<12} {}",
                        card.id.as_deref().unwrap_or("-"),
                        card.patient_id,
                        card.date,
                        card.time,
                        card.status_label,
                        card.fee
                    );
                }
            }
        }

        Commands::Complete { id } => update_status(&backend, &id, AppointmentAction::Complete).await?,
        Commands::Reschedule { id } => {
            update_status(&backend, &id, AppointmentAction::Reschedule).await?
        }
        Commands::Cancel { id } => update_status(&backend, &id, AppointmentAction::Cancel).await?,

        Commands::Medicines {
            search,
            category,
            limit,
        } => {
            let search = MedicineSearch {
                search,
                category,
                searched: false,
            };
            let mut query = search.to_query();
            if let Some(limit) = limit {
                query.limit = limit;
            }

            let list = backend.list_medicines(&query).await?;
            let view = MedicinesView::build(Vec::new(), &list.medicines, list.pagination.total_items);

            if format == OutputFormat::Json {
                return print_json(&view);
            }

            println!("{}", view.heading);
            if let Some(showing) = &view.showing {
                println!("{}", showing);
            }

            if let Some(empty) = &view.empty_message {
                println!();
                println!("{}", empty);
            } else {
                println!();
                println!(
                    "{:<28} {:<16} {:<10} {:<16} {}",
                    "Name", "Category", "Price", "Stock", "Rx"
                );
                println!("{}", "-".repeat(80));

                for card in &view.medicines {
                    println!(
                        "{:<28} {:<16} {:<10} {:<16} {}",
                        card.name,
                        card.category,
                        card.price.price,
                        card.stock_label,
                        if card.prescription_required { "yes" } else { "no" }
                    );
                }
            }
        }

        Commands::Categories => {
            let categories = backend.medicine_categories().await?;

            if format == OutputFormat::Json {
                return print_json(&categories);
            }

            if categories.is_empty() {
                println!("No categories defined.");
            }
            for category in categories {
                println!("{}", category);
            }
        }

        Commands::Profile { firebase_uid } => {
            let profile = backend.user_profile(&firebase_uid).await?;
            // Profiles are free-form; both formats print the JSON
            print_json(&profile)?;
        }

        Commands::Prescriptions => {
            let history = PrescriptionHistory::load(&backend).await;

            if format == OutputFormat::Json {
                return print_json(&history);
            }

            print_notices(&history.notices);

            if let Some(empty) = &history.empty_message {
                println!("{}", empty);
            }

            for entry in &history.prescriptions {
                println!("{}", entry.title);
                println!("  Doctor: {}", entry.doctor);
                println!("  Type: {}", entry.kind);
                if let Some(symptoms) = &entry.symptoms {
                    println!("  Symptoms: {}", symptoms);
                }
                for medicine in &entry.medicines {
                    println!(
                        "  - {} ({}, {}, {})",
                        medicine.name, medicine.dosage, medicine.frequency, medicine.duration
                    );
                }
                if let Some(notes) = &entry.notes {
                    println!("  Notes: {}", notes);
                }
                println!();
            }
        }

        Commands::DemoAppointment => {
            let appointment = demo_appointment(&config.session, chrono::Utc::now());
            let created = backend.create_appointment(&appointment).await?;

            if format == OutputFormat::Json {
                return print_json(&created);
            }

            println!("Demo appointment created!");
            println!(
                "  ID: {}",
                created["_id"].as_str().unwrap_or("(not returned)")
            );
            println!("  Doctor: {}", appointment.doctor_name);
            println!("  Date: {} {}", appointment.appointment_date, appointment.time_slot);
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

async fn update_status(
    backend: &BackendClient,
    id: &str,
    action: AppointmentAction,
) -> anyhow::Result<()> {
    backend
        .update_appointment_status(id, action.target_status())
        .await
        .with_context(|| format!("Failed to update appointment {}", id))?;

    println!("{}", action.confirmation());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_notices(notices: &[String]) {
    for notice in notices {
        eprintln!("{}", notice);
    }
}

fn count_or_dash(count: Option<u64>) -> String {
    count.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string())
}

/// MediBook - hospital appointment booking
use clap::{Parser, Subcommand};
use medibook_core::{
    Address, AppointmentId, CreateDoctor, CreateHospital, DoctorId, PaymentConfirmation,
    ProfileUpdate, UserId,
};
use medibook_server::{config::ServerConfig, services::ImageUpload, state::AppState};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "medibook")]
#[command(about = "Hospital appointment booking", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and print its token
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log in and print a token
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Show the caller's profile
    Profile {
        #[arg(short, long, env = "MEDIBOOK_TOKEN")]
        token: String,
    },
    /// Update the caller's profile
    UpdateProfile {
        #[arg(short, long, env = "MEDIBOOK_TOKEN")]
        token: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        dob: String,
        #[arg(long)]
        gender: String,
        #[arg(long, default_value = "")]
        address_line1: String,
        #[arg(long, default_value = "")]
        address_line2: String,
        /// Profile image file to upload
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Add a hospital
    AddHospital {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        address: String,
    },
    /// Add a doctor to a hospital
    AddDoctor {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        hospital: String,
        #[arg(long)]
        speciality: String,
        #[arg(long)]
        degree: String,
        #[arg(long)]
        experience: String,
        #[arg(long)]
        fees: i64,
        #[arg(long, default_value = "")]
        about: String,
        #[arg(long)]
        image: Option<String>,
        #[arg(long, default_value = "")]
        address_line1: String,
        #[arg(long, default_value = "")]
        address_line2: String,
    },
    /// Open or close a doctor for bookings
    SetAvailability {
        doctor_id: String,
        #[arg(action = clap::ArgAction::Set)]
        available: bool,
    },
    /// List hospitals
    Hospitals,
    /// List doctors of a hospital
    Doctors { hospital: String },
    /// Show a doctor's booked slots
    Slots { doctor_id: String },
    /// Book an appointment
    Book {
        #[arg(short, long, env = "MEDIBOOK_TOKEN")]
        token: String,
        #[arg(long)]
        doctor: String,
        /// Slot date, e.g. 10_1_2024
        #[arg(long)]
        date: String,
        /// Slot time, e.g. 10:30 AM
        #[arg(long)]
        time: String,
    },
    /// Cancel an appointment
    Cancel {
        #[arg(short, long, env = "MEDIBOOK_TOKEN")]
        token: String,
        appointment_id: String,
    },
    /// List the caller's appointments
    Appointments {
        #[arg(short, long, env = "MEDIBOOK_TOKEN")]
        token: String,
    },
    /// Create a payment order for an appointment
    Pay { appointment_id: String },
    /// Verify a completed checkout and mark the appointment paid
    VerifyPayment {
        #[arg(long)]
        order_id: String,
        #[arg(long)]
        payment_id: String,
        #[arg(long)]
        signature: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medibook_server=info,medibook=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let state = AppState::initialize(&config).await?;

    if let Err(err) = run(&state, cli.command).await {
        if err.is_client_error() {
            tracing::warn!(error = %err, "Request rejected");
        } else {
            tracing::error!(error = %err, "Command failed");
        }
        return Err(err.into());
    }

    Ok(())
}

async fn run(state: &AppState, command: Commands) -> medibook_server::Result<()> {
    match command {
        Commands::Register {
            name,
            email,
            password,
        } => {
            let token = state.accounts().register(&name, &email, &password).await?;
            println!("{token}");
        }
        Commands::Login { email, password } => {
            let token = state.accounts().login(&email, &password).await?;
            println!("{token}");
        }
        Commands::Profile { token } => {
            let user_id = caller(state, &token)?;
            let profile = state.profiles().get_profile(&user_id).await?;
            print_json(&profile)?;
            if let Some(reference) = &profile.image {
                println!("image: {}", state.profiles().image_path(reference)?.display());
            }
        }
        Commands::UpdateProfile {
            token,
            name,
            phone,
            dob,
            gender,
            address_line1,
            address_line2,
            image,
        } => {
            let user_id = caller(state, &token)?;
            let image = match image {
                Some(path) => Some(ImageUpload::from_path(&path).await?),
                None => None,
            };
            let update = ProfileUpdate {
                name,
                phone,
                address: Address::new(address_line1, address_line2),
                dob,
                gender,
            };
            let profile = state
                .profiles()
                .update_profile(&user_id, update, image)
                .await?;
            print_json(&profile)?;
        }
        Commands::AddHospital { name, address } => {
            let hospital = state
                .directory()
                .add_hospital(CreateHospital { name, address })
                .await?;
            print_json(&hospital)?;
        }
        Commands::AddDoctor {
            name,
            email,
            hospital,
            speciality,
            degree,
            experience,
            fees,
            about,
            image,
            address_line1,
            address_line2,
        } => {
            let doctor = state
                .directory()
                .add_doctor(CreateDoctor {
                    name,
                    email,
                    image,
                    speciality,
                    degree,
                    experience,
                    about,
                    fees,
                    hospital,
                    address: Address::new(address_line1, address_line2),
                })
                .await?;
            print_json(&doctor)?;
        }
        Commands::SetAvailability {
            doctor_id,
            available,
        } => {
            state
                .directory()
                .set_doctor_availability(&DoctorId::new(doctor_id), available)
                .await?;
        }
        Commands::Hospitals => {
            print_json(&state.directory().list_hospitals().await?)?;
        }
        Commands::Doctors { hospital } => {
            print_json(&state.directory().doctors_for_hospital(&hospital).await?)?;
        }
        Commands::Slots { doctor_id } => {
            print_json(&state.slots().ledger(&DoctorId::new(doctor_id)).await?)?;
        }
        Commands::Book {
            token,
            doctor,
            date,
            time,
        } => {
            let user_id = caller(state, &token)?;
            let appointment = state
                .appointments()
                .book(&user_id, &DoctorId::new(doctor), &date, &time)
                .await?;
            print_json(&appointment)?;
        }
        Commands::Cancel {
            token,
            appointment_id,
        } => {
            let user_id = caller(state, &token)?;
            let appointment = state
                .appointments()
                .cancel(&user_id, &AppointmentId::new(appointment_id))
                .await?;
            print_json(&appointment)?;
        }
        Commands::Appointments { token } => {
            let user_id = caller(state, &token)?;
            print_json(&state.appointments().list(&user_id).await?)?;
        }
        Commands::Pay { appointment_id } => {
            let order = state
                .payments()
                .create_order(&AppointmentId::new(appointment_id))
                .await?;
            print_json(&order)?;
        }
        Commands::VerifyPayment {
            order_id,
            payment_id,
            signature,
        } => {
            let appointment = state
                .payments()
                .verify(&PaymentConfirmation {
                    order_id,
                    payment_id,
                    signature,
                })
                .await?;
            print_json(&appointment)?;
        }
    }

    Ok(())
}

fn caller(state: &AppState, token: &str) -> medibook_server::Result<UserId> {
    state.accounts().authenticate(token)
}

fn print_json<T: Serialize>(value: &T) -> medibook_server::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(medibook_core::BookingError::from)?;
    println!("{json}");
    Ok(())
}

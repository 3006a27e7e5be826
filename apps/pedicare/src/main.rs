//! # PediCare
//!
//! Entry point for the `pedicare` binary.

use clap::Parser;
use pedicare::AppError;
use pedicare::cli::{
    Cli, Commands, cmd_ambulance_follow, cmd_book, cmd_doctors, cmd_growth, cmd_hospitals,
    cmd_timeline, cmd_triage, cmd_vaccines,
};
use pedicare::config::ServerConfig;
use pedicare::logging::init_logging;
use pedicare_core::{DispatchTimeline, GrowthForm};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Triage {
            input,
            answers,
            json,
        } => cmd_triage(input.as_deref(), &answers, json).map(drop),
        Commands::Growth {
            weight,
            height,
            age,
            sex,
            json,
        } => {
            let form = GrowthForm {
                weight: weight.map(Into::into),
                height: height.map(Into::into),
                age: age.map(Into::into),
                sex,
            };
            cmd_growth(&form, json).map(drop)
        }
        Commands::Vaccines { input, json } => cmd_vaccines(input.as_deref(), json).map(drop),
        Commands::Ambulance { follow, json } => {
            if follow {
                cmd_ambulance_follow(DispatchTimeline::default()).await.map(drop)
            } else {
                cmd_timeline(json).map(drop)
            }
        }
        Commands::Book {
            doctor,
            date,
            time,
            json,
        } => cmd_book(&doctor, &date, &time, json).map(drop),
        Commands::Hospitals { query, json } => cmd_hospitals(query.as_deref(), json).map(drop),
        Commands::Doctors { json } => cmd_doctors(json).map(drop),
        Commands::Serve { host, port } => {
            let config = ServerConfig::from_env()?.with_overrides(host, port);
            pedicare::api::serve(config).await
        }
    }
}

mod args;

use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, ClientConfig};
use storage::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, LinkOpenerRef, SystemBrowserOpener, UiApp, build_app_context};

use crate::args::{Args, Command, Parsed, parse, print_usage};

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::new(SystemBrowserOpener)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = parse(std::env::args().skip(1), |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let Args {
        api_url,
        session_file,
        command,
    } = match parsed {
        Parsed::Run(args) => args,
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
    };

    init_tracing();

    let storage = Storage::file(&session_file)?;
    let config = ClientConfig::new(api_url)?;
    let services = AppServices::http(config.clone(), &storage);
    let session = services.session();

    match command {
        Command::Ui => {
            info!(api = %config.base_url, session_file = %session_file.display(), "launching ui");
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Progress Tracker")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Login { token } => {
            session.sign_in(&token)?;
            println!("signed in; token stored in {}", session_file.display());
            Ok(())
        }
        Command::Logout => {
            session.sign_out()?;
            println!("signed out");
            Ok(())
        }
        Command::Status => {
            if session.is_signed_in() {
                println!("signed in ({})", session_file.display());
            } else {
                println!("signed out");
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

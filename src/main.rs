// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scoutbase command-line client.
//!
//! Usage:
//! ```bash
//! # Create an account (logs in and reports where to go next)
//! scoutbase register --name "Sam Lee" --email sam@example.com --password secret
//!
//! # Commands that need a session log in first
//! export SCOUTBASE_EMAIL=sam@example.com SCOUTBASE_PASSWORD=secret
//! scoutbase assign-role athlete
//! scoutbase create-profile athlete --field high_school_name=Central \
//!     --field positions=Pitcher --field height=6.1 --field weight=180 \
//!     --field bio="Lefty" --field state=CA --field profile_picture=./me.png
//!
//! # Search (no session needed)
//! scoutbase search coaches --field school_name="State University"
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use scoutbase_client::{
    config::Config,
    error::{AppError, Result},
    models::{Profile, Role},
    schema::{profile_schema, FormInput, FormSchema, ATHLETE_SEARCH, COACH_SEARCH},
    screens::{
        self, home,
        profile::{self, Picture},
        role::RoleSelection,
        search::{self, SearchOutcome},
    },
    AppState,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "scoutbase",
    about = "Scoutbase recruiting marketplace client",
    long_about = "Register, log in, manage your athlete/coach/scout profile and search the Scoutbase marketplace."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// API base URL override (default: SCOUTBASE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Account email for commands that need a session
    #[arg(long, global = true, env = "SCOUTBASE_EMAIL")]
    email: Option<String>,

    /// Account password for commands that need a session
    #[arg(long, global = true, env = "SCOUTBASE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account, then log in
    Register {
        #[arg(long)]
        name: String,
    },
    /// Log in and show where the app would go next
    Login,
    /// Show the logged-in user
    Whoami,
    /// Pick a role (once per account)
    AssignRole { role: RoleArg },
    /// Create your profile
    CreateProfile {
        role: RoleArg,
        /// Form field as key=value (repeatable)
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Edit your profile; unspecified fields keep their current values
    EditProfile {
        role: RoleArg,
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Replace your profile picture
    ReplacePicture { role: RoleArg, path: PathBuf },
    /// Show your profile
    Profile,
    /// Search athletes or coaches
    Search {
        target: SearchTarget,
        #[arg(long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Reveal a user's contact email
    Contact { user_id: u64 },
    /// Show featured articles
    Home {
        /// Article id to open
        #[arg(long)]
        select: Option<u32>,
    },
    /// Log out
    Logout,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Athlete,
    Coach,
    Scout,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Athlete => Role::Athlete,
            RoleArg::Coach => Role::Coach,
            RoleArg::Scout => Role::Scout,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SearchTarget {
    Athletes,
    Coaches,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let config = match load_config(cli.api_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(api_url = %config.api_url, "Configuration loaded");
    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&state, &cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e.user_message(fallback_message(&cli.command)));
            if e.is_session_error() {
                let route = screens::auth::expire_to_login(&state).await;
                eprintln!("Redirecting to {route}");
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(api_url: Option<&str>) -> anyhow::Result<Config> {
    let config = Config::from_env()?;
    Ok(match api_url {
        Some(url) => config.with_api_url(url)?,
        None => config,
    })
}

/// Alert text used when the server gives no message.
fn fallback_message(command: &Command) -> &'static str {
    match command {
        Command::Register { .. } => "Registration failed. Please try again.",
        Command::Login | Command::Whoami => "Login failed. Please try again.",
        Command::AssignRole { .. } => "Failed to assign role.",
        Command::CreateProfile { .. } => "Failed to create profile.",
        Command::EditProfile { .. } | Command::ReplacePicture { .. } => {
            "Failed to update profile."
        }
        Command::Profile => "Failed to load profile data.",
        Command::Search { .. } => "Search failed. Please try again.",
        Command::Contact { .. } => "Failed to fetch contact email.",
        Command::Home { .. } => "Something went wrong.",
        Command::Logout => "Failed to logout. Please try again.",
    }
}

async fn run(state: &AppState, cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Register { name } => {
            let form = credentials(cli).with("name", name.as_str());
            let route = screens::auth::register(state, &form).await?;
            println!("Registration successful! Next: {route}");
        }
        Command::Login => {
            let route = screens::auth::login(state, &credentials(cli)).await?;
            println!("Login successful! Next: {route}");
        }
        Command::Whoami => {
            let session = screens::auth::sign_in(state, &credentials(cli)).await?;
            println!("User ID: {}", session.user_id);
            if let Some(name) = session.name {
                println!("Name: {name}");
            }
            if let Some(exp) = session.expires_at {
                println!("Session expires: {}", exp.to_rfc3339());
            }
        }
        Command::AssignRole { role } => {
            screens::auth::sign_in(state, &credentials(cli)).await?;
            let mut selection = RoleSelection::new();
            selection.select((*role).into());
            let route = screens::role::assign_role(state, &selection).await?;
            println!("Role assigned. Next: {route}");
        }
        Command::CreateProfile { role, fields } => {
            let role = Role::from(*role);
            let form = parse_fields(profile_schema(role), fields)?;
            screens::auth::sign_in(state, &credentials(cli)).await?;
            let route = profile::create_profile(state, role, &form).await?;
            println!("{role} profile created successfully! Next: {route}");
        }
        Command::EditProfile { role, fields } => {
            let role = Role::from(*role);
            let edits = parse_fields(profile_schema(role), fields)?;
            screens::auth::sign_in(state, &credentials(cli)).await?;
            let mut form = profile::load_edit_form(state, role).await?;
            form.overlay(&edits);
            let route = profile::save_profile_edits(state, role, &form).await?;
            println!("Profile updated successfully. Next: {route}");
        }
        Command::ReplacePicture { role, path } => {
            screens::auth::sign_in(state, &credentials(cli)).await?;
            let route = profile::replace_picture(state, (*role).into(), path).await?;
            println!("Profile picture updated. Next: {route}");
        }
        Command::Profile => {
            screens::auth::sign_in(state, &credentials(cli)).await?;
            match profile::view_profile(state).await? {
                Some(view) => {
                    println!("Profile ({})", view.role);
                    match view.picture {
                        Picture::Url(url) => println!("Picture: {url}"),
                        Picture::Placeholder(text) => println!("Picture: {text}"),
                    }
                    print_rows(&view.rows);
                    if let Some(route) = view.edit_route {
                        println!("Edit: {route}");
                    }
                }
                None => println!("Failed to load profile data."),
            }
        }
        Command::Search { target, fields } => match target {
            SearchTarget::Athletes => {
                let filters = parse_fields(&ATHLETE_SEARCH, fields)?;
                let outcome = search::search_athletes(state, &filters).await?;
                print_outcome(outcome, |p| Profile::Athlete(p.clone()));
            }
            SearchTarget::Coaches => {
                let filters = parse_fields(&COACH_SEARCH, fields)?;
                let outcome = search::search_coaches(state, &filters).await?;
                print_outcome(outcome, |p| Profile::Coach(p.clone()));
            }
        },
        Command::Contact { user_id } => {
            screens::auth::sign_in(state, &credentials(cli)).await?;
            let email = profile::reveal_contact_email(state, *user_id).await?;
            println!("{email}");
        }
        Command::Home { select } => {
            println!("{}", home::WELCOME);
            match select {
                Some(id) => match home::select_article(*id) {
                    Some(message) => println!("{message}"),
                    None => println!("No article with id {id}"),
                },
                None => {
                    for article in home::featured_articles() {
                        println!("\n[{}] {}\n    {}", article.id, article.title, article.description);
                    }
                }
            }
        }
        Command::Logout => {
            screens::auth::sign_in(state, &credentials(cli)).await?;
            let route = screens::auth::logout(state).await;
            println!("Logged out. Next: {route}");
        }
    }
    Ok(())
}

/// Login form from the global `--email`/`--password` flags.
fn credentials(cli: &Cli) -> FormInput {
    FormInput::new()
        .with("email", cli.email.clone().unwrap_or_default())
        .with("password", cli.password.clone().unwrap_or_default())
}

/// Parse `--field key=value` flags against a form's schema.
fn parse_fields(schema: &FormSchema, fields: &[String]) -> Result<FormInput> {
    let input = FormInput::from_pairs(fields)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
    let unknown = schema.unknown_fields(&input);
    if !unknown.is_empty() {
        let known: Vec<_> = schema.fields.iter().map(|f| f.name).collect();
        return Err(AppError::Internal(anyhow::anyhow!(
            "unknown {} field(s): {} (expected one of: {})",
            schema.name,
            unknown.join(", "),
            known.join(", ")
        )));
    }
    Ok(input)
}

fn print_rows(rows: &[(&'static str, String)]) {
    for (label, value) in rows {
        println!("  {label}: {value}");
    }
}

fn print_outcome<T>(outcome: SearchOutcome<T>, as_profile: impl Fn(&T) -> Profile) {
    match outcome {
        SearchOutcome::NoResults(message) => println!("{message}"),
        SearchOutcome::Results(results) => {
            for (i, result) in results.iter().enumerate() {
                let profile = as_profile(result);
                println!("#{}", i + 1);
                print_rows(&profile.display_rows());
            }
        }
    }
}

/// Initialize structured logging; JSON when requested.
fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("scoutbase_client=info,warn"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

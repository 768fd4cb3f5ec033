//! `nexus` command-line driver over file-backed session storage.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};

use clap::{Parser, Subcommand};
use ortho_config::OrthoConfig;
use serde::Serialize;
use serde_json::json;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use nexus::domain::catalogue::{
    CatalogueFilter, CommunityFacet, FacetSelection, JobBoardStats, JobFacet, facet_values,
};
use nexus::domain::{
    DashboardRole, Email, Error, LoginMethod, OneTimeCode, Role, SessionManager, SignupProfile,
};
use nexus::{Nexus, NexusSettings};

/// `nexus` command arguments.
#[derive(Debug, Parser)]
#[command(name = "nexus", about = "NetworkNexus session and catalogue driver", version)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Request a one-time code for an email.
    SendCode {
        /// Registered email address.
        email: String,
    },
    /// Sign in, with a code or through the trusted shortcut.
    Login {
        /// Registered email address.
        email: String,
        /// Code to submit; one is requested first in the same run.
        ///
        /// Only the demo code can be known in advance, so this is refused
        /// when `NEXUS_RANDOM_CODES` is set.
        #[arg(long)]
        code: Option<String>,
    },
    /// Register a new identity and sign it in.
    Signup {
        #[arg(long)]
        email: String,
        /// Display name.
        #[arg(long)]
        name: String,
        /// One of alumni, student, employer, admin. Defaults to alumni.
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        phone: Option<String>,
        /// Institute name; derived from the email domain when omitted.
        #[arg(long)]
        institute: Option<String>,
        #[arg(long = "roll-number")]
        roll_number: Option<String>,
        #[arg(long = "graduation-year")]
        graduation_year: Option<u16>,
    },
    /// Sign out.
    Logout,
    /// Show the signed-in identity and dashboard perspective.
    Whoami {
        /// Preview the dashboard as another role.
        #[arg(long = "view-as")]
        view_as: Option<Role>,
    },
    /// Search the job board.
    Jobs {
        #[arg(long, default_value = "")]
        query: String,
        /// Employment type, or `all`.
        #[arg(long = "type")]
        kind: Option<String>,
        /// Location city, or `all`.
        #[arg(long)]
        city: Option<String>,
    },
    /// Search communities.
    Communities {
        #[arg(long, default_value = "")]
        query: String,
        /// Community type, or `all`.
        #[arg(long = "type")]
        kind: Option<String>,
    },
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = NexusSettings::load_from_iter([OsString::from("nexus")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    let Nexus { session, catalogue } = nexus::build(&settings).map_err(io::Error::other)?;

    match args.command {
        Command::SendCode { email } => {
            let dispatch = session
                .send_code(&parse_email(&email)?)
                .await
                .map_err(domain_failure)?;
            print_json(&dispatch)
        }
        Command::Login { email, code } => {
            let signed_in = login(&session, &parse_email(&email)?, code).await?;
            print_json(&json!({ "signedIn": signed_in, "identity": session.current() }))
        }
        Command::Signup {
            email,
            name,
            role,
            phone,
            institute,
            roll_number,
            graduation_year,
        } => {
            let mut profile = SignupProfile::new(email, name)
                .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?
                .with_role(role.unwrap_or_default());
            if let Some(phone) = phone {
                profile = profile.with_phone(phone);
            }
            if let Some(institute) = institute {
                profile = profile.with_institute(institute);
            }
            if let Some(roll_number) = roll_number {
                profile = profile.with_roll_number(roll_number);
            }
            if let Some(year) = graduation_year {
                profile = profile.with_graduation_year(year);
            }
            let created = session.signup(profile).await.map_err(domain_failure)?;
            print_json(&json!({ "created": created, "identity": session.current() }))
        }
        Command::Logout => {
            session.logout().map_err(domain_failure)?;
            print_json(&json!({ "signedIn": false }))
        }
        Command::Whoami { view_as } => {
            let current = session.current();
            let dashboard = DashboardRole::resolve(view_as, current.as_ref());
            print_json(&json!({
                "signedIn": current.is_some(),
                "identity": current,
                "dashboard": dashboard.role(),
                "dashboardLabel": dashboard.label(),
            }))
        }
        Command::Jobs { query, kind, city } => {
            let jobs = catalogue.jobs().map_err(io::Error::other)?;
            let listed = CatalogueFilter::new(&query)
                .with_facet(JobFacet::Kind, FacetSelection::from(kind))
                .with_facet(JobFacet::City, FacetSelection::from(city))
                .apply(&jobs);
            print_json(&json!({
                "stats": JobBoardStats::from_jobs(&jobs),
                "types": facet_values(&jobs, JobFacet::Kind),
                "cities": facet_values(&jobs, JobFacet::City),
                "jobs": listed,
            }))
        }
        Command::Communities { query, kind } => {
            let communities = catalogue.communities().map_err(io::Error::other)?;
            let listed = CatalogueFilter::new(&query)
                .with_facet(CommunityFacet::Kind, FacetSelection::from(kind))
                .apply(&communities);
            print_json(&json!({ "communities": listed }))
        }
    }
}

async fn login(session: &SessionManager, email: &Email, code: Option<String>) -> io::Result<bool> {
    let method = match code {
        Some(raw) => {
            if !session.issues_demo_codes() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "login --code needs demo codes; unset NEXUS_RANDOM_CODES",
                ));
            }
            let code = OneTimeCode::new(&raw)
                .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
            let dispatch = session.send_code(email).await.map_err(domain_failure)?;
            if !dispatch.accepted {
                return Ok(false);
            }
            LoginMethod::OneTimeCode(code)
        }
        None => LoginMethod::Trusted,
    };
    session.login(email, method).await.map_err(domain_failure)
}

fn parse_email(raw: &str) -> io::Result<Email> {
    Email::new(raw).map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))
}

fn domain_failure(error: Error) -> io::Error {
    let rendered = serde_json::to_string(&error).unwrap_or_else(|_| error.to_string());
    io::Error::other(rendered)
}

fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(io::stdout().lock(), "{rendered}")
}

#[cfg(test)]
mod tests {
    //! Unit tests for the login helper.

    use std::sync::Arc;

    use nexus::domain::ports::KeyValueStore;
    use nexus::outbound::storage::InMemoryKeyValueStore;
    use nexus::{NexusSettings, build_with_storage};
    use rstest::rstest;

    use super::*;

    fn session_with(random_codes: bool) -> SessionManager {
        let settings = NexusSettings {
            storage_dir: None,
            latency_ms: Some(0),
            timeout_ms: None,
            random_codes,
            allow_trusted_login: true,
            offline: false,
        };
        let storage: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::default());
        build_with_storage(&settings, storage)
            .expect("application should assemble")
            .session
    }

    fn john() -> Email {
        Email::new("john.doe@iitd.ac.in").expect("valid email")
    }

    #[rstest]
    #[tokio::test]
    async fn code_login_is_refused_with_random_codes() {
        let session = session_with(true);

        let error = login(&session, &john(), Some("123456".to_owned()))
            .await
            .expect_err("random codes cannot be predicted");

        assert_eq!(error.kind(), io::ErrorKind::InvalidInput);
        assert!(error.to_string().contains("NEXUS_RANDOM_CODES"));
        assert!(!session.is_authenticated());
    }

    #[rstest]
    #[tokio::test]
    async fn code_login_succeeds_with_demo_codes() {
        let session = session_with(false);

        let signed_in = login(&session, &john(), Some("123456".to_owned()))
            .await
            .expect("login completes");

        assert!(signed_in);
        assert!(session.is_authenticated());
    }
}

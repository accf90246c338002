//! terminal-notify - Desktop notifications through terminal-notifier.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use terminal_notify::args::{compile, CompileSpec};
use terminal_notify::config::ConfigLoader;
use terminal_notify::display;
use terminal_notify::notifier::{demo_request, Notifier, NotifyInput};
use terminal_notify::options::{map_to_mac, validate, NotificationRequest, Sound};

#[derive(Parser)]
#[command(
    name = "terminal-notify",
    about = "Desktop notifications through terminal-notifier",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to .terminal-notify.toml, then the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the compiled arguments instead of running the notifier.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a notification.
    Send(SendArgs),
    /// List delivered notifications of a group (`ALL` for every group).
    List {
        /// Group ID.
        group: String,
    },
    /// Remove delivered notifications of a group (`ALL` for every group).
    Remove {
        /// Group ID.
        group: String,
    },
    /// Send the self-test notification, titled with ./Cargo.toml's package name.
    Demo,
}

#[derive(Args)]
struct SendArgs {
    /// Notification body.
    message: Option<String>,
    #[arg(short, long)]
    title: Option<String>,
    #[arg(short, long)]
    subtitle: Option<String>,
    /// Sound name, or `default` for the default sound.
    #[arg(long)]
    sound: Option<String>,
    /// Icon path or URL.
    #[arg(short, long)]
    icon: Option<String>,
    /// Seconds before the notification is dismissed.
    #[arg(long)]
    timeout: Option<f64>,
    /// Wait for user interaction.
    #[arg(short, long)]
    wait: bool,
    /// Group ID; replaces earlier notifications of the same group.
    #[arg(short, long)]
    group: Option<String>,
    /// Comma-separated action buttons.
    #[arg(long, value_delimiter = ',')]
    actions: Option<Vec<String>>,
    #[arg(long)]
    close_label: Option<String>,
    /// Show a reply field with this placeholder.
    #[arg(long)]
    reply: Option<String>,
    /// URL opened on click.
    #[arg(long)]
    open: Option<String>,
    /// Extra `key=value` options passed through to the notifier.
    #[arg(long = "extra", value_name = "KEY=VALUE")]
    extra: Vec<String>,
}

impl SendArgs {
    fn into_request(self) -> NotificationRequest {
        let mut request = NotificationRequest {
            title: self.title,
            subtitle: self.subtitle,
            message: self.message,
            icon: self.icon,
            timeout: self.timeout,
            group: self.group,
            actions: self.actions,
            close_label: self.close_label,
            open: self.open,
            ..Default::default()
        };
        if let Some(sound) = self.sound {
            request.sound = Some(if sound == "default" {
                Sound::Toggle(true)
            } else {
                Sound::Named(sound)
            });
        }
        if self.wait {
            request.wait = Some(true);
        }
        if let Some(reply) = self.reply {
            request = request.reply(reply);
        }
        for pair in self.extra {
            match pair.split_once('=') {
                Some((key, value)) => request = request.extra(key, value),
                None => tracing::warn!(option = %pair, "Ignoring extra option without '='"),
            }
        }
        request
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let loader = cli.config.map_or_else(ConfigLoader::new, ConfigLoader::with_path);
    let config = match loader.load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load config");
            return ExitCode::FAILURE;
        }
    };

    let request = match cli.command {
        Commands::Send(args) => args.into_request(),
        Commands::List { group } => NotificationRequest::default().list(group),
        Commands::Remove { group } => NotificationRequest::default().remove(group),
        Commands::Demo => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            demo_request(&cwd)
        }
    };

    if cli.dry_run {
        let options = map_to_mac(&request);
        if let Err(e) = validate(&options) {
            tracing::error!(error = %e, "Invalid request");
            return ExitCode::FAILURE;
        }
        let args = compile(&options, &CompileSpec::default());
        display::print_dispatch(&config.program().display().to_string(), &args);
        return ExitCode::SUCCESS;
    }

    let notifier = Notifier::new(config);
    let mut events = notifier.subscribe();
    tracing::info!(program = %notifier.config().program().display(), "Sending notification");

    let completion = notifier.send(NotifyInput::Request(request)).await;
    display::print_completion(&completion);
    while let Ok(event) = events.try_recv() {
        display::print_event(&event);
    }

    if completion.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

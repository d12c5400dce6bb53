use std::io::Write as _;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use amparo::cli::{parse_args, CliArgs, CliCommand, USAGE};
use amparo::client::BackendClient;
use amparo::config::WidgetConfig;
use amparo::interpreter::RenderInstruction;
use amparo::models::{AlertLevel, Message, Role, UIComponent};
use amparo::widget::ChatWidget;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    let args = match parse_args(std::env::args()) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("amparo: {err}");
            eprint!("{USAGE}");
            std::process::exit(2);
        }
    };

    // Handle --version and --help before any initialization
    match args.command {
        CliCommand::Version => {
            println!("amparo {VERSION}");
            return Ok(());
        }
        CliCommand::Help => {
            print!("{USAGE}");
            return Ok(());
        }
        _ => {}
    }

    color_eyre::install()?;
    init_tracing();

    let mut config = WidgetConfig::from_env();
    if let Some(url) = &args.options.api_url {
        config = config.with_api_url(url.clone());
    }

    match args.command {
        CliCommand::Health => run_health(&config).await,
        CliCommand::Clear { ref session_id } => run_clear(&config, session_id).await,
        CliCommand::Chat => run_chat(config, &args).await,
        CliCommand::Version | CliCommand::Help => Ok(()),
    }
}

/// Logging goes to stderr so it never interleaves with the chat transcript
/// on stdout. Filter comes from `AMPARO_LOG`, defaulting to warnings only.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("AMPARO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_health(config: &WidgetConfig) -> Result<()> {
    let client = BackendClient::from_config(config);
    match client.health_check().await {
        Ok(true) => {
            println!("backend healthy: {}", client.base_url());
            Ok(())
        }
        Ok(false) => {
            println!("backend unhealthy: {}", client.base_url());
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("amparo: {}", err.user_message());
            std::process::exit(1);
        }
    }
}

async fn run_clear(config: &WidgetConfig, session_id: &str) -> Result<()> {
    let client = BackendClient::from_config(config);
    match client.clear_session(session_id).await {
        Ok(()) => {
            println!("session {session_id} cleared");
            Ok(())
        }
        Err(err) => {
            eprintln!("amparo: {}", err.user_message());
            std::process::exit(1);
        }
    }
}

async fn run_chat(config: WidgetConfig, args: &CliArgs) -> Result<()> {
    use tokio::io::{AsyncBufReadExt, BufReader};

    let mut widget = ChatWidget::new(config);

    println!("amparo {VERSION} - escribe tu consulta, /clear reinicia, /salir termina");
    if let Some(welcome) = widget.transcript().first() {
        print_message(welcome);
    }

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();

        match line.as_str() {
            "" => continue,
            "/salir" | "/quit" | "/exit" => break,
            "/clear" => {
                if let Err(err) = widget.clear_conversation().await {
                    eprintln!("amparo: {}", err.user_message());
                }
                if let Some(welcome) = widget.transcript().first() {
                    print_message(welcome);
                }
                continue;
            }
            _ => {}
        }

        if args.options.no_stream {
            match widget.send_message(&line).await {
                Ok(Some(reply)) => print_message(reply),
                Ok(None) => {}
                Err(err) => eprintln!("amparo: {}", err.user_message()),
            }
            continue;
        }

        let mut printed = 0usize;
        let result = widget
            .send_message_streaming(&line, |instruction| match instruction {
                RenderInstruction::AppendText(text) => {
                    // The instruction carries the whole accumulation; print
                    // only the suffix that is new since the last one.
                    if text.len() > printed {
                        print!("{}", &text[printed..]);
                        let _ = std::io::stdout().flush();
                        printed = text.len();
                    }
                }
                RenderInstruction::ReplaceWithStructured { content, components } => {
                    if printed > 0 {
                        println!();
                    }
                    if let Some(summary) = content {
                        println!("{summary}");
                    }
                    for component in components {
                        print_component(component);
                    }
                }
                RenderInstruction::Complete => {
                    if printed > 0 {
                        println!();
                    }
                }
                RenderInstruction::Error { message } => {
                    if printed > 0 {
                        println!();
                    }
                    println!("{message}");
                }
            })
            .await;
        if let Err(err) = result {
            eprintln!("amparo: {}", err.user_message());
        }

        if let Some(agent) = widget.active_agent() {
            if let Some(label) = agent.badge_label() {
                println!("[{label}]");
            }
        }
    }

    Ok(())
}

/// Print a finished transcript message with its agent badge.
fn print_message(message: &Message) {
    if message.role == Role::User {
        return;
    }
    if !message.display_text().is_empty() {
        println!("{}", message.display_text());
    }
    for component in &message.components {
        print_component(component);
    }
    if let Some(label) = message.agent.as_ref().and_then(|a| a.badge_label()) {
        println!("[{label}]");
    }
}

/// Plain-text rendering of a structured component for the terminal.
fn print_component(component: &UIComponent) {
    match component {
        UIComponent::Alert { title, content, alert_level } => {
            let level = match alert_level {
                AlertLevel::Info => "INFO",
                AlertLevel::Warning => "AVISO",
                AlertLevel::Success => "OK",
                AlertLevel::Error => "ERROR",
            };
            match title {
                Some(title) => println!("[{level}] {title}: {content}"),
                None => println!("[{level}] {content}"),
            }
        }
        UIComponent::ActionButton { .. } => {
            let label = component.title().unwrap_or_else(|| component.content());
            println!("  ({label}) -> \"{}\"", component.action_payload());
        }
        UIComponent::Card { title, content, data } => {
            if let Some(title) = title {
                println!("== {title} ==");
            }
            println!("{content}");
            if let Some(data) = data {
                if let Ok(pretty) = serde_json::to_string_pretty(data) {
                    println!("{pretty}");
                }
            }
        }
        UIComponent::Text { .. } | UIComponent::Chart { .. } => {
            if let Some(title) = component.title() {
                println!("{title}");
            }
            println!("{}", component.content());
        }
    }
}

use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use beacon::banner::{BannerInfo, print_banner, print_session_summary};
use beacon::binder::{Click, ClickTally, Page, on_ready};
use beacon::commands::{CommandRegistry, CommandResult, SessionInfo};
use beacon::config::{ClientConfig, ServerConfig};
use beacon::console::StdoutConsole;
use beacon::consts::{
    DEFAULT_BASE_URL, DEFAULT_LISTEN_ADDR, DEFAULT_STATIC_DIR, HELLO_SELECTOR, WAIT_SELECTOR,
    normalize_selector,
};
use beacon::server;
use beacon::transport::http::HttpTransport;

#[derive(Parser)]
#[command(name = "beacon", version, about = "Two buttons, two endpoints.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Base URL of the manage service
    #[arg(short, long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Client-side timeout for the #wait request, in milliseconds
    #[arg(long, global = true, default_value_t = 5000)]
    wait_timeout_ms: u64,
}

#[derive(Subcommand)]
enum Command {
    /// Run the manage service
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = DEFAULT_LISTEN_ADDR)]
        addr: SocketAddr,

        /// Directory served for paths outside /service
        #[arg(short, long, default_value = DEFAULT_STATIC_DIR)]
        static_dir: PathBuf,

        /// How long /service/manage/other/wait holds each request, in milliseconds
        #[arg(long, default_value_t = 3000)]
        wait_delay_ms: u64,
    },
    /// Click one control, wait for its request to settle, and exit
    Click {
        #[arg(value_enum)]
        control: Control,
    },
}

#[derive(Debug, Clone, ValueEnum)]
enum Control {
    Hello,
    Wait,
}

impl Control {
    fn selector(&self) -> &'static str {
        match self {
            Control::Hello => HELLO_SELECTOR,
            Control::Wait => WAIT_SELECTOR,
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let client = ClientConfig {
        base_url: cli.base_url.clone(),
        wait_timeout: Duration::from_millis(cli.wait_timeout_ms),
    };

    match cli.command {
        Some(Command::Serve {
            addr,
            static_dir,
            wait_delay_ms,
        }) => {
            init_tracing("info");
            let config = ServerConfig {
                addr,
                static_dir,
                wait_delay: Duration::from_millis(wait_delay_ms),
            };
            handle_serve(&config).await
        }
        Some(Command::Click { control }) => {
            init_tracing("warn");
            handle_click(&control, &client).await
        }
        None => {
            init_tracing("warn");
            run_console(&client).await
        }
    }
}

async fn handle_serve(config: &ServerConfig) -> anyhow::Result<()> {
    let address = config.addr.to_string();
    let detail = format!(
        "static {} · wait delay {} ms",
        config.static_dir.display(),
        config.wait_delay.as_millis()
    );
    print_banner(&BannerInfo {
        mode: "serve",
        address: &address,
        detail: &detail,
    });
    server::serve(config).await
}

async fn handle_click(control: &Control, config: &ClientConfig) -> anyhow::Result<()> {
    let transport = Arc::new(HttpTransport::new(&config.base_url)?);
    let mut page = Page::new();
    on_ready(&mut page, transport, Arc::new(StdoutConsole), config);

    if let Click::Issued(handle) = page.click(control.selector()) {
        tokio::select! {
            _ = handle.settled() => {}
            _ = tokio::signal::ctrl_c() => {
                println!("\ninterrupted");
            }
        }
    }
    Ok(())
}

async fn run_console(config: &ClientConfig) -> anyhow::Result<()> {
    let transport = Arc::new(HttpTransport::new(&config.base_url)?);
    let mut page = Page::new();
    let wait = on_ready(&mut page, transport, Arc::new(StdoutConsole), config);
    let controls = page.controls();
    let registry = CommandRegistry::new();
    let mut tally = ClickTally::default();

    let detail = format!("wait timeout {} ms", config.wait_timeout.as_millis());
    print_banner(&BannerInfo {
        mode: "console",
        address: &config.base_url,
        detail: &detail,
    });
    println!("type a control (hello, wait) to click it, /help for commands");

    // Async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\nbeacon> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let info = SessionInfo {
            base_url: &config.base_url,
            controls: &controls,
            tally,
            wait: Some(&*wait),
        };
        match registry.dispatch(input, &info).await {
            CommandResult::Quit => break,
            CommandResult::Handled => continue,
            CommandResult::NotACommand => {}
        }

        let selector = normalize_selector(input);
        let click = page.click(&selector);
        if let Click::Unbound = click {
            println!("nothing bound to {selector}; try /controls");
        }
        tally.record(&click);
    }

    print_session_summary(tally);
    Ok(())
}

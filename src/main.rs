use anyhow::Result;
use spectate::app::{SessionOptions, run_session};
use spectate::cli::{self, Mode};
use spectate::controller::Controller;
use spectate::player::HeadlessProvider;
use spectate::scheduler::TokioScheduler;
use spectate_control::ControlHub;
use tokio::io::BufReader;
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let runtime_options = match cli::process_cli() {
        cli::CliResult::Exit(code) => std::process::exit(code),
        cli::CliResult::Continue(options) => options,
    };
    // Routes log::info!() etc. to /tmp/spectate_debug.log, mirrored to stderr
    // when RUST_LOG is set. The config file's level applies once it is loaded.
    spectate::debug::init_log_bridge(runtime_options.log_level);

    if let Mode::Init { force } = runtime_options.mode {
        let path = runtime_options.write_config(force)?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = runtime_options.load_config()?;
    spectate::debug::apply_config_level(runtime_options.log_level, config.log_level);
    log::info!("Starting spectate {}", spectate::VERSION);

    let runtime = Runtime::new()?;
    let result = match &runtime_options.mode {
        Mode::Parse => cli::print_streams(&config),
        Mode::Init { .. } => Ok(()),
        Mode::Render => runtime.block_on(async {
            let (timer_tx, _timer_rx) = tokio::sync::mpsc::unbounded_channel();
            let mut controller = Controller::new(
                &config,
                HeadlessProvider::detached(),
                TokioScheduler::new(timer_tx),
            );
            controller.start();
            print!("{}", controller.render_html());
            controller.shutdown();
            Ok::<_, anyhow::Error>(())
        }),
        Mode::Run {
            html_out,
            exit_after,
            echo,
        } => {
            let options = SessionOptions {
                html_out: html_out.clone(),
                exit_after: *exit_after,
                echo_status: *echo,
            };
            runtime.block_on(async {
                let hub = ControlHub::new();
                let input = BufReader::new(tokio::io::stdin());
                let summary = run_session(&config, &hub, input, &options).await?;
                log::info!("Session ended after {} change(s)", summary.changes);
                Ok::<_, anyhow::Error>(())
            })
        }
    };

    runtime.shutdown_timeout(std::time::Duration::from_secs(2));
    if let Err(ref e) = result {
        eprintln!("spectate: error: {e:#}");
    }
    result
}

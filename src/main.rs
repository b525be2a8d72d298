mod app;
mod cli;
mod date;
mod dialogs;
mod error;
mod event;
mod logging;
mod operations;
mod storage;
mod theme;
mod ui;
mod ui_state;

use std::io;
use std::panic;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use ratatui::DefaultTerminal;
use tracing::error;

use app::App;
use cli::{Cli, Commands};
use error::Result;
use operations::tasks::{TaskService, ValidationPolicy};
use storage::config::{self, Config};

/// 启动 TUI 界面
fn run_tui(service: TaskService, config: Config, data_dir: &Path) -> Result<()> {
    // 初始化终端
    let mut terminal = ratatui::init();

    let mut app = App::new(service, config, data_dir.to_path_buf());

    // 运行主循环
    let result = run(&mut terminal, &mut app);

    // 恢复终端
    ratatui::restore();

    result.map_err(Into::into)
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::tasks::render(frame, app))?;

        if !event::handle_events(app)? {
            break;
        }
    }
    Ok(())
}

fn execute(cli: Cli) -> Result<()> {
    let data_dir = cli
        .data_dir
        .unwrap_or_else(storage::default_data_dir);
    logging::init(&data_dir);

    let config = config::load_config(&data_dir);
    let policy = ValidationPolicy::from(&config.tasks);
    let mut service = TaskService::open(&data_dir, policy)?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_tui(service, config, &data_dir),
        command => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            cli::tasks::execute(&command, &mut service, date::today(), &mut out)
        }
    }
}

fn main() -> ExitCode {
    // 在 panic 时恢复终端状态
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    // 解析命令行参数
    let cli = Cli::parse();

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

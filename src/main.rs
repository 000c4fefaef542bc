use clap::Parser;
use clap::error::ErrorKind;
use clip_splitter::component::ClipSplitter;
use clip_splitter::config::Config;
use clip_splitter::init;
use console::style;
use log::{error, info, warn};
use std::path::PathBuf;
use std::process::ExitCode;

/// 依照片段清單將一個長音訊檔切割為多個具名片段
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// 片段清單（第一行為標題，其餘每行為 `開始,結束,名稱`）
    #[arg(value_name = "CLIPFILE.txt")]
    manifest: PathBuf,

    /// 輸入音訊檔
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// 多餘的參數會被忽略
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    extra: Vec<String>,
}

fn main() -> ExitCode {
    init::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    if !cli.extra.is_empty() {
        warn!("忽略多餘的參數: {:?}", cli.extra);
    }

    let splitter = ClipSplitter::new(Config::new());
    match splitter.run(&cli.manifest, &cli.input) {
        Ok(report) => {
            println!(
                "{}",
                style(format!(
                    "完成: {} 個片段已輸出至 {}",
                    report.dispatch.completed,
                    report.output_dir.display()
                ))
                .green()
                .bold()
            );
            info!("程式正常結束");
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(&e),
    }
}

fn report_failure(e: &anyhow::Error) -> ExitCode {
    error!("{e:#}");
    eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
    ExitCode::FAILURE
}

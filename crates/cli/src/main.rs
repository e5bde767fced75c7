mod prompt;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use exiflist_core::{
    app_paths, choose_format, load_config, render, save_config, scan_directory, AppConfig,
    DecodeErrorPolicy, ExifTagReader, FixedSelector, FormatSelector, ListFormat, ScanOptions,
    ScanReport, WriteMode,
};
use prompt::PromptSelector;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "exiflist")]
#[command(about = "フォルダ内の写真のEXIF情報を一覧ファイルに書き出します")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    run: RunArgs,
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    List(ListArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    Init,
}

#[derive(Debug, Args)]
struct RunArgs {
    #[arg(long, default_value = ".")]
    dir: PathBuf,
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    #[arg(long, value_enum)]
    on_decode_error: Option<PolicyArg>,
    #[arg(long, default_value_t = false)]
    append: bool,
}

#[derive(Debug, Args)]
struct ListArgs {
    #[arg(long, default_value = ".")]
    dir: PathBuf,
    #[arg(long, value_enum)]
    on_decode_error: Option<PolicyArg>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Markdown,
    Text,
    Stop,
}

impl From<FormatArg> for ListFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Markdown => ListFormat::Markdown,
            FormatArg::Text => ListFormat::Text,
            FormatArg::Stop => ListFormat::Stop,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Skip,
    Stop,
}

impl From<PolicyArg> for DecodeErrorPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Skip => DecodeErrorPolicy::Skip,
            PolicyArg::Stop => DecodeErrorPolicy::Stop,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    match cli.command {
        None => cmd_run(cli.run),
        Some(Commands::List(args)) => cmd_list(args),
        Some(Commands::Config(config)) => match config.action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Init => cmd_config_init(),
        },
    }
}

fn cmd_run(args: RunArgs) -> Result<()> {
    let config = load_config()?;
    let report = scan(args.dir, args.on_decode_error, &config)?;
    println!("写真ファイル数: {}", report.photos.len());
    if report.photos.is_empty() {
        return Ok(());
    }

    let mut selector: Box<dyn FormatSelector> = match args.format {
        Some(format) => Box::new(FixedSelector::new(Some(format.into()))),
        None => Box::new(PromptSelector::new()),
    };
    let Some(format) = choose_format(selector.as_mut())? else {
        log::debug!("selection cancelled");
        return Ok(());
    };

    let mut options = config.render_options(args.out_dir);
    if args.append {
        options.write_mode = WriteMode::Append;
    }

    if let Some(path) = render(&report.photos, format, &options)? {
        println!("書き出し完了: {}", path.display());
    }
    Ok(())
}

fn cmd_list(args: ListArgs) -> Result<()> {
    let config = load_config()?;
    let report = scan(args.dir, args.on_decode_error, &config)?;

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            print_table(&report);
        }
    }
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let paths = app_paths()?;
    println!("設定ファイル: {}", paths.config_path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = save_config(&AppConfig::default())?;
    println!("既定の設定を書き込みました: {}", path.display());
    Ok(())
}

fn scan(
    dir: PathBuf,
    policy: Option<PolicyArg>,
    config: &AppConfig,
) -> Result<ScanReport> {
    let options = ScanOptions {
        dir,
        on_decode_error: policy.map(Into::into).unwrap_or(config.on_decode_error),
    };
    let report = scan_directory(&options, &ExifTagReader)?;

    for failure in &report.failures {
        println!("exif err: {}", failure.message);
    }
    if report.truncated {
        eprintln!("EXIF解析に失敗したため走査を中断しました。残りのファイルは未確認です。");
    }
    Ok(report)
}

fn print_table(report: &ScanReport) {
    println!("ファイル (形式) 撮影日時 / ボディ / レンズ / 焦点距離 / SS / F / ISO");
    for photo in &report.photos {
        println!(
            "{} ({}) {} / {} / {} / {}mm / {}sec / F{} / ISO {}",
            photo.name,
            photo.kind,
            photo
                .capture_date
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            photo.body_model,
            photo.lens_model,
            photo.focal_length,
            photo.shutter_speed,
            photo.aperture,
            photo.iso
        );
    }

    println!(
        "\n集計: scanned={} photos={} non_image_skip={} dir_skip={} unreadable={} exif_error={}",
        report.stats.scanned_entries,
        report.stats.photos,
        report.stats.skipped_non_image,
        report.stats.skipped_dirs,
        report.stats.unreadable,
        report.stats.decode_failures
    );
}

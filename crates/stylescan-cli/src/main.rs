use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use stylescan_core::{resolve_patterns, scan_and_write, ScanOptions, StyleConfig, DEFAULT_EXTENSIONS};
use tracing::info;

/// 命令行入口（基于 clap）
#[derive(Parser, Debug)]
#[command(name = "stylescan", version, about = "写作风格扫描：冗词、冗余表达与陈词滥调")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 扫描文件或目录，输出 JSON 数组
    Scan {
        /// 输入文件或目录（可多次指定）
        #[arg(long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// 输出文件（JSON 数组）；"-" 表示标准输出
        #[arg(long, default_value = "-")]
        output: String,

        /// 风格配置文件（TOML）；缺省时启用全部内置类别
        #[arg(long)]
        config: Option<PathBuf>,

        /// 线程数（"auto"=CPU 核心数）
        #[arg(long, default_value = "auto")]
        threads: String,

        /// 最大扫描文件大小（单位字节）
        #[arg(long)]
        max_file_size: Option<u64>,

        /// 遍历目录时纳入的扩展名，逗号分隔
        #[arg(long, value_delimiter = ',')]
        ext: Vec<String>,
    },

    /// 打印生效的模式列表（JSON）
    Patterns {
        /// 风格配置文件（TOML）
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { input, output, config, threads, max_file_size, ext } => {
            info!(?input, %output, "starting scan");

            let extensions = if ext.is_empty() {
                DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
            } else {
                ext
            };
            let opts = ScanOptions { config_path: config, max_file_size, threads: parse_threads(&threads), extensions };

            let mut out: Box<dyn Write> = if output == "-" {
                Box::new(BufWriter::new(io::stdout().lock()))
            } else {
                Box::new(BufWriter::new(File::create(&output).context("create output file")?))
            };
            let stats = scan_and_write(&input, &mut out, &opts).context("scan and write failed")?;
            writeln!(out)?;
            out.flush().context("flush output")?;

            info!(
                files_scanned = stats.files_scanned,
                files_skipped = stats.files_skipped,
                matches_written = stats.matches_written,
                "scan finished"
            );
        }
        Commands::Patterns { config } => {
            let config = match config {
                Some(path) => StyleConfig::load(&path).with_context(|| format!("load style config {}", path.display()))?,
                None => StyleConfig::default(),
            };
            let patterns = resolve_patterns(&config);
            let stdout = io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &patterns)?;
            writeln!(out)?;
            info!(patterns = patterns.len(), "listed patterns");
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写入 stderr，避免与 stdout 上的 JSON 混在一起
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(env_filter).with_writer(io::stderr).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析线程参数
fn parse_threads(s: &str) -> Option<usize> {
    if s.eq_ignore_ascii_case("auto") { return None; }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n),
        _ => None,
    }
}

//! 扫描主流程与并行调度
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::findings::{findings_for_file, Finding};
use crate::matcher::Matcher;
use crate::options::{ScanOptions, ScanStats};
use crate::rules::{resolve_patterns, StyleConfig};

/// 按选项加载风格配置并编译匹配器
pub fn load_matcher(opts: &ScanOptions) -> Result<Matcher> {
    let config = match &opts.config_path {
        Some(path) => StyleConfig::load(path).with_context(|| format!("load style config {}", path.display()))?,
        None => StyleConfig::default(),
    };
    let patterns = resolve_patterns(&config);
    Matcher::new(patterns).context("compile style patterns")
}

/// 扫描输入路径并将结果以 JSON 数组流式写入 `out`
/// 稳定性保证：
/// - 文件级：先收集文件并按路径排序，确保输出顺序可复现
/// - 文件内：命中项按 (start 升序, end 升序, 模式下标升序) 排序
pub fn scan_and_write(inputs: &[PathBuf], out: &mut dyn Write, opts: &ScanOptions) -> Result<ScanStats> {
    let matcher = Arc::new(load_matcher(opts)?);
    let files = collect_files(inputs, &opts.extensions);
    debug!(files = files.len(), patterns = matcher.pattern_count(), "collected input files");

    let mut stats = ScanStats::default();
    let threads = opts.threads.unwrap_or_else(num_cpus::get);

    if threads > 1 && files.len() > 1 {
        scan_and_write_parallel(&files, out, opts, &matcher, &mut stats, threads)?;
        return Ok(stats);
    }

    // 串行路径
    write!(out, "[")?;
    let mut first = true;
    for path in &files {
        match scan_file(path, &matcher, opts.max_file_size) {
            Some(findings) => {
                stats.files_scanned += 1;
                write_findings(out, &findings, &mut first, &mut stats)?;
            }
            None => stats.files_skipped += 1,
        }
    }
    write!(out, "]")?;
    Ok(stats)
}

/// 收集待扫描文件：
/// - 显式给出的文件原样保留；
/// - 目录递归遍历，仅保留扩展名匹配的文件；
/// - 结果排序去重。
pub fn collect_files(inputs: &[PathBuf], extensions: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
            continue;
        }
        for entry in WalkDir::new(input).min_depth(1) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => { warn!(error = %e, "skipping unreadable entry"); continue; }
            };
            if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    files
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else { return false };
    extensions.iter().any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

/// 扫描单个文件；跳过（超限/读取失败）时返回 None
fn scan_file(path: &Path, matcher: &Matcher, max_file_size: Option<u64>) -> Option<Vec<Finding>> {
    if let Some(max) = max_file_size {
        if let Ok(md) = std::fs::metadata(path) { if md.len() > max { return None; } }
    }
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read file");
            return None;
        }
    };
    // 非 UTF-8 字节做有损替换，偏移以替换后的文本为准
    let text = String::from_utf8_lossy(&bytes);
    let matches = matcher.scan(&text);
    Some(findings_for_file(&path.display().to_string(), &text, matches))
}

fn write_findings(out: &mut dyn Write, findings: &[Finding], first: &mut bool, stats: &mut ScanStats) -> Result<()> {
    for f in findings {
        stats.matches_written += 1;
        if !*first { write!(out, ",")?; } else { *first = false; }
        serde_json::to_writer(&mut *out, &f.output())?;
    }
    Ok(())
}

/// 并行调度：
/// - 使用 Rayon 线程池并行扫描，匹配器只读共享
/// - 单线程 Writer 按 idx 重排并流式写 JSON，保证稳定顺序
fn scan_and_write_parallel(
    files: &[PathBuf],
    out: &mut dyn Write,
    opts: &ScanOptions,
    matcher: &Arc<Matcher>,
    stats: &mut ScanStats,
    threads: usize,
) -> Result<()> {
    use crossbeam_channel as channel;
    use rayon::prelude::*;
    use std::collections::BTreeMap;

    write!(out, "[")?;
    let mut first = true;

    // 通道用于 worker → writer 传递结果；None 表示该文件被跳过
    type Msg = (usize /*idx*/, Option<Vec<Finding>>);
    let (tx, rx) = channel::bounded::<Msg>(256);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("build rayon pool")?;

    // Writer 保持在当前线程；扫描在后台线程内的线程池执行
    let matcher = Arc::clone(matcher);
    let max_file_size = opts.max_file_size;
    let files_vec: Vec<PathBuf> = files.to_vec();
    let scan_thread = std::thread::spawn(move || {
        pool.install(|| {
            files_vec.par_iter().enumerate().for_each(|(idx, path)| {
                let _ = tx.send((idx, scan_file(path, &matcher, max_file_size)));
            });
        });
        // 结束后 Sender 被丢弃，Receiver 将收到关闭信号
    });

    let mut next_idx: usize = 0;
    let mut buffer: BTreeMap<usize, Option<Vec<Finding>>> = BTreeMap::new();

    while let Ok((idx, res)) = rx.recv() {
        buffer.insert(idx, res);
        // 从 next_idx 开始顺序冲刷
        while let Some(res) = buffer.remove(&next_idx) {
            match res {
                Some(findings) => {
                    stats.files_scanned += 1;
                    write_findings(out, &findings, &mut first, stats)?;
                }
                None => stats.files_skipped += 1,
            }
            next_idx += 1;
        }
    }

    if scan_thread.join().is_err() {
        anyhow::bail!("scan worker panicked");
    }

    write!(out, "]")?;
    Ok(())
}

//! Move log - one move per line, newline terminated
//!
//! Level 4 - File utilities

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use trax_core::Move;

/// Default log file name, stamped with local time
pub fn default_log_path() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d%H%M%S");
    PathBuf::from(format!("record_{}.trx", stamp))
}

/// Log path for one game of a series: `name_<n>.ext` when there are several
pub fn numbered_path(base: &Path, game_number: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return base.to_path_buf();
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("record");
    let name = match base.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, game_number, ext),
        None => format!("{}_{}", stem, game_number),
    };
    base.with_file_name(name)
}

/// Append-only move log, flushed after every move
pub struct MoveLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl MoveLog {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create move log: {}", path.display()))?;
        tracing::info!("Recording moves to {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn append(&mut self, mv: Move) -> Result<()> {
        writeln!(self.writer, "{}", mv)
            .and_then(|_| self.writer.flush())
            .with_context(|| format!("Failed to write move log: {}", self.path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read a move log, skipping blank lines
pub fn read_moves(path: &Path) -> Result<Vec<Move>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open move log: {}", path.display()))?;

    let mut moves = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let mv = line
            .parse::<Move>()
            .with_context(|| format!("{}:{}: bad move {:?}", path.display(), i + 1, line))?;
        moves.push(mv);
    }
    Ok(moves)
}

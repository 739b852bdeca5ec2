//! # Result Sink
//!
//! Drains the result channel of a [`WorkerPool`](crate::pool::WorkerPool).
//! Every match is persisted once through a [`MatchSink`] and announced once
//! through the log.
//!
//! A failing sink is logged and counted but never stops the drain: workers are
//! decoupled from the sink by the channel and keep searching regardless.

use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::Path;

use crossbeam_channel::Receiver;
use ipbrute_common::{debug, error, success};

use crate::search::Match;

/// Where matches are persisted.
pub trait MatchSink {
    fn record(&mut self, m: &Match) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes one `<hex-hash>=<dotted-decimal>` line per match.
pub struct LineSink<W: Write> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl LineSink<LineWriter<File>> {
    /// Opens `path` for appending, creating it if needed. Lines are flushed as
    /// they are written, so an interrupted run keeps every match it reported.
    pub fn append(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(LineWriter::new(file)))
    }
}

impl<W: Write> MatchSink for LineSink<W> {
    fn record(&mut self, m: &Match) -> io::Result<()> {
        writeln!(self.writer, "{m}")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl MatchSink for Vec<Match> {
    fn record(&mut self, m: &Match) -> io::Result<()> {
        self.push(m.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainSummary {
    /// Matches received from the channel.
    pub matches: u64,
    /// Matches the sink failed to persist.
    pub failed: u64,
}

/// Consumes matches until every worker has exited and the channel is empty.
pub fn drain<S>(results: Receiver<Match>, sink: &mut S) -> DrainSummary
where
    S: MatchSink + ?Sized,
{
    let mut summary = DrainSummary::default();

    for m in results.iter() {
        summary.matches += 1;
        success!("match found! {} = {}", m.hash, m.addr);

        debug!("writing {m}");
        if let Err(e) = sink.record(&m) {
            summary.failed += 1;
            error!("failed to persist {m}: {e}");
        }
    }

    if let Err(e) = sink.flush() {
        error!("failed to flush matches: {e}");
    }

    summary
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn sample(last: u8) -> Match {
        let addr = Ipv4Addr::new(10, 0, 0, last);
        Match {
            hash: crate::digest::md5_hex(addr),
            addr,
        }
    }

    /// Fails every other write.
    struct FlakySink {
        calls: usize,
        written: Vec<Match>,
    }

    impl MatchSink for FlakySink {
        fn record(&mut self, m: &Match) -> io::Result<()> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                return Err(io::Error::other("disk full"));
            }
            self.written.push(m.clone());
            Ok(())
        }
    }

    #[test]
    fn test_line_sink_format() {
        let mut sink = LineSink::new(Vec::new());
        sink.record(&sample(1)).unwrap();
        sink.record(&sample(2)).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            format!("{}=10.0.0.1\n{}=10.0.0.2\n", sample(1).hash, sample(2).hash)
        );
    }

    #[test]
    fn test_drain_until_disconnected() {
        let (tx, rx) = crossbeam_channel::unbounded();
        for last in 1..=3 {
            tx.send(sample(last)).unwrap();
        }
        drop(tx);

        let mut sink: Vec<Match> = Vec::new();
        let summary = drain(rx, &mut sink);

        assert_eq!(summary, DrainSummary { matches: 3, failed: 0 });
        assert_eq!(sink, vec![sample(1), sample(2), sample(3)]);
    }

    #[test]
    fn test_drain_empty_channel() {
        let (tx, rx) = crossbeam_channel::unbounded::<Match>();
        drop(tx);

        let mut sink: Vec<Match> = Vec::new();
        assert_eq!(drain(rx, &mut sink), DrainSummary::default());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_drain_continues_after_write_failure() {
        let (tx, rx) = crossbeam_channel::unbounded();
        for last in 1..=4 {
            tx.send(sample(last)).unwrap();
        }
        drop(tx);

        let mut sink = FlakySink {
            calls: 0,
            written: Vec::new(),
        };
        let summary = drain(rx, &mut sink);

        assert_eq!(summary, DrainSummary { matches: 4, failed: 2 });
        assert_eq!(sink.written, vec![sample(1), sample(3)]);
    }

    #[test]
    fn test_append_sink_keeps_existing_lines() {
        let path = std::env::temp_dir().join(format!("ipbrute-sink-{}.txt", std::process::id()));
        std::fs::write(&path, "existing=0.0.0.0\n").unwrap();

        let mut sink = LineSink::append(&path).unwrap();
        sink.record(&sample(7)).unwrap();
        drop(sink);

        let contents = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(contents, format!("existing=0.0.0.0\n{}=10.0.0.7\n", sample(7).hash));
    }
}

#![allow(dead_code)]

use std::{fs, io::Write, path::Path};

use fastline::{LineReader, ReaderOptions, StrategyKind};
use flate2::{Compression, write::GzEncoder};
use tempfile::TempDir;

pub const POINTS: &str = "\
sys.cpu.user 1356998400 42.5 host=web01 cpu=0
sys.cpu.user 1356998401 43 host=web01 cpu=0
sys.cpu.nice 1356998400 0 host=web02
sys.mem.free 1356998400 -12 host=web02 dc=lga
";

/// Owns a temporary directory holding the fixtures of one test.
pub struct Fixtures {
    dir: TempDir,
}

impl Fixtures {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn write(&self, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn write_gz(&self, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = self.dir.path().join(name);
        let mut encoder = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
        encoder.write_all(contents).unwrap();
        encoder.finish().unwrap();
        path
    }
}

pub fn open(kind: StrategyKind, options: ReaderOptions, path: &Path) -> Box<dyn LineReader> {
    let mut reader = kind.build(options);
    reader.open(path).unwrap();
    reader
}

/// Every line as owned field strings.
pub fn read_all(reader: &mut dyn LineReader) -> Vec<Vec<String>> {
    let mut lines = Vec::new();
    while reader.next_line().unwrap() {
        lines.push(
            (0..reader.field_count())
                .map(|i| reader.string_field(i).unwrap().into_owned())
                .collect(),
        );
    }
    lines
}

pub fn split_str(input: &str) -> Vec<Vec<String>> {
    input
        .lines()
        .map(|line| line.split(' ').map(str::to_owned).collect())
        .collect()
}

//! Point import on top of any [`LineReader`].
//!
//! Each line is one point: `metric timestamp value [tag=value ...]`. A point
//! that fails validation aborts the run; the error carries the line number
//! and the number of points already imported so the input can be located.

use std::{
    borrow::Cow,
    collections::HashMap,
    fmt,
    ops::AddAssign,
    path::Path,
    time::{Duration, Instant},
};

use crate::{
    error::{ImportError, ImportErrorKind},
    options::{ImportOptions, ReaderOptions},
    strategy::{LineReader, StrategyKind},
    tags::parse_tag,
};

/// One validated data point, borrowed from the reader's current line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point<'a> {
    pub metric: Cow<'a, str>,
    pub timestamp: i64,
    pub value: Cow<'a, str>,
    pub tags: &'a HashMap<String, String>,
}

/// Counters for one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Points imported.
    pub points: u64,
    /// Fields read across all points.
    pub words: u64,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

impl ImportStats {
    /// Import rate, `0.0` if no time has elapsed.
    #[must_use]
    pub fn points_per_sec(&self) -> f64 {
        rate(self.points, self.elapsed)
    }
}

#[allow(clippy::cast_precision_loss)]
fn rate(points: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 { points as f64 / secs } else { 0.0 }
}

impl fmt::Display for ImportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Average speed: {} data points in {:.3}s ({:.1} points/s)",
            self.points,
            self.elapsed.as_secs_f64(),
            self.points_per_sec()
        )
    }
}

impl AddAssign for ImportStats {
    fn add_assign(&mut self, rhs: Self) {
        self.points += rhs.points;
        self.words += rhs.words;
        self.elapsed += rhs.elapsed;
    }
}

/// Imports every line of an opened reader.
///
/// # Errors
///
/// The first read failure or invalid point, see [`ImportErrorKind`].
pub fn import(
    reader: &mut dyn LineReader,
    options: &ImportOptions,
) -> Result<ImportStats, ImportError> {
    import_with(reader, options, |_| {})
}

/// Imports every line of an opened reader, handing each point to `sink`.
///
/// # Errors
///
/// Same as [`import`].
pub fn import_with<F>(
    reader: &mut dyn LineReader,
    options: &ImportOptions,
    mut sink: F,
) -> Result<ImportStats, ImportError>
where
    F: FnMut(&Point<'_>),
{
    let start = Instant::now();
    let mut stats = ImportStats::default();
    let mut tags = HashMap::new();
    let mut line = 0;

    loop {
        line += 1;
        let fail = |kind: ImportErrorKind, points| ImportError { kind, line, points };

        if !reader.next_line().map_err(|e| fail(e.into(), stats.points))? {
            break;
        }

        tags.clear();
        let (metric, timestamp, value) =
            read_point(&*reader, &mut tags).map_err(|kind| fail(kind, stats.points))?;
        sink(&Point {
            metric,
            timestamp,
            value,
            tags: &tags,
        });

        stats.points += 1;
        stats.words += reader.field_count() as u64;
        if options.progress_interval != 0 && stats.points % options.progress_interval == 0 {
            let elapsed = start.elapsed();
            log::info!(
                "{} data points in {:.3}s ({:.1} points/s)",
                stats.points,
                elapsed.as_secs_f64(),
                rate(stats.points, elapsed)
            );
        }
    }

    stats.elapsed = start.elapsed();
    Ok(stats)
}

fn read_point<'r>(
    reader: &'r dyn LineReader,
    tags: &mut HashMap<String, String>,
) -> Result<(Cow<'r, str>, i64, Cow<'r, str>), ImportErrorKind> {
    let count = reader.field_count();
    if count < 3 {
        return Err(ImportErrorKind::MissingFields { found: count });
    }

    let metric = reader.string_field(0)?;
    if metric.is_empty() {
        return Err(ImportErrorKind::InvalidMetric);
    }
    let timestamp = reader.integer_field(1)?;
    if timestamp <= 0 {
        return Err(ImportErrorKind::InvalidTimestamp(timestamp));
    }
    let value = reader.string_field(2)?;
    if value.is_empty() {
        return Err(ImportErrorKind::InvalidValue);
    }
    for i in 3..count {
        parse_tag(tags, &reader.string_field(i)?)?;
    }
    Ok((metric, timestamp, value))
}

/// Opens `path` with the chosen strategy and imports it.
///
/// # Errors
///
/// Opening failures are reported at line 0; everything else as in
/// [`import`].
pub fn import_file(
    kind: StrategyKind,
    path: &Path,
    reader_options: ReaderOptions,
    options: &ImportOptions,
) -> Result<ImportStats, ImportError> {
    let mut reader = kind.build(reader_options);
    log::debug!("importing {} with the {} reader", path.display(), reader.name());

    let result = reader
        .open(path)
        .map_err(|e| ImportError {
            kind: e.into(),
            line: 0,
            points: 0,
        })
        .and_then(|()| import(reader.as_mut(), options));

    if let Err(err) = &result {
        log::error!("error while processing {}: {err}", path.display());
    }
    result
}

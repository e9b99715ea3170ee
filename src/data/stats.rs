use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::model::UnemploymentRecord;

/// Bin count of the distribution histogram.
pub const HISTOGRAM_BINS: usize = 10;

/// Sample positions of the density overlay.
pub const KDE_POINTS: usize = 200;

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Mean / max / min of the rate column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub count: usize,
}

impl Summary {
    pub fn mean_label(&self) -> String {
        format_percent(self.mean)
    }

    pub fn max_label(&self) -> String {
        format_percent(self.max)
    }

    pub fn min_label(&self) -> String {
        format_percent(self.min)
    }
}

/// Format a rate as a two-decimal percentage, e.g. `5.00%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Summarise a set of rates; `None` when there is nothing to summarise.
pub fn summarize<I>(rates: I) -> Option<Summary>
where
    I: IntoIterator<Item = f64>,
{
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    for r in rates {
        count += 1;
        sum += r;
        max = max.max(r);
        min = min.min(r);
    }
    if count == 0 {
        return None;
    }
    Some(Summary {
        mean: sum / count as f64,
        max,
        min,
        count,
    })
}

// ---------------------------------------------------------------------------
// Trend line
// ---------------------------------------------------------------------------

/// One point of the rate-over-time line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// Mean rate of every record observed on `date`.
    pub rate: f64,
}

/// Collapse records to one point per date, ordered by date.
pub fn trend<'a, I>(records: I) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a UnemploymentRecord>,
{
    let mut by_date: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for rec in records {
        let slot = by_date.entry(rec.date).or_insert((0.0, 0));
        slot.0 += rec.rate;
        slot.1 += 1;
    }
    by_date
        .into_iter()
        .map(|(date, (sum, n))| TrendPoint {
            date,
            rate: sum / n as f64,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width histogram of the rate column.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Left edge of the first bin.
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Centre of bin `i`.
    pub fn bin_center(&self, i: usize) -> f64 {
        self.start + (i as f64 + 0.5) * self.bin_width
    }

    /// Total number of values counted.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bin `rates` into `bins` equal-width bins spanning `[min, max]`.
///
/// The last bin is closed on the right. When every value is equal the
/// range widens to `[v - 0.5, v + 0.5]`.
pub fn histogram(rates: &[f64], bins: usize) -> Option<Histogram> {
    if bins == 0 {
        return None;
    }
    let summary = summarize(rates.iter().copied())?;
    let (mut lo, mut hi) = (summary.min, summary.max);
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }
    let bin_width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &r in rates {
        let idx = (((r - lo) / bin_width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Some(Histogram {
        start: lo,
        bin_width,
        counts,
    })
}

// ---------------------------------------------------------------------------
// Kernel density
// ---------------------------------------------------------------------------

/// Scott's rule bandwidth: sample standard deviation times `n^(-1/5)`.
pub fn scott_bandwidth(rates: &[f64]) -> Option<f64> {
    let n = rates.len();
    if n < 2 {
        return None;
    }
    let mean = rates.iter().sum::<f64>() / n as f64;
    let var = rates.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let bw = var.sqrt() * (n as f64).powf(-0.2);
    (bw > 0.0).then_some(bw)
}

/// Gaussian kernel density of `rates` sampled at `points` evenly spaced
/// positions over `[min, max]`. Returns `[x, density]` pairs.
pub fn kde(rates: &[f64], points: usize) -> Option<Vec<[f64; 2]>> {
    let bw = scott_bandwidth(rates)?;
    let summary = summarize(rates.iter().copied())?;
    if points < 2 {
        return None;
    }

    let n = rates.len() as f64;
    let norm = 1.0 / (n * bw * (2.0 * std::f64::consts::PI).sqrt());
    let step = (summary.max - summary.min) / (points - 1) as f64;

    let curve = (0..points)
        .map(|i| {
            let x = summary.min + i as f64 * step;
            let density: f64 = rates
                .iter()
                .map(|&r| {
                    let z = (x - r) / bw;
                    (-0.5 * z * z).exp()
                })
                .sum();
            [x, density * norm]
        })
        .collect();
    Some(curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(d: u32, rate: f64) -> UnemploymentRecord {
        UnemploymentRecord {
            date: NaiveDate::from_ymd_opt(2020, 1, d).unwrap(),
            region: "North".into(),
            rate,
            extra: Vec::new(),
        }
    }

    #[test]
    fn summary_of_known_fixture() {
        let s = summarize([3.0, 5.0, 7.0]).unwrap();
        assert_eq!(s.mean_label(), "5.00%");
        assert_eq!(s.max_label(), "7.00%");
        assert_eq!(s.min_label(), "3.00%");
        assert_eq!(s.count, 3);
    }

    #[test]
    fn summary_of_nothing_is_none() {
        assert_eq!(summarize(Vec::<f64>::new()), None);
        assert!(histogram(&[], HISTOGRAM_BINS).is_none());
        assert!(kde(&[], KDE_POINTS).is_none());
    }

    #[test]
    fn percent_rounds_to_two_decimals() {
        assert_eq!(format_percent(5.456), "5.46%");
        assert_eq!(format_percent(0.0), "0.00%");
    }

    #[test]
    fn trend_is_date_ordered_and_averaged() {
        let records = [rec(20, 4.0), rec(5, 1.0), rec(20, 6.0), rec(10, 2.0)];
        let points = trend(&records);
        let dates: Vec<u32> = points.iter().map(|p| chrono::Datelike::day(&p.date)).collect();
        assert_eq!(dates, vec![5, 10, 20]);
        assert_eq!(points[2].rate, 5.0);
    }

    #[test]
    fn histogram_counts_every_value() {
        let rates = [1.0, 2.0, 2.5, 3.0, 10.0];
        let h = histogram(&rates, 3).unwrap();
        assert_eq!(h.start, 1.0);
        assert_eq!(h.bin_width, 3.0);
        assert_eq!(h.counts, vec![4, 0, 1]);
        assert_eq!(h.total(), rates.len());
        assert_eq!(h.bin_center(0), 2.5);
    }

    #[test]
    fn histogram_of_constant_values_widens_range() {
        let h = histogram(&[4.0, 4.0], 10).unwrap();
        assert_eq!(h.start, 3.5);
        assert!((h.bin_width - 0.1).abs() < 1e-12);
        assert_eq!(h.total(), 2);
        assert_eq!(h.counts[5], 2);
    }

    #[test]
    fn kde_needs_spread() {
        assert!(kde(&[5.0], KDE_POINTS).is_none());
        assert!(kde(&[5.0, 5.0, 5.0], KDE_POINTS).is_none());
    }

    #[test]
    fn kde_spans_data_and_peaks_in_the_middle() {
        let rates = [1.0, 2.0, 3.0, 4.0, 5.0];
        let curve = kde(&rates, 101).unwrap();
        assert_eq!(curve.len(), 101);
        assert_eq!(curve[0][0], 1.0);
        assert!((curve[100][0] - 5.0).abs() < 1e-9);
        let mid = curve[50][1];
        assert!(curve.iter().all(|p| p[1] > 0.0 && p[1] <= mid + 1e-12));
    }
}

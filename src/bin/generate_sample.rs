use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const ARCHIVE: &str = "archive (3).zip";
const ENTRY: &str = "Unemployment_Rate_upto_11_2020.csv";

/// Minimal deterministic PRNG (xoshiro256**); a fixed seed keeps the sample
/// archive identical across runs without pulling in `rand`.
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Last day of `month` in `year`.
fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // (region, baseline rate, lockdown spike)
    let regions = [
        ("Andhra Pradesh", 5.5, 14.0),
        ("Bihar", 10.0, 36.0),
        ("Kerala", 7.5, 20.0),
        ("Punjab", 9.0, 16.0),
        ("Tamil Nadu", 2.0, 45.0),
    ];

    // May 2019 .. November 2020
    let months: Vec<NaiveDate> = (0..19)
        .filter_map(|i| {
            let m0 = 4 + i; // zero-based month index starting at May 2019
            month_end(2019 + m0 / 12, (m0 % 12 + 1) as u32)
        })
        .collect();

    let mut csv = csv::Writer::from_writer(Vec::new());
    csv.write_record([
        "Region",
        " Date",
        " Frequency",
        " Estimated Unemployment Rate (%)",
        " Area",
    ])
    .context("writing header")?;

    let mut rows = 0usize;
    for &(region, base, spike) in &regions {
        for date in &months {
            // April/May 2020 lockdown
            let lockdown = date.year() == 2020 && (date.month() == 4 || date.month() == 5);
            let level = if lockdown { spike } else { base };
            let rate = (level + rng.gauss(0.0, 1.2)).max(0.0);

            csv.write_record([
                region.to_string(),
                format!(" {}", date.format("%d-%m-%Y")),
                " Monthly".to_string(),
                format!(" {rate:.2}"),
                " Rural".to_string(),
            ])
            .with_context(|| format!("writing row for {region}"))?;
            rows += 1;
        }
    }

    // Rows the loader is expected to drop.
    for bad in [
        ["Bihar", "2020/12/31", "Monthly", "8.1", "Rural"],
        ["Kerala", "31-12-2020", "Monthly", "N/A", "Rural"],
        ["Punjab", "", "Monthly", "", "Rural"],
    ] {
        csv.write_record(bad).context("writing invalid row")?;
        rows += 1;
    }

    let bytes = csv
        .into_inner()
        .map_err(|e| e.into_error())
        .context("flushing CSV")?;

    let file = File::create(ARCHIVE).with_context(|| format!("creating {ARCHIVE}"))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(ENTRY, options)
        .with_context(|| format!("adding {ENTRY}"))?;
    zip.write_all(&bytes).context("writing archive entry")?;
    zip.finish().context("finalising archive")?;

    println!("Wrote {rows} rows ({} regions) to {ARCHIVE}/{ENTRY}", regions.len());
    Ok(())
}

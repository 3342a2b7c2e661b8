//! Writes a synthetic `games.csv` shaped like the public video game sales
//! dataset: float-formatted years, `tbd` user scores, blank cells and
//! pre-2000 releases included, so the dashboard's cleaning has work to do.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Platform with the years it received releases.
const PLATFORMS: &[(&str, i32, i32)] = &[
    ("PS", 1995, 2003),
    ("N64", 1996, 2002),
    ("PS2", 2000, 2011),
    ("XB", 2001, 2008),
    ("GC", 2001, 2007),
    ("GBA", 2001, 2007),
    ("PC", 1996, 2016),
    ("DS", 2004, 2013),
    ("PSP", 2005, 2014),
    ("X360", 2005, 2016),
    ("Wii", 2006, 2016),
    ("PS3", 2006, 2016),
    ("3DS", 2011, 2016),
    ("PSV", 2011, 2016),
    ("WiiU", 2012, 2016),
    ("PS4", 2013, 2016),
    ("XOne", 2013, 2016),
];

const GENRES: &[&str] = &[
    "Action",
    "Sports",
    "Shooter",
    "Racing",
    "Role-Playing",
    "Platform",
    "Misc",
    "Fighting",
    "Simulation",
    "Puzzle",
    "Adventure",
    "Strategy",
];

/// Ratings with relative weights.
const RATINGS: &[(&str, u32)] = &[("E", 40), ("T", 30), ("M", 18), ("E10+", 10), ("RP", 1), ("AO", 1)];

const PUBLISHERS: &[&str] = &[
    "Nintendo",
    "Electronic Arts",
    "Activision",
    "Ubisoft",
    "Sony Computer Entertainment",
    "Take-Two Interactive",
    "THQ",
    "Sega",
    "Namco Bandai Games",
    "Capcom",
];

const TITLE_HEADS: &[&str] = &[
    "Shadow", "Crystal", "Iron", "Neon", "Galactic", "Turbo", "Ancient", "Frozen", "Crimson",
    "Silent", "Royal", "Hyper",
];

const TITLE_TAILS: &[&str] = &[
    "Legends", "Rally", "Quest", "Tactics", "Strike", "Odyssey", "Arena", "Chronicles", "Kart",
    "Knights", "Frontier", "Heroes",
];

/// Generate a synthetic games dataset.
#[derive(Debug, Parser)]
#[command(name = "generate_sample", about)]
struct Args {
    /// Output file
    #[arg(default_value = "games.csv")]
    output: PathBuf,

    /// Number of title releases to generate (multi-platform titles add rows)
    #[arg(long, default_value_t = 2500)]
    titles: usize,

    /// Seed for the deterministic generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
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

    /// Uniform index in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n.max(1)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn weighted<'a>(&mut self, items: &'a [(&'a str, u32)]) -> &'a str {
        let total: u32 = items.iter().map(|(_, w)| w).sum();
        let mut roll = self.below(total as usize) as u32;
        for (item, weight) in items {
            if roll < *weight {
                return item;
            }
            roll -= weight;
        }
        items[0].0
    }
}

/// Blank out a cell now and then, like the real dataset does.
fn maybe_blank(rng: &mut SimpleRng, value: String, p: f64) -> String {
    if rng.chance(p) {
        String::new()
    } else {
        value
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record([
        "Name",
        "Platform",
        "Year_of_Release",
        "Genre",
        "Publisher",
        "Global_Sales",
        "Critic_Score",
        "User_Score",
        "Rating",
    ])?;

    let mut rows = 0usize;
    for i in 0..args.titles {
        let name = format!(
            "{} {} {}",
            rng.pick(TITLE_HEADS),
            rng.pick(TITLE_TAILS),
            i % 7 + 1
        );
        let genre = *rng.pick(GENRES);
        let rating = rng.weighted(RATINGS);
        let publisher = *rng.pick(PUBLISHERS);
        let quality = rng.gauss(70.0, 12.0).clamp(15.0, 98.0);

        // Multi-platform titles share a name within one year.
        let (first_platform, from, till) = *rng.pick(PLATFORMS);
        let year = from + rng.below((till - from + 1) as usize) as i32;
        let ports = if rng.chance(0.25) { 1 + rng.below(2) } else { 0 };
        let mut platforms = vec![first_platform];
        for _ in 0..ports {
            let (p, from, till) = *rng.pick(PLATFORMS);
            if (from..=till).contains(&year) && !platforms.contains(&p) {
                platforms.push(p);
            }
        }

        for platform in platforms {
            let critic = (quality + rng.gauss(0.0, 4.0)).clamp(10.0, 99.0).round();
            let user = if rng.chance(0.05) {
                "tbd".to_owned()
            } else {
                format!("{:.1}", ((critic / 10.0) + rng.gauss(0.0, 0.8)).clamp(0.5, 9.7))
            };
            let sales = (rng.gauss(0.6, 0.5).abs() * (quality / 70.0)).max(0.01);

            writer.write_record([
                name.clone(),
                platform.to_owned(),
                maybe_blank(&mut rng, format!("{year}.0"), 0.02),
                genre.to_owned(),
                publisher.to_owned(),
                format!("{sales:.2}"),
                maybe_blank(&mut rng, format!("{critic:.1}"), 0.2),
                maybe_blank(&mut rng, user, 0.15),
                maybe_blank(&mut rng, rating.to_owned(), 0.1),
            ])?;
            rows += 1;
        }
    }
    writer.flush()?;

    println!(
        "Wrote {rows} rows ({} titles) to {}",
        args.titles,
        args.output.display()
    );
    Ok(())
}

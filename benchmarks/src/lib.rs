//! Benchmark fixtures for salary-estimator.
//!
//! Generates reproducible synthetic job listings whose salary depends on
//! title, city and rating, with a sprinkling of missing attributes.

use rand::{rngs::StdRng, Rng, SeedableRng};
use salary_estimator::JobFeatures;

const TITLES: [(&str, f64); 6] = [
    ("Data Scientist", 110.0),
    ("Senior Data Scientist", 140.0),
    ("Data Engineer", 105.0),
    ("Data Analyst", 65.0),
    ("Machine Learning Engineer", 130.0),
    ("Research Scientist", 120.0),
];

const CITIES: [(&str, f64); 8] = [
    ("San Francisco, CA", 30.0),
    ("New York, NY", 20.0),
    ("Seattle, WA", 15.0),
    ("Boston, MA", 10.0),
    ("Austin, TX", 0.0),
    ("Chicago, IL", -2.0),
    ("Columbus, OH", -10.0),
    ("Albuquerque, NM", -12.0),
];

const SECTORS: [(&str, &str); 4] = [
    ("Internet", "Information Technology"),
    ("Banks & Credit Unions", "Finance"),
    ("Biotech & Pharmaceuticals", "Biotech & Pharmaceuticals"),
    ("Insurance Carriers", "Insurance"),
];

const OWNERSHIP: [&str; 3] = ["Company - Private", "Company - Public", "Nonprofit Organization"];

/// `n` listings and their average salary in thousands.
pub fn synthetic_listings(n: usize, seed: u64) -> (Vec<JobFeatures>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut features = Vec::with_capacity(n);
    let mut targets = Vec::with_capacity(n);

    for _ in 0..n {
        let (title, base) = TITLES[rng.random_range(0..TITLES.len())];
        let (city, bump) = CITIES[rng.random_range(0..CITIES.len())];
        let (industry, sector) = SECTORS[rng.random_range(0..SECTORS.len())];
        let ownership = OWNERSHIP[rng.random_range(0..OWNERSHIP.len())];
        let rating: f64 = rng.random_range(2.5..5.0);
        let founded: i32 = rng.random_range(1900..2020);

        targets.push(base + bump + 8.0 * (rating - 3.5) + rng.random_range(-10.0..10.0));
        features.push(JobFeatures {
            job_title: Some(title.to_string()),
            location: Some(city.to_string()),
            industry: Some(industry.to_string()),
            sector: Some(sector.to_string()),
            ownership: Some(ownership.to_string()),
            rating: (rng.random::<f64>() > 0.1).then_some(rating),
            founded: (rng.random::<f64>() > 0.2).then_some(founded),
        });
    }

    (features, targets)
}

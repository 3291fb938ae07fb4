//! Salary Estimation Pipeline Example
//!
//! Walks through the full workflow on a handful of inline listings:
//! - Parsing Glassdoor salary ranges and dropping `-1` rows
//! - Median/mode imputation, scaling and one-hot encoding per column kind
//! - Ridge regression
//! - Saving the fitted pipeline and predicting from the reloaded artifact
//!
//! Run with: cargo run --example salary_pipeline

use salary_estimator::{
    dataset::{prepare, read_records, MalformedSalaryPolicy},
    FittedSalaryPipeline, JobFeatures, SalaryPipeline, SalaryService,
};
use std::error::Error;

const LISTINGS: &str = "\
Job Title,Salary Estimate,Rating,Location,Founded,Type of ownership,Industry,Sector
Data Scientist,$111K-$181K (Glassdoor est.),3.8,\"San Francisco, CA\",2009,Company - Private,Internet,Information Technology
Data Scientist,$90K-$124K (Glassdoor est.),4.1,\"New York, NY\",1998,Company - Public,Banks & Credit Unions,Finance
Data Engineer,$79K-$131K (Glassdoor est.),3.5,\"Austin, TX\",-1,Company - Private,Internet,Information Technology
Data Analyst,$45K-$77K (Glassdoor est.),-1,\"Chicago, IL\",1985,Company - Public,Insurance Carriers,Insurance
Data Analyst,$52K-$84K (Glassdoor est.),3.2,\"New York, NY\",1970,Company - Public,Banks & Credit Unions,Finance
Machine Learning Engineer,$125K-$200K (Glassdoor est.),4.4,\"San Francisco, CA\",2014,Company - Private,Internet,Information Technology
Data Scientist,-1,3.9,\"Boston, MA\",2001,Nonprofit Organization,Research & Development,Business Services
Data Engineer,$95K-$150K (Glassdoor est.),3.7,\"Seattle, WA\",1994,Company - Public,Internet,Information Technology
";

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Salary Estimation Pipeline ===\n");

    let raw = read_records(LISTINGS.as_bytes())?;
    let prepared = prepare(&raw, MalformedSalaryPolicy::Reject)?;
    println!(
        "Loaded {} listings, kept {} ({} without a salary)",
        raw.len(),
        prepared.len(),
        prepared.sentinel_rows
    );

    println!("\nFitting pipeline...");
    let fitted = SalaryPipeline::default().fit_features(&prepared.features(), &prepared.targets)?;
    println!("  Design matrix columns: {}", fitted.feature_names_out().len());
    for (name, weight) in fitted
        .feature_names_out()
        .iter()
        .zip(fitted.model().weights().iter())
        .take(6)
    {
        println!("    {name:<45} {weight:>8.3}");
    }

    let path = std::env::temp_dir().join("salary_prediction_pipeline.bin");
    fitted.save_to_file(&path)?;
    println!("\nPipeline saved to: {:?}", path);

    let service = SalaryService::new(FittedSalaryPipeline::load_from_file(&path)?);

    println!("\n=== Predictions ===\n");
    let queries = vec![
        JobFeatures {
            job_title: Some("Data Scientist".to_string()),
            location: Some("San Francisco, CA".to_string()),
            industry: Some("Internet".to_string()),
            sector: Some("Information Technology".to_string()),
            ownership: Some("Company - Private".to_string()),
            rating: Some(4.0),
            founded: Some(2010),
        },
        JobFeatures {
            job_title: Some("Data Analyst".to_string()),
            location: Some("Chicago, IL".to_string()),
            rating: Some(3.4),
            ..JobFeatures::default()
        },
        // Title and city never seen during training
        JobFeatures {
            job_title: Some("Quantitative Researcher".to_string()),
            location: Some("Denver, CO".to_string()),
            ..JobFeatures::default()
        },
    ];

    for (query, estimate) in queries.iter().zip(service.estimate_batch(&queries)?) {
        println!(
            "  {:<25} ${:.1}K",
            query.job_title.as_deref().unwrap_or("<unknown>"),
            estimate
        );
    }

    std::fs::remove_file(&path).ok();
    println!("\n=== Pipeline Complete ===");
    Ok(())
}

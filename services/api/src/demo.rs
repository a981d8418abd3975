use crate::infra::{default_scoring_config, InMemoryScoringConfigRepository};
use chrono::Utc;
use clap::Args;
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tenant_underwriting::error::AppError;
use tenant_underwriting::underwriting::{
    parse_profiles_from_path, score, validate_profile, ApplicantProfile, EmploymentType,
    GuarantorLocation, HealthStatus, InsurerId, LandlordReference, MaritalStatus,
    ReferenceRating, ReportMetadata, ScoreResult, UnderwritingError, UnderwritingReport,
    UnderwritingService, UtilityPaymentHistory,
};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Applicant profile JSON file
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Scoring configuration JSON file (defaults to the built-in configuration)
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Print a human-readable report instead of JSON
    #[arg(long)]
    pub(crate) report: bool,
    /// Applicant name shown on the report
    #[arg(long)]
    pub(crate) applicant: Option<String>,
    /// Property description shown on the report
    #[arg(long)]
    pub(crate) property: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with one applicant per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Scoring configuration JSON file (defaults to the built-in configuration)
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        profile,
        config,
        report,
        applicant,
        property,
    } = args;

    let raw = fs::read_to_string(profile)?;
    let profile: ApplicantProfile = serde_json::from_str(&raw)?;
    validate_profile(&profile).map_err(UnderwritingError::from)?;
    let config = default_scoring_config(config.as_deref())?;

    let result = score(&profile, &config);

    if report {
        let metadata = ReportMetadata {
            applicant,
            property,
        };
        let report = UnderwritingReport::new(None, metadata, result, Utc::now());
        for line in report.render_lines() {
            println!("{line}");
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let applicants = parse_profiles_from_path(&args.csv)?;
    let config = default_scoring_config(args.config.as_deref())?;

    println!(
        "{:<16} {:>8} {:>8}  {}",
        "applicant", "score", "PD %", "decision"
    );

    let mut tally: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut rejected = 0usize;
    for imported in &applicants {
        if let Err(err) = validate_profile(&imported.profile) {
            println!("{:<16} skipped: {}", imported.applicant_id, err);
            rejected += 1;
            continue;
        }

        let result = score(&imported.profile, &config);
        println!(
            "{:<16} {:>8.2} {:>8.2}  {}",
            imported.applicant_id,
            result.safety_score,
            result.pd_12m * 100.0,
            result.decision.label()
        );
        *tally.entry(result.decision.label()).or_default() += 1;
    }

    println!("\n{} applicants scored", applicants.len() - rejected);
    for (decision, count) in tally {
        println!("- {decision}: {count}");
    }
    if rejected > 0 {
        println!("- skipped: {rejected}");
    }

    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    println!("Tenant underwriting demo");

    let repository = Arc::new(InMemoryScoringConfigRepository::default());
    let service = UnderwritingService::new(repository);

    let cautious = InsurerId("cautious-mutual".to_string());
    let stored = service.store_config(
        &cautious,
        &json!({
            "name": "Cautious Mutual",
            "weights": { "personal": 5, "employment": 30, "financial": 30, "housing": 25, "other": 10 },
            "pdMax": 0.3,
            "decisionThresholds": { "acceptPd": 0.03, "conditionalPd": 0.08 }
        }),
    )?;
    println!(
        "- Stored configuration '{}' for {} at {}",
        stored.config.name.as_deref().unwrap_or("unnamed"),
        stored.insurer_id.as_str(),
        stored.updated_at.format("%Y-%m-%d %H:%M UTC")
    );

    for (label, profile) in demo_profiles() {
        println!("\n{label}");
        let default_result = service.assess(None, &profile)?;
        print_outcome("system default", &default_result);
        let cautious_result = service.assess(Some(&cautious), &profile)?;
        print_outcome(cautious.as_str(), &cautious_result);
    }

    println!("\nSample report");
    let (_, profile) = demo_profiles().swap_remove(1);
    let report = service.report(
        Some(&cautious),
        ReportMetadata {
            applicant: Some("Sample applicant".to_string()),
            property: Some("2-bedroom apartment, monthly rent 800".to_string()),
        },
        &profile,
    )?;
    for line in report.render_lines() {
        println!("  {line}");
    }

    Ok(())
}

fn print_outcome(source: &str, result: &ScoreResult) {
    println!(
        "  - {source}: score {:.2} | PD {:.2}% | {}",
        result.safety_score,
        result.pd_12m * 100.0,
        result.decision.label()
    );
    for explanation in &result.explanations {
        println!("      {explanation}");
    }
}

fn demo_profiles() -> Vec<(&'static str, ApplicantProfile)> {
    let established = ApplicantProfile {
        age: Some(34),
        marital_status: Some(MaritalStatus::Married),
        number_of_dependents: Some(2),
        employment_type: Some(EmploymentType::Permanent),
        monthly_net_salary: Some(3200.0),
        employment_years: Some(7),
        monthly_debt_payments: Some(150.0),
        savings_balance: Some(5200.0),
        other_obligations: Some(0.0),
        rent_amount: Some(800.0),
        has_guarantor: Some(true),
        guarantor_location: Some(GuarantorLocation::Tunisia),
        months_at_residence: Some(48),
        number_of_past_defaults: Some(0),
        landlord_references: vec![LandlordReference {
            rating: ReferenceRating::Positive,
        }],
        utility_payment_history: Some(UtilityPaymentHistory::Always),
        health_status: Some(HealthStatus::Good),
        verified_id: Some(true),
    };

    let contractor = ApplicantProfile {
        employment_type: Some(EmploymentType::Contract),
        monthly_net_salary: Some(2100.0),
        employment_years: Some(2),
        monthly_debt_payments: Some(420.0),
        savings_balance: Some(1800.0),
        guarantor_location: Some(GuarantorLocation::Outside),
        months_at_residence: Some(14),
        landlord_references: vec![
            LandlordReference {
                rating: ReferenceRating::Neutral,
            },
            LandlordReference {
                rating: ReferenceRating::Positive,
            },
        ],
        utility_payment_history: Some(UtilityPaymentHistory::Sometimes),
        ..established.clone()
    };

    let first_lease = ApplicantProfile {
        age: Some(20),
        marital_status: Some(MaritalStatus::Single),
        number_of_dependents: Some(0),
        employment_type: Some(EmploymentType::Student),
        monthly_net_salary: Some(600.0),
        employment_years: Some(0),
        monthly_debt_payments: Some(0.0),
        savings_balance: Some(300.0),
        other_obligations: Some(0.0),
        rent_amount: Some(450.0),
        has_guarantor: Some(false),
        guarantor_location: None,
        months_at_residence: Some(0),
        number_of_past_defaults: Some(0),
        landlord_references: Vec::new(),
        utility_payment_history: None,
        health_status: None,
        verified_id: Some(false),
    };

    vec![
        ("Established household", established),
        ("Contract worker", contractor),
        ("First-time renter", first_lease),
    ]
}

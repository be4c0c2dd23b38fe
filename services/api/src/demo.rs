use std::sync::Arc;

use clap::Args;

use gradebook::config::CourseConfig;
use gradebook::error::AppError;
use gradebook::scoring::{CourseUrls, Scorer};

use crate::infra::{seeded_course, InMemorySignalStore, DEMO_COHORT};

#[derive(Args, Debug)]
pub(crate) struct StandingsArgs {
    /// Cohort to rank (defaults to the seeded demo cohort)
    #[arg(long, default_value = DEMO_COHORT)]
    pub(crate) cohort: String,
    /// Restrict the table to one subgroup
    #[arg(long)]
    pub(crate) subgroup: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct UserScoresArgs {
    /// Forge login of the student to inspect
    #[arg(long)]
    pub(crate) login: String,
}

fn demo_scorer() -> Scorer<InMemorySignalStore, InMemorySignalStore, CourseUrls> {
    let store = Arc::new(seeded_course());
    let urls = Arc::new(CourseUrls::new(&CourseConfig::default()));
    Scorer::new(store.clone(), store, urls)
}

pub(crate) fn run_standings(args: StandingsArgs) -> Result<(), AppError> {
    let scorer = demo_scorer();
    let standings = scorer.score_cohort(&args.cohort, args.subgroup.as_deref())?;

    match &args.subgroup {
        Some(subgroup) => println!("Standings for {} / {}", args.cohort, subgroup),
        None => println!("Standings for {}", args.cohort),
    }

    for (place, row) in standings.users.iter().enumerate() {
        println!(
            "{:>3}. {:<24} {:>4}/{:<4} ({} on review)",
            place + 1,
            row.user.full_name(),
            row.score,
            row.max_score,
            row.tasks_on_review
        );
    }

    Ok(())
}

pub(crate) fn run_user_scores(args: UserScoresArgs) -> Result<(), AppError> {
    let scorer = demo_scorer();
    let scores = scorer.score_login(&args.login)?;

    println!("{} <{}>", scores.user.full_name(), scores.user.project_url);
    for group in &scores.groups {
        println!(
            "\n{} (deadline {}) - {}/{}",
            group.pretty_title, group.deadline, group.score, group.max_score
        );
        for task in &group.tasks {
            println!(
                "  {:<24} {:>9} {:>4}/{:<4}",
                task.short_name,
                task.status.label(),
                task.score,
                task.max_score
            );
        }
    }

    println!(
        "\nTotal: {}/{} ({} on review)",
        scores.score, scores.max_score, scores.tasks_on_review
    );

    Ok(())
}

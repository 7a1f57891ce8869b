use crate::infra::{parse_alias, parse_filter, parse_format, InMemoryResponseRepository};
use chrono::Local;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wedding_rsvp::config::AppConfig;
use wedding_rsvp::error::AppError;
use wedding_rsvp::guests::{
    DuplicateDetector, GuestListFormat, GuestListImporter, GuestListReport, GuestListService,
    NameAlias, PurgeOutcome, ResponseFilter, StatisticsSummary, WeddingContext, WeddingId,
};

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Guest list export to analyse (CSV or JSON)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Input format; guessed from the file extension when omitted
    #[arg(long, value_parser = parse_format)]
    pub(crate) format: Option<GuestListFormat>,
    /// Rows to list: all, attending, not-attending, or a connection label
    #[arg(long, value_parser = parse_filter, default_value = "all")]
    pub(crate) filter: ResponseFilter,
    /// Extra spelling alias (from=to) added to RSVP_NAME_ALIASES; repeatable
    #[arg(long = "alias", value_parser = parse_alias)]
    pub(crate) aliases: Vec<NameAlias>,
    /// Print the guest rows selected by --filter
    #[arg(long)]
    pub(crate) list_guests: bool,
    /// Drop every flagged duplicate and print the resulting counts
    #[arg(long)]
    pub(crate) purge_duplicates: bool,
    /// Wedding identifier the export belongs to
    #[arg(long, default_value = "wedding-LOCAL")]
    pub(crate) wedding: String,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        input,
        format,
        filter,
        aliases,
        list_guests,
        purge_duplicates,
        wedding,
    } = args;

    let config = AppConfig::load()?;
    let mut all_aliases = config.duplicates.aliases;
    all_aliases.extend(aliases);

    let responses = GuestListImporter::from_path(&input, format)?;
    let wedding = WeddingId(wedding);
    let repository = Arc::new(InMemoryResponseRepository::default());
    repository.seed(&wedding, responses);

    let service = GuestListService::new(repository, Arc::new(DuplicateDetector::new(all_aliases)));
    let context = WeddingContext::wedding_admin(wedding);

    let report = service.dashboard(&context, &filter)?;
    render_report(&report, &input, &context.wedding_id, list_guests);

    if purge_duplicates {
        let outcome = service.purge_duplicates(&context)?;
        let after = service.dashboard(&context, &filter)?;
        render_purge(&outcome, &after.statistics);
    }

    Ok(())
}

fn render_report(report: &GuestListReport, input: &Path, wedding: &WeddingId, list_guests: bool) {
    let stats = &report.statistics;

    println!("Guest list report");
    println!("Wedding {} (source: {})", wedding, input.display());
    println!("Generated {}", Local::now().format("%Y-%m-%d %H:%M"));
    render_counts(stats);

    if stats.connection_breakdown.is_empty() {
        println!("\nConnection breakdown: none");
    } else {
        println!("\nConnection breakdown");
        for (label, count) in stats.ranked_connections() {
            println!("- {label}: {count}");
        }
    }

    let groups: Vec<_> = report.duplicates.duplicate_groups().collect();
    if groups.is_empty() {
        println!("\nPossible duplicates: none");
    } else {
        println!(
            "\nPossible duplicates ({} responses in {} groups)",
            report.duplicates.flagged_count(),
            groups.len()
        );
        for group in groups {
            let members: Vec<String> = group.members.iter().map(ToString::to_string).collect();
            println!("- \"{}\": {}", group.key, members.join(", "));
        }
    }

    if list_guests {
        println!("\nGuests ({})", report.filter);
        for row in &report.guests {
            let response = &row.response;
            let answer = if response.attending {
                "attending"
            } else {
                "declined"
            };
            let marker = if row.possible_duplicate {
                " [possible duplicate]"
            } else {
                ""
            };
            println!(
                "- {} | {} | {} | {} | party of {}{}",
                response.id,
                response.display_name(),
                answer,
                response.connection().unwrap_or("-"),
                response.effective_guest_count(),
                marker
            );
        }
    }
}

fn render_counts(stats: &StatisticsSummary) {
    println!(
        "Responses: {} total, {} attending, {} not attending, {} guests expected",
        stats.total, stats.attending, stats.not_attending, stats.guest_count
    );
}

fn render_purge(outcome: &PurgeOutcome, after: &StatisticsSummary) {
    println!("\nDuplicate purge");
    println!("- deleted {} responses", outcome.deleted.len());
    if !outcome.missing.is_empty() {
        println!("- {} flagged responses were already gone", outcome.missing.len());
    }
    render_counts(after);
}

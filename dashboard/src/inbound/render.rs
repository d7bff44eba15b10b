//! Plain-text rendering of the users list and records.

use std::io::{self, Write};

use pagination::{PageLink, PageStats};

use crate::domain::{
    CreatedUser, DisplayOutcome, DisplayedSet, DomainDistribution, UpdatedUser, UserDetail,
    UserRecord, ViewMode,
};

/// Shown when the fetched page holds no records.
pub const NO_RECORDS: &str = "No users found.";
/// Shown when filters excluded every record on the page.
pub const NO_MATCHES: &str = "No users match the current filters.";

/// Write the displayed set in the chosen layout.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_users(out: &mut impl Write, shown: &DisplayedSet, view: ViewMode) -> io::Result<()> {
    match shown.outcome() {
        DisplayOutcome::NoRecords => writeln!(out, "{NO_RECORDS}"),
        DisplayOutcome::NoMatches => writeln!(out, "{NO_MATCHES}"),
        DisplayOutcome::Records => match view {
            ViewMode::Table => write_table(out, shown.records()),
            ViewMode::Card => write_cards(out, shown.records()),
        },
    }
}

fn write_table(out: &mut impl Write, records: &[UserRecord]) -> io::Result<()> {
    let name_width = records
        .iter()
        .map(|record| record.full_name().chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    writeln!(out, "{:>4}  {:<name_width$}  EMAIL", "ID", "NAME")?;
    for record in records {
        writeln!(
            out,
            "{:>4}  {:<name_width$}  {}",
            record.id().get(),
            record.full_name(),
            record.email()
        )?;
    }
    Ok(())
}

fn write_cards(out: &mut impl Write, records: &[UserRecord]) -> io::Result<()> {
    for (index, record) in records.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        write_record(out, record)?;
    }
    Ok(())
}

fn write_record(out: &mut impl Write, record: &UserRecord) -> io::Result<()> {
    writeln!(out, "#{} {}", record.id(), record.full_name())?;
    writeln!(out, "  {}", record.email())?;
    if let Some(avatar) = record.avatar() {
        writeln!(out, "  {avatar}")?;
    }
    Ok(())
}

/// Write the pagination control, e.g. `[1] 2 3 ... 9`.
///
/// Nothing is written for a single page.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_page_links(
    out: &mut impl Write,
    links: &[PageLink],
    current: pagination::PageNumber,
) -> io::Result<()> {
    if links.is_empty() {
        return Ok(());
    }
    let rendered: Vec<String> = links
        .iter()
        .map(|link| match link {
            PageLink::Page(page) if *page == current => format!("[{page}]"),
            PageLink::Page(page) => page.to_string(),
            PageLink::Gap => "...".to_owned(),
        })
        .collect();
    writeln!(out, "{}", rendered.join(" "))
}

/// Write the page summary line.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_stats(out: &mut impl Write, stats: &PageStats) -> io::Result<()> {
    writeln!(
        out,
        "{} users total, {} on this page, {} pages remaining ({:.0}% viewed)",
        stats.total, stats.on_page, stats.remaining_pages, stats.progress_percent
    )
}

/// Write one line per email domain, e.g. `reqres.in: 6 (100%)`.
///
/// Nothing is written for an empty page.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_domains(out: &mut impl Write, distribution: &DomainDistribution) -> io::Result<()> {
    for share in distribution.shares() {
        let domain = if share.domain.is_empty() {
            "(none)"
        } else {
            share.domain.as_str()
        };
        writeln!(out, "{domain}: {} ({:.0}%)", share.count, share.percent)?;
    }
    Ok(())
}

/// Write one looked-up record with its support banner.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_detail(out: &mut impl Write, detail: &UserDetail) -> io::Result<()> {
    write_record(out, &detail.user)?;
    if let Some(support) = &detail.support {
        writeln!(out, "  {} <{}>", support.text, support.url)?;
    }
    Ok(())
}

/// Write the echo of a create.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_created(out: &mut impl Write, created: &CreatedUser) -> io::Result<()> {
    writeln!(
        out,
        "created user {} ({}, {}) at {}",
        created.id, created.name, created.job, created.created_at
    )
}

/// Write the echo of an update.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_updated(out: &mut impl Write, updated: &UpdatedUser) -> io::Result<()> {
    writeln!(
        out,
        "updated user ({}, {}) at {}",
        updated.name, updated.job, updated.updated_at
    )
}

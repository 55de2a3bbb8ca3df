use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::assessment::{AssessmentMode, AssessmentRecord, SnapshotValue};
use crate::config::ColorMode;
use crate::rubric::{
    detailed_max, round_for_display, score_band, HolisticDimension, RatingLevel, ScoreBand,
    ScoreBreakdown, DISPLAY_GROUPS,
};

/// Resolve the configured colour mode against the terminal
pub fn should_use_colors(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Format a score rounded to `decimals` places, without trailing zeros
/// (53.125 -> "53.13", 100.0 -> "100", 68.50 -> "68.5")
pub fn format_score(score: f64, decimals: u8) -> String {
    let formatted = format!(
        "{:.*}",
        usize::from(decimals),
        round_for_display(score, decimals)
    );
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

/// Band label, coloured like a traffic light when colours are enabled
pub fn format_band(band: ScoreBand, use_colors: bool) -> String {
    let label = format!("{:<4}", band.label());
    if !use_colors {
        return label;
    }
    match band {
        ScoreBand::Low => label.red().to_string(),
        ScoreBand::Mid => label.yellow().to_string(),
        ScoreBand::High => label.cyan().to_string(),
        ScoreBand::Top => label.green().to_string(),
    }
}

/// Points out of a maximum with the band badge, e.g. "8/12 high"
fn format_points(points: u32, max: u32, use_colors: bool) -> String {
    match score_band(f64::from(points), f64::from(max)) {
        Ok(band) => format!("{:>2}/{:<3} {}", points, max, format_band(band, use_colors)),
        Err(_) => format!("{:>2}/{:<3}", points, max),
    }
}

/// An assessment file with its scored record, for table display
pub struct ScoredAssessment<'a> {
    pub source: &'a str,
    pub record: &'a AssessmentRecord,
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format scored assessments as a table: Index, Score, Band, Mode, Source
/// Rows are printed in the order given; callers sort beforehand.
pub fn format_scored_table(rows: &[ScoredAssessment], decimals: u8, use_colors: bool) -> String {
    if rows.is_empty() {
        return "No assessments found.".to_string();
    }

    let index_width = 3;
    // "100.00" at two decimals
    let score_width = 4 + usize::from(decimals);
    let fixed_width = index_width + 1 + score_width + 2 + 4 + 2 + 8 + 2;
    let terminal_width = get_terminal_width();

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let index = format!("{:>width$}.", idx + 1, width = index_width);
            let score = format!(
                "{:>width$}",
                format_score(row.record.score(), decimals),
                width = score_width
            );
            let band = format_band(row.record.band(), use_colors);
            let mode = format!("{:<8}", row.record.mode().to_string());
            let source = match terminal_width {
                Some(width) if width > fixed_width + 10 => truncate(row.source, width - fixed_width),
                Some(_) => truncate(row.source, 20),
                None => row.source.to_string(),
            };

            if use_colors {
                format!("{} {}  {}  {}  {}", index, score.bold(), band, mode, source.underline())
            } else {
                format!("{} {}  {}  {}  {}", index, score, band, mode, source)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-field breakdown of a record.
///
/// Detailed records are grouped under their display headings with a combined
/// badge for composite groups; holistic records list one line per dimension.
pub fn format_breakdown(breakdown: &ScoreBreakdown, decimals: u8, use_colors: bool) -> String {
    let mut lines = Vec::new();

    match breakdown.mode {
        AssessmentMode::Detailed => {
            for (group, points) in breakdown.group_subtotals() {
                let title = format!("{:<30}", group.title);
                let title = if use_colors { title.bold().to_string() } else { title };
                lines.push(format!("  {} {}", title, format_points(points, group.max_points(), use_colors)));
                if group.is_composite() {
                    for member in group.members {
                        let contribution = breakdown
                            .contributions
                            .iter()
                            .find(|c| c.key == member.key());
                        if let Some(c) = contribution {
                            lines.push(format!(
                                "    {:<28} {}",
                                c.label,
                                format_points(c.points, c.max, use_colors)
                            ));
                        }
                    }
                }
            }
        }
        AssessmentMode::Holistic => {
            for c in &breakdown.contributions {
                lines.push(format!(
                    "  {:<30} {}",
                    c.label,
                    format_points(c.points, c.max, use_colors)
                ));
            }
        }
    }

    let total = format!(
        "  {:<30} {} / {}",
        match breakdown.mode {
            AssessmentMode::Holistic => "Average",
            AssessmentMode::Detailed => "Total",
        },
        format_score(breakdown.score, decimals),
        format_score(breakdown.max, 0)
    );
    lines.push(if use_colors { total.bold().to_string() } else { total });

    lines.join("\n")
}

/// Reference listing of both rubrics
pub fn format_rubric(use_colors: bool) -> String {
    let heading = |text: &str| {
        if use_colors {
            text.bold().underline().to_string()
        } else {
            text.to_string()
        }
    };

    let mut lines = vec![heading("Detailed rubric (points, summed)")];
    for group in DISPLAY_GROUPS.iter() {
        if group.is_composite() {
            lines.push(format!("  {:<28} max {:>2}", group.title, group.max_points()));
            for member in group.members {
                lines.push(format!(
                    "    {:<22} {:<22} max {:>2}",
                    member.label(),
                    member.key(),
                    member.max_points()
                ));
            }
        } else {
            let criterion = group.members[0];
            lines.push(format!(
                "  {:<26} {:<22} max {:>2}",
                group.title,
                criterion.key(),
                criterion.max_points()
            ));
        }
    }
    lines.push(format!("  {:<49} {:>6}", "Total", detailed_max()));

    lines.push(String::new());
    lines.push(heading("Holistic rubric (ratings, averaged)"));
    for dim in HolisticDimension::ALL {
        lines.push(format!("  {:<30} {}", dim.label(), dim.key()));
    }
    lines.push(String::new());
    lines.push(heading("Rating scale"));
    for level in RatingLevel::ALL {
        lines.push(format!("  {:<10} {:>3}", level.key(), level.score()));
    }

    lines.join("\n")
}

/// Render an ordered key/value list as a YAML snapshot template
pub fn format_template(mode: AssessmentMode, entries: &[(&str, SnapshotValue)]) -> String {
    let mut lines = vec![format!("# {} assessment", mode)];
    lines.extend(entries.iter().map(|(key, value)| {
        let rendered = match value {
            SnapshotValue::Empty => "~".to_string(),
            SnapshotValue::Bool(b) => b.to_string(),
            SnapshotValue::Integer(n) => n.to_string(),
            SnapshotValue::Number(n) => n.to_string(),
            SnapshotValue::Text(text) => text.clone(),
        };
        format!("{}: {}", key, rendered)
    }));
    lines.push("description: \"\"".to_string());
    lines.join("\n")
}

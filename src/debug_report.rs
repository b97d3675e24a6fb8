use jarida::{ExtractResultVerbose, Row, RuleTrace};
use std::fmt::Display;

/// Role of a piece of text in the summary; each maps to one SGR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Title,
    Section,
    Rule,
    Hit,
    Field,
    Value,
    Muted,
    Strong,
}

impl Tone {
    fn sgr(self) -> &'static str {
        match self {
            Tone::Title => "1;36",
            Tone::Section => "90",
            Tone::Rule => "36",
            Tone::Hit => "32",
            Tone::Field => "34",
            Tone::Value => "33",
            Tone::Muted => "2",
            Tone::Strong => "1;32",
        }
    }
}

/// Wraps text in ANSI escapes, or passes it through when color is off.
struct Palette {
    color: bool,
}

impl Palette {
    fn tone(&self, text: impl Display, tone: Tone) -> String {
        if self.color { format!("\x1b[{}m{text}\x1b[0m", tone.sgr()) } else { text.to_string() }
    }

    fn section(&self, title: &str) {
        println!("\n{}", self.tone(format!("━━━ {title} ━━━"), Tone::Section));
    }
}

/// Rows shown before the list is cut short.
const MAX_ROWS: usize = 50;

pub fn print_run(source: &str, res: &ExtractResultVerbose, color: bool) {
    let palette = Palette { color };
    let details = &res.details;
    println!("\n{}", palette.tone(format!("⚙  Extracting: {} ({} tokens)", source, details.tokens), Tone::Title));

    palette.section("Rules");
    for trace in &details.rules {
        println!("  {}", fmt_trace(trace, &palette));
    }

    palette.section("Results");
    if res.report.is_empty() {
        println!("  {}", palette.tone("No rows produced", Tone::Muted));
    } else {
        for row in res.report.rows().iter().take(MAX_ROWS) {
            print_row(row, &palette);
        }
        if res.report.len() > MAX_ROWS {
            println!("  {}", palette.tone(format!("... +{} more", res.report.len() - MAX_ROWS), Tone::Muted));
        }
    }

    palette.section("Timing");
    println!(
        "  Total: {}  │  Matching: {}  │  Report: {}  │  Rows: {}",
        palette.tone(format!("{:?}", details.total), Tone::Hit),
        palette.tone(format!("{:?}", details.matching), Tone::Rule),
        palette.tone(format!("{:?}", details.report), Tone::Muted),
        palette.tone(details.records, Tone::Value),
    );
    println!();
}

fn fmt_trace(trace: &RuleTrace, palette: &Palette) -> String {
    let hits = match trace.matched {
        0 => palette.tone("✗ 0", Tone::Muted),
        n => palette.tone(format!("✓ {n}"), Tone::Hit),
    };
    let threshold = trace.threshold.map(|t| format!("  threshold: {t}")).unwrap_or_default();

    format!(
        "{} {} {}  {}",
        palette.tone(&trace.rule, Tone::Rule),
        palette.tone(format!("[{}]", trace.field), Tone::Muted),
        hits,
        palette.tone(format!("{:?} over {} tokens{threshold}", trace.duration, trace.evaluated), Tone::Muted),
    )
}

fn print_row(row: &Row, palette: &Palette) {
    let fields = row.flags.iter().filter(|(_, set)| *set).map(|(f, _)| f.name()).collect::<Vec<_>>().join(" ");

    println!(
        "  {} {} {} {}",
        palette.tone(format!("[{}]", row.index), Tone::Section),
        palette.tone(&row.word, Tone::Strong),
        palette.tone("│", Tone::Muted),
        palette.tone(fields, Tone::Field),
    );

    let mut line = format!(
        "      {} {}  {} {}",
        palette.tone("context:", Tone::Muted),
        row.context,
        palette.tone("region:", Tone::Muted),
        palette.tone(&row.region, Tone::Value)
    );
    if !row.final_extraction.is_empty() {
        let value = palette.tone(&row.final_extraction, Tone::Value);
        line.push_str(&format!("  {} {value}", palette.tone("│ value:", Tone::Muted)));
    }
    println!("{line}");
}

use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use scorecast_engine::{CountRecord, KindTally, Prediction, ScoreConfig, ScoreKind, format_instant};
use std::io::Write;

use crate::util::DisplayZone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Csv,
    Markdown,
}

/// Result of one subcommand, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Predictions(Vec<Prediction>),
    Counts(Vec<CountRecord>),
    Next {
        kind: ScoreKind,
        found: Option<Prediction>,
    },
}

/// Rendering context shared by every format.
pub struct ReportCtx<'a> {
    pub zone: DisplayZone,
    pub config: &'a ScoreConfig,
}

pub fn write_report<W: Write + ?Sized>(
    out: &mut W,
    format: ReportFormat,
    report: &Report,
    ctx: &ReportCtx<'_>,
) -> Result<()> {
    match format {
        ReportFormat::Json => write_json(out, report),
        ReportFormat::Csv => write_csv(out, report),
        ReportFormat::Markdown => write_markdown(out, report),
        ReportFormat::Console => write_console(out, report, ctx),
    }
}

fn write_json<W: Write + ?Sized>(out: &mut W, report: &Report) -> Result<()> {
    let json = match report {
        Report::Predictions(predictions) => serde_json::to_string_pretty(predictions)?,
        Report::Counts(records) => serde_json::to_string_pretty(records)?,
        Report::Next { found, .. } => serde_json::to_string_pretty(found)?,
    };
    writeln!(out, "{json}")?;
    Ok(())
}

fn write_csv<W: Write + ?Sized>(out: &mut W, report: &Report) -> Result<()> {
    match report {
        Report::Predictions(predictions) => write_prediction_rows(out, predictions),
        Report::Next { found, .. } => write_prediction_rows(out, found.as_slice()),
        Report::Counts(records) => {
            writeln!(
                out,
                "startTime,endTime,utcHundredCount,utcQuadrupleCount,jstHundredCount,jstQuadrupleCount"
            )?;
            for record in records {
                writeln!(
                    out,
                    "{},{},{},{},{},{}",
                    format_instant(&record.start_time),
                    format_instant(&record.end_time),
                    record.utc.hundred_count,
                    record.utc.quadruple_count,
                    record.jst.hundred_count,
                    record.jst.quadruple_count
                )?;
            }
            Ok(())
        }
    }
}

fn write_prediction_rows<W: Write + ?Sized>(
    out: &mut W,
    predictions: &[Prediction],
) -> Result<()> {
    writeln!(out, "time,scoreInteger,scoreString,scoreType")?;
    for prediction in predictions {
        writeln!(
            out,
            "{},{},{},{:?}",
            format_instant(&prediction.time),
            prediction.score_integer,
            prediction.score_string,
            prediction.score_type
        )?;
    }
    Ok(())
}

fn write_markdown<W: Write + ?Sized>(out: &mut W, report: &Report) -> Result<()> {
    match report {
        Report::Predictions(predictions) => {
            writeln!(out, "# Score Predictions\n")?;
            write_prediction_table(out, predictions)
        }
        Report::Next { kind, found } => {
            writeln!(out, "# Next {kind}\n")?;
            if found.is_none() {
                writeln!(out, "_No {kind} score within the horizon._")?;
                return Ok(());
            }
            write_prediction_table(out, found.as_slice())
        }
        Report::Counts(records) => {
            writeln!(out, "# Rare Score Counts\n")?;
            writeln!(
                out,
                "| Start | End | UTC hundred | UTC quadruple | JST hundred | JST quadruple |"
            )?;
            writeln!(out, "|---|---|---|---|---|---|")?;
            for record in records {
                writeln!(
                    out,
                    "| {} | {} | {} | {} | {} | {} |",
                    format_instant(&record.start_time),
                    format_instant(&record.end_time),
                    record.utc.hundred_count,
                    record.utc.quadruple_count,
                    record.jst.hundred_count,
                    record.jst.quadruple_count
                )?;
            }
            Ok(())
        }
    }
}

fn write_prediction_table<W: Write + ?Sized>(
    out: &mut W,
    predictions: &[Prediction],
) -> Result<()> {
    if predictions.is_empty() {
        writeln!(out, "_No predictions matched the filter._")?;
        return Ok(());
    }
    writeln!(out, "| Time | Score | Type |")?;
    writeln!(out, "|---|---|---|")?;
    for prediction in predictions {
        writeln!(
            out,
            "| {} | {} | {} |",
            format_instant(&prediction.time),
            prediction.score_string,
            prediction.score_type
        )?;
    }
    Ok(())
}

fn write_console<W: Write + ?Sized>(
    out: &mut W,
    report: &Report,
    ctx: &ReportCtx<'_>,
) -> Result<()> {
    match report {
        Report::Predictions(predictions) => {
            writeln!(out, "{}", "🎤 Score Predictions".bright_cyan().bold())?;
            writeln!(out, "{}", "====================".cyan())?;
            for prediction in predictions {
                writeln!(
                    out,
                    "{}  {:>7}  {}",
                    ctx.zone.render(&prediction.time, ctx.config),
                    prediction.score_string,
                    kind_badge(prediction.score_type)
                )?;
            }
            let mut tally = KindTally::default();
            for prediction in predictions {
                tally.record(prediction.score_type);
            }
            writeln!(out)?;
            writeln!(
                out,
                "Predictions: {}  Hundred: {}  Quadruple: {}",
                predictions.len(),
                tally.hundred_count.to_string().green(),
                tally.quadruple_count.to_string().yellow()
            )?;
        }
        Report::Counts(records) => {
            writeln!(out, "{}", "📊 Rare Score Counts".bright_cyan().bold())?;
            writeln!(out, "{}", "====================".cyan())?;
            for record in records {
                writeln!(
                    out,
                    "{} → {}",
                    ctx.zone.render(&record.start_time, ctx.config),
                    ctx.zone.render(&record.end_time, ctx.config)
                )?;
                writeln!(
                    out,
                    "   UTC seed: hundred {} quadruple {}",
                    record.utc.hundred_count, record.utc.quadruple_count
                )?;
                writeln!(
                    out,
                    "   JST seed: hundred {} quadruple {}",
                    record.jst.hundred_count, record.jst.quadruple_count
                )?;
            }
            let utc = records
                .iter()
                .fold(KindTally::default(), |acc, r| acc.merged(r.utc));
            let jst = records
                .iter()
                .fold(KindTally::default(), |acc, r| acc.merged(r.jst));
            writeln!(out)?;
            writeln!(
                out,
                "Spans: {}  UTC rare: {}  JST rare: {}",
                records.len(),
                utc.total().to_string().green(),
                jst.total().to_string().green()
            )?;
        }
        Report::Next { kind, found } => match found {
            Some(prediction) => writeln!(
                out,
                "Next {kind}: {} ({})",
                ctx.zone.render(&prediction.time, ctx.config),
                prediction.score_string
            )?,
            None => writeln!(out, "No {kind} score within the horizon.")?,
        },
    }
    Ok(())
}

fn kind_badge(kind: ScoreKind) -> ColoredString {
    match kind {
        ScoreKind::Hundred => "HUNDRED".green().bold(),
        ScoreKind::Quadruple => "QUADRUPLE".yellow().bold(),
        ScoreKind::Normal => "normal".dimmed(),
    }
}

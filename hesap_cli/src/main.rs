//! # Hesap CLI Application
//!
//! Terminal front end for the calculation engine: pick a calculator, type
//! its inputs, see the result, save it as a report, and export saved reports
//! as PDF files.
//!
//! ```text
//! hesap_cli [--config FILE] [--out-dir DIR] [--user NAME] [--json]
//! ```
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `warn`).

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use hesap_core::catalog;
use hesap_core::{export_pdf, CalcError, CalcResult, CalculatorSession, Engine, EngineSettings, Identity, Report};

#[derive(Parser, Debug)]
#[command(name = "hesap_cli")]
#[command(about = "Engineering formula calculator with PDF reports", long_about = None)]
#[command(version)]
struct Args {
    /// Settings file (TOML); missing file means defaults
    #[arg(short, long, default_value = "hesap.toml")]
    config: PathBuf,

    /// Directory exported PDFs are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Sign in as this user instead of asking
    #[arg(short, long)]
    user: Option<String>,

    /// Also print results and reports as JSON
    #[arg(long)]
    json: bool,
}

enum MenuChoice {
    Calculator(&'static str),
    Reports,
    Quit,
}

fn parse_menu_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "r" | "R" => Some(MenuChoice::Reports),
        "q" | "Q" => Some(MenuChoice::Quit),
        other => {
            let index: usize = other.parse().ok()?;
            let def = catalog::all().get(index.checked_sub(1)?)?;
            Some(MenuChoice::Calculator(def.id))
        }
    }
}

/// Print `prompt` and read one line. `None` on end of input.
fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn confirm(prompt: &str) -> bool {
    matches!(prompt_line(prompt).as_deref(), Some("e" | "E" | "evet" | "y" | "Y"))
}

fn print_error(e: &CalcError, json: bool) {
    eprintln!("Hata: {}", e);
    if json {
        if let Ok(text) = serde_json::to_string_pretty(e) {
            eprintln!("{}", text);
        }
    }
}

fn print_menu() {
    println!();
    println!("═══════════════════════════════════════");
    println!("  HESAPLAMALAR");
    println!("═══════════════════════════════════════");
    for (i, def) in catalog::all().iter().enumerate() {
        println!("  {}) {}", i + 1, def.nav_label);
    }
    println!("  r) Raporlar");
    println!("  q) Çıkış");
}

fn identity_from(args: &Args) -> Identity {
    let name = match &args.user {
        Some(name) => Some(name.clone()),
        None => prompt_line("Kullanıcı adı (boş: misafir): "),
    };
    match name {
        Some(name) if !name.is_empty() => Identity::signed_in(name),
        _ => Identity::anonymous(),
    }
}

/// Walk the form fields once, then offer to save a valid result.
fn run_calculator(engine: &Engine, identity: &Identity, id: &str, json: bool) -> CalcResult<()> {
    let mut session = engine.open(identity, id)?;
    let def = session.definition();

    println!();
    println!("{}", def.title);
    println!("  {}", def.formula);
    println!();

    for field in def.input_fields {
        let current = session.form().raw_text(field.key).unwrap_or("0").to_string();
        let unit = if field.unit.is_empty() {
            String::new()
        } else {
            format!(" [{}]", field.unit)
        };
        let Some(raw) = prompt_line(&format!("  {}{} ({}): ", field.label, unit, current)) else {
            return Ok(());
        };
        if !raw.is_empty() {
            session.update_field(field.key, &raw)?;
        }
    }

    show_outcome(&session, json);

    if session.can_save() && confirm("Rapor olarak kaydet? [e/H]: ") {
        let report_id = engine.save(identity, &mut session)?;
        println!("Rapor kaydedildi: {}", report_id);
    }

    Ok(())
}

fn show_outcome(session: &CalculatorSession, json: bool) {
    println!();
    match session.result_text() {
        Some(text) => println!("Sonuç: {}", text),
        None => println!("Sonuç yok: {} olmalı", session.definition().precondition_text),
    }
    if json {
        if let Ok(text) = serde_json::to_string_pretty(&session.outcome()) {
            println!("{}", text);
        }
    }
}

/// One `label = value` line per snapshot entry, in snapshot order.
fn input_lines(report: &Report) -> Vec<String> {
    report
        .inputs_snapshot()
        .iter()
        .map(|entry| format!("{} = {}", entry.label, entry.value))
        .collect()
}

/// List saved reports and export the chosen one.
fn run_reports(engine: &Engine, out_dir: &Path, json: bool) -> CalcResult<()> {
    let reports = engine.reports();

    println!();
    println!("Raporlar ({})", reports.len());
    if reports.is_empty() {
        println!("  Henüz rapor yok.");
        return Ok(());
    }

    for (i, report) in reports.iter().enumerate() {
        println!("  {}) {} - {}", i + 1, report.title(), report.created_at());
        for line in input_lines(report) {
            println!("     {}", line);
        }
        println!("     Sonuç: {}", report.result());
    }
    if json {
        if let Ok(text) = serde_json::to_string_pretty(&reports) {
            println!("{}", text);
        }
    }

    let Some(choice) = prompt_line("PDF indirmek için numara (boş: geri): ") else {
        return Ok(());
    };
    if choice.is_empty() {
        return Ok(());
    }

    let report = choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| reports.get(i))
        .ok_or_else(|| CalcError::report_not_found(choice.clone()))?;

    let document = engine.render_by_id(report.id())?;
    let path = export_pdf(&document, out_dir)?;
    println!("PDF kaydedildi: {}", path.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let settings = match EngineSettings::load_or_default(&args.config) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "could not load settings");
            print_error(&e, args.json);
            return ExitCode::FAILURE;
        }
    };
    let engine = Engine::new(settings);

    println!("Hesap - Mühendislik Hesaplamaları");
    println!("=================================");
    let identity = identity_from(&args);
    debug!(authenticated = identity.authenticated, "session started");

    loop {
        print_menu();
        let Some(input) = prompt_line("Seçim: ") else {
            break;
        };

        let result = match parse_menu_choice(&input) {
            Some(MenuChoice::Calculator(id)) => run_calculator(&engine, &identity, id, args.json),
            Some(MenuChoice::Reports) => run_reports(&engine, &args.out_dir, args.json),
            Some(MenuChoice::Quit) => break,
            None => {
                println!("Geçersiz seçim: {}", input);
                Ok(())
            }
        };

        if let Err(e) = result {
            print_error(&e, args.json);
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_by_number() {
        assert!(matches!(parse_menu_choice("1"), Some(MenuChoice::Calculator("deprem-yuku"))));
        assert!(matches!(parse_menu_choice(" 2 "), Some(MenuChoice::Calculator("basinc"))));
        assert!(matches!(parse_menu_choice("9"), Some(MenuChoice::Calculator("isil-genlesme"))));
    }

    #[test]
    fn test_menu_choice_rejects_out_of_range() {
        assert!(parse_menu_choice("0").is_none());
        assert!(parse_menu_choice("10").is_none());
        assert!(parse_menu_choice("basinc").is_none());
    }

    #[test]
    fn test_menu_letters() {
        assert!(matches!(parse_menu_choice("r"), Some(MenuChoice::Reports)));
        assert!(matches!(parse_menu_choice("Q"), Some(MenuChoice::Quit)));
    }

    #[test]
    fn test_report_listing_echoes_inputs() {
        let engine = Engine::default();
        let user = Identity::signed_in("Ayşe");
        let mut session = engine.open(&user, "basinc").unwrap();
        session.update_field("F", "10").unwrap();
        session.update_field("A", "2").unwrap();
        let id = engine.save(&user, &mut session).unwrap();

        let report = engine.report(&id).unwrap();
        assert_eq!(input_lines(&report), vec!["Kuvvet (F) = 10 N", "Alan (A) = 2 m²"]);
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["hesap_cli"]);
        assert_eq!(args.config, PathBuf::from("hesap.toml"));
        assert_eq!(args.out_dir, PathBuf::from("."));
        assert!(args.user.is_none());
        assert!(!args.json);
    }
}

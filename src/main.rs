use anyhow::Context;
use clap::Parser;
use roster_csv::config::cli::Command;
use roster_csv::utils::{logger, validation::Validate};
use roster_csv::{
    AppConfig, CliConfig, CsvCodec, ImportReport, LocalStorage, LoggingObserver, PersonForm,
    RosterError, RosterSession,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => AppConfig::load_validated(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => AppConfig::default(),
    };
    let settings = cli.resolve(&file_config);

    // 初始化日誌
    if settings.log_json {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }
    tracing::debug!("Effective settings: {:?}", settings);

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let mut session = RosterSession::new(LocalStorage::default(), CsvCodec::new(settings.dialect));
    session.subscribe(Box::new(LoggingObserver));

    match session.load_or_empty(&settings.roster_path) {
        Ok(Some(mut report)) => {
            print_problems(&report);
            // 名單檔本身有錯時不可繼續，否則存檔會截斷資料
            if let Some(e) = report.fatal_error.take() {
                fail(e);
            }
        }
        Ok(None) => {}
        Err(e) => fail(e),
    }

    let before = session.roster().clone();
    let outcome = run_command(&mut session, &cli.command);

    // 匯入中止時，先前已加入的資料仍需保存
    if cli.command.mutates() && session.roster() != &before {
        if let Err(e) = session.save(&settings.roster_path, cli.force) {
            fail(e);
        }
    }

    if let Err(e) = outcome {
        fail(e);
    }
    Ok(())
}

fn run_command(session: &mut RosterSession<LocalStorage>, command: &Command) -> roster_csv::Result<()> {
    match command {
        Command::List { filter, json } => {
            let people: Vec<_> = session.filter(filter.as_deref()).collect();
            if *json {
                println!("{}", serde_json::to_string_pretty(&people)?);
            } else {
                for person in people {
                    let index = session.roster().position(person).unwrap_or_default();
                    println!("{:>3}  {}", index, person);
                }
            }
        }
        Command::Add { name, surname, age } => {
            session.add_person(&PersonForm::new(name.as_str(), surname.as_str(), age.as_str()))?;
            println!("✅ Persona agregada con éxito.");
        }
        Command::Edit {
            index,
            name,
            surname,
            age,
        } => {
            let current = session
                .roster()
                .get(*index)
                .ok_or(RosterError::IndexOutOfRange {
                    index: *index,
                    len: session.roster().len(),
                })?;
            let mut form = PersonForm::from_person(current);
            if let Some(name) = name {
                form.name = name.clone();
            }
            if let Some(surname) = surname {
                form.surname = surname.clone();
            }
            if let Some(age) = age {
                form.age = age.clone();
            }
            session.edit_person(*index, &form)?;
            println!("✅ Persona modificada con éxito.");
        }
        Command::Remove { index } => {
            let removed = session.remove_at(*index)?;
            println!("✅ Persona eliminada con éxito: {}", removed);
        }
        Command::Import { file } => {
            let mut report = session.import_file(file)?;
            print_problems(&report);
            if let Some(err) = report.fatal_error.take() {
                return Err(err);
            }
            println!("✅ Datos importados correctamente ({}).", report.describe());
        }
        Command::Export { file } => {
            let count = session.export_file(file)?;
            println!("✅ Datos exportados correctamente ({} personas).", count);
        }
    }
    Ok(())
}

fn print_problems(report: &ImportReport) {
    for person in &report.skipped_duplicates {
        eprintln!("⚠️ La persona {} ya existe en la lista.", person.name());
    }
    for line in &report.malformed_lines {
        eprintln!("⚠️ Línea inválida en el archivo: {}", line);
    }
}

fn fail(e: RosterError) -> ! {
    tracing::error!(
        "❌ Operation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

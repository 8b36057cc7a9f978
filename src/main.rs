// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;

use anyhow::Result;
use duet::config::SessionConfig;
use duet::music::{Key, SpellingTable};
use duet::session::{BeepEvent, NoteObservation, TickInput};

fn print_usage() {
    println!("DUET - Duet Session Recorder");
    println!();
    println!("Usage: duet [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --dump-table [FILE]       Print the built-in spelling table (or write it to FILE)");
    println!("  --validate-table <FILE>   Check a spelling table file");
    println!("  --resolve <MIDI> [KEY]    Spell a MIDI note, optionally under a key (e.g. \"A major\")");
    println!("  --demo [CONFIG]           Record a short built-in duet and save it");
    println!("  --help                    Show this help message");
}

fn dump_table(path: Option<&str>) -> Result<()> {
    let table = SpellingTable::standard();
    match path {
        Some(path) => {
            table.save(path)?;
            println!("Wrote standard table ({} notes) to {}", table.len(), path);
        }
        None => print!("{}", table.to_yaml()?),
    }
    Ok(())
}

fn validate_table(path: &str) -> Result<()> {
    let table = SpellingTable::load(path)?;
    table.validate()?;
    println!("{}: ok, {} notes covered", path, table.len());
    Ok(())
}

fn resolve_note(midi: u8, key: Option<Key>) -> Result<()> {
    let table = SpellingTable::standard();
    let spelling = table.resolve(midi, key.as_ref())?;
    let context = match key {
        Some(key) => format!("in {key}"),
        None => "with no key estimation".to_string(),
    };
    println!(
        "midi {} {} -> {} (dpc {}, acc \"{}\", octave {})",
        midi, context, spelling.name, spelling.dpc, spelling.acc, spelling.octave
    );
    Ok(())
}

fn run_demo(config: SessionConfig) -> Result<()> {
    let mut recorder = config.recorder()?;

    // A short fragment: the duet opens without a key estimation, then
    // the estimator settles on A major and drifts to Eb major.
    let script: [(u8, u8, Option<Key>); 8] = [
        (69, 57, None),
        (71, 52, None),
        (73, 57, Key::parse("A major")),
        (74, 50, Key::parse("A major")),
        (73, 57, Key::parse("A major")),
        (70, 51, Key::parse("Eb major")),
        (68, 51, Key::parse("Eb major")),
        (67, 55, Key::parse("Eb major")),
    ];

    for (i, &(dnn, human, key)) in script.iter().enumerate() {
        let input = TickInput {
            dnn: NoteObservation::new(dnn, key),
            human: NoteObservation::new(human, None),
            metronome: BeepEvent::new((i % 4) as u32 + 1, i % 4 == 0),
        };
        recorder.tick(&input)?;
    }

    let recorded = recorder.len();
    let path = recorder.save()?;
    println!("Saved {} tick records to {:?}", recorded, path);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("DUET - Duet Session Recorder");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--dump-table" => {
            dump_table(args.get(2).map(String::as_str))?;
        }
        "--validate-table" => {
            if args.len() < 3 {
                eprintln!("Error: --validate-table requires a file path");
                std::process::exit(1);
            }
            validate_table(&args[2])?;
        }
        "--resolve" => {
            if args.len() < 3 {
                eprintln!("Error: --resolve requires a MIDI note number");
                std::process::exit(1);
            }
            let midi: u8 = args[2]
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid MIDI note number: {}", args[2]))?;
            let key = if args.len() > 3 {
                let name = args[3..].join(" ");
                Some(
                    Key::parse(&name)
                        .ok_or_else(|| anyhow::anyhow!("Invalid key name: {}", name))?,
                )
            } else {
                None
            };
            resolve_note(midi, key)?;
        }
        "--demo" => {
            let config = match args.get(2) {
                Some(path) => SessionConfig::load(path)?,
                None => SessionConfig::default(),
            };
            run_demo(config)?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use harmoniq::midi::tempo_micros;
use harmoniq::midi::voicing::{chord_notes, note_name};
use harmoniq::{interval_label, ChordTable, Encoder, MidiFile, PitchClass, Progression};

#[derive(Parser)]
#[command(name = "harmoniq")]
#[command(version, about = "Export chord progressions as Standard MIDI Files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Chord-quality table to use instead of the built-in one
    /// (YAML mapping of label to semitone offsets)
    #[arg(long, global = true)]
    chords: Option<PathBuf>,

    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a progression document to a .mid file
    Export {
        /// Progression document (YAML or JSON)
        input: PathBuf,

        /// Output path (default: input with a .mid extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tempo in BPM, overriding the document
        #[arg(short, long, allow_negative_numbers = true)]
        tempo: Option<f64>,
    },
    /// Show the notes each bar plays, without writing a file
    Inspect {
        input: PathBuf,

        #[arg(short, long, allow_negative_numbers = true)]
        tempo: Option<f64>,
    },
    /// List the chord qualities and their intervals
    Chords,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let encoder = Encoder::new(load_chord_table(cli.chords.as_deref())?);

    match cli.command {
        Commands::Export { input, output, tempo } => export(&encoder, &input, output, tempo),
        Commands::Inspect { input, tempo } => inspect(&encoder, &input, tempo),
        Commands::Chords => {
            list_chords(encoder.chords());
            Ok(())
        }
    }
}

fn load_chord_table(path: Option<&Path>) -> Result<ChordTable> {
    match path {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("reading chord table '{}'", path.display()))?;
            ChordTable::from_yaml_str(&source)
                .with_context(|| format!("parsing chord table '{}'", path.display()))
        }
        None => Ok(ChordTable::standard()),
    }
}

fn load_progression(path: &Path) -> Result<Progression> {
    Progression::load(path).with_context(|| format!("loading progression '{}'", path.display()))
}

fn export(encoder: &Encoder, input: &Path, output: Option<PathBuf>, tempo: Option<f64>) -> Result<()> {
    let document = load_progression(input)?;
    let bpm = document.tempo_or(tempo);

    let file = encoder
        .encode(document.steps(), bpm)
        .context("encoding MIDI")?;

    let output = output.unwrap_or_else(|| MidiFile::path_for(input));
    file.write_to(&output)
        .with_context(|| format!("writing '{}'", output.display()))?;

    eprintln!(
        "Wrote {} bar(s) at {} bpm to {} ({} bytes)",
        document.steps().len(),
        bpm,
        output.display(),
        file.len()
    );
    Ok(())
}

fn inspect(encoder: &Encoder, input: &Path, tempo: Option<f64>) -> Result<()> {
    let table = encoder.chords();
    let document = load_progression(input)?;
    let bpm = document.tempo_or(tempo);
    let micros = tempo_micros(bpm)?;

    if let Some(title) = &document.title {
        println!("{}", title);
    }
    println!("{} bpm ({} us per quarter note), 4/4", bpm, micros);

    if document.is_empty() {
        println!("(no chords)");
        return Ok(());
    }

    for (i, step) in document.steps().iter().enumerate() {
        let notes = chord_notes(step, table);
        let tones: Vec<String> = notes
            .iter()
            .map(|&n| PitchClass::from_semitone(n % 12).to_string())
            .collect();
        let intervals: Vec<String> = table
            .offsets_or_major(&step.variety)
            .iter()
            .map(|&o| interval_label(o))
            .collect();
        let names: Vec<String> = notes.iter().map(|&n| note_name(n)).collect();
        let fallback = if table.contains(&step.variety) { "" } else { "  (as Major)" };

        println!(
            "{:>3}  {:<6} {:<18} {:<16} {:<18} {}{}",
            i + 1,
            step.numeral,
            step.chord_name(),
            tones.join(" "),
            intervals.join(" "),
            names.join(" "),
            fallback
        );
    }
    Ok(())
}

fn list_chords(table: &ChordTable) {
    for (label, offsets) in table.iter() {
        let intervals: Vec<String> = offsets.iter().map(|&o| interval_label(o)).collect();
        println!("{:<16} {}", label, intervals.join(" "));
    }
}

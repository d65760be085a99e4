mod settings;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::Parser;

use alphabetizer_core::alignment::infrastructure::aligner_config::{AlignerConfig, ModelRef};
use alphabetizer_core::alignment::infrastructure::whisper_aligner::WhisperAligner;
use alphabetizer_core::pipeline::alphabetize_audio_use_case::AlphabetizeAudioUseCase;
use alphabetizer_core::pipeline::prepare_audio_use_case::PrepareAudioUseCase;
use alphabetizer_core::pipeline::prepared_audio::PreparedAudio;
use alphabetizer_core::shared::wav_path::has_wav_extension;
use alphabetizer_core::splicing::domain::audio_splicer::SpliceMode;
use alphabetizer_core::splicing::infrastructure::script_splicer::ScriptSplicer;

use settings::Settings;

/// Rearrange the words of a recording into alphabetical order.
#[derive(Parser, Debug)]
#[command(name = "alphabetize")]
struct Cli {
    /// Input recording (mono 16-bit 16 kHz WAV).
    input: PathBuf,

    /// Output file (required unless --dry-run is used).
    output: Option<PathBuf>,

    /// Transcript text, lowercase with minimal punctuation.
    #[arg(long)]
    transcript: Option<String>,

    /// Read the transcript from a file.
    #[arg(long)]
    transcript_file: Option<PathBuf>,

    /// Where to cut each word: next-word or word-end.
    #[arg(long)]
    mode: Option<String>,

    /// Acoustic model file, or "bundled" for the default English model.
    #[arg(long)]
    acoustic_model: Option<String>,

    /// CMU-style pronunciation dictionary.
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Grapheme-to-phoneme resource. It must exist; when set, words missing
    /// from the dictionary are logged at debug level instead of as warnings.
    #[arg(long)]
    g2p: Option<PathBuf>,

    /// Splicer program to run.
    #[arg(long)]
    splicer: Option<String>,

    /// Argument passed to the splicer before the positional ones (repeatable).
    #[arg(long = "splicer-arg", allow_hyphen_values = true)]
    splicer_args: Option<Vec<String>>,

    /// Seconds to wait for the splicer before killing it (0 = no limit).
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the alphabetized words and timestamps without splicing.
    #[arg(long)]
    dry_run: bool,

    /// Settings file to use instead of the one in the config directory.
    #[arg(long)]
    settings: Option<PathBuf>,
}

/// Flags merged over the settings file.
#[derive(Debug, PartialEq)]
struct RunOptions {
    mode: SpliceMode,
    splicer_program: String,
    splicer_args: Vec<String>,
    timeout: Option<Duration>,
    aligner: AlignerSettings,
}

#[derive(Debug, PartialEq)]
struct AlignerSettings {
    acoustic_model: ModelRef,
    dictionary: Option<PathBuf>,
    g2p: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = match &cli.settings {
        Some(path) => Settings::load_from(path)
            .map_err(|e| format!("Failed to read settings {}: {e}", path.display()))?,
        None => Settings::load(),
    };
    let options = resolve_options(&cli, settings)?;
    let transcript = read_transcript(&cli)?;

    let config = AlignerConfig::default()
        .with_acoustic_model(options.aligner.acoustic_model.clone())
        .with_dictionary(options.aligner.dictionary.clone())
        .with_g2p(options.aligner.g2p.clone());
    let aligner = WhisperAligner::from_config(&config, Some(Box::new(download_progress)))
        .map_err(|e| format!("Failed to set up aligner: {e}"))?;
    log::info!("Using acoustic model {}", aligner.model_path().display());

    let prepared = PrepareAudioUseCase::new(Box::new(aligner)).execute(&cli.input, &transcript)?;

    if cli.dry_run {
        print_prepared(&prepared);
        return Ok(());
    }

    let output = cli
        .output
        .as_deref()
        .ok_or("Output file is required unless --dry-run is used")?;
    let splicer = ScriptSplicer::new(
        options.splicer_program.clone(),
        options.splicer_args.iter().map(OsString::from).collect(),
    )
    .with_timeout(options.timeout);

    AlphabetizeAudioUseCase::new(Box::new(splicer)).execute(&prepared, output, options.mode)?;
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !has_wav_extension(&cli.input) {
        return Err(format!("Audio file must be in WAV format: {}", cli.input.display()).into());
    }
    match (&cli.transcript, &cli.transcript_file) {
        (Some(_), Some(_)) => {
            return Err("--transcript and --transcript-file are mutually exclusive".into())
        }
        (None, None) => return Err("One of --transcript or --transcript-file is required".into()),
        _ => {}
    }
    if !cli.dry_run && cli.output.is_none() {
        return Err("Output file is required unless --dry-run is used".into());
    }
    if let Some(mode) = &cli.mode {
        mode.parse::<SpliceMode>()?;
    }
    Ok(())
}

fn resolve_options(cli: &Cli, settings: Settings) -> Result<RunOptions, Box<dyn std::error::Error>> {
    let mode = cli.mode.as_deref().unwrap_or(settings.mode.as_str()).parse::<SpliceMode>()?;
    let timeout_secs = cli.timeout_secs.unwrap_or(settings.timeout_secs);
    let acoustic_model = cli
        .acoustic_model
        .as_deref()
        .or(settings.acoustic_model.as_deref())
        .map(ModelRef::parse)
        .unwrap_or(ModelRef::Bundled);

    Ok(RunOptions {
        mode,
        splicer_program: cli.splicer.clone().unwrap_or(settings.splicer_program),
        splicer_args: cli.splicer_args.clone().unwrap_or(settings.splicer_args),
        timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        aligner: AlignerSettings {
            acoustic_model,
            dictionary: cli.dictionary.clone().or(settings.dictionary),
            g2p: cli.g2p.clone().or(settings.g2p),
        },
    })
}

fn read_transcript(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
    match (&cli.transcript, &cli.transcript_file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => read_transcript_file(path),
        (None, None) => Err("One of --transcript or --transcript-file is required".into()),
    }
}

fn read_transcript_file(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    fs::read_to_string(path)
        .map_err(|e| format!("Failed to read transcript {}: {e}", path.display()).into())
}

fn print_prepared(prepared: &PreparedAudio) {
    for word in prepared.words() {
        println!(
            "{:>8.3} {:>8.3}  {}",
            word.start_time, word.end_time, word.text
        );
    }
    println!("number of words: {}", prepared.word_count());
    println!("start: {}", prepared.timestamps().start_list);
    println!("end:   {}", prepared.timestamps().end_list);
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading acoustic model... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading acoustic model... {downloaded} bytes");
    }
}
